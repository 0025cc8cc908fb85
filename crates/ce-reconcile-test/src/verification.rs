//! Assertion helpers over reports and captured payloads.

use thiserror::Error;

use ce_reconcile_common::{ConfigPayload, FieldValuesExt, ReconcileReport, REDACTED};

/// Verification error types.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Expected changed={expected}, report says {actual}")]
    ChangedMismatch { expected: bool, actual: bool },

    #[error("Expected updates {expected:?}, got {actual:?}")]
    UpdatesMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Secret value leaked into display output: '{context}'")]
    SecretLeaked { context: String },

    #[error("Redaction marker missing from update '{update}'")]
    MarkerMissing { update: String },

    #[error("Expected {expected} applied payloads, captured {actual}")]
    PayloadCountMismatch { expected: usize, actual: usize },

    #[error("Payload {index} missing field '{tag}'")]
    PayloadFieldMissing { index: usize, tag: String },
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Report verification helper.
pub struct ReportVerifier<'a> {
    report: &'a ReconcileReport,
}

impl<'a> ReportVerifier<'a> {
    /// Wraps a report.
    pub fn new(report: &'a ReconcileReport) -> Self {
        Self { report }
    }

    /// Verifies the changed flag.
    pub fn assert_changed(&self, expected: bool) -> VerifyResult<()> {
        if self.report.changed != expected {
            return Err(VerificationError::ChangedMismatch {
                expected,
                actual: self.report.changed,
            });
        }
        Ok(())
    }

    /// Verifies the exact ordered update list.
    pub fn assert_updates(&self, expected: &[&str]) -> VerifyResult<()> {
        if self.report.updates != expected {
            return Err(VerificationError::UpdatesMismatch {
                expected: expected.iter().map(|s| s.to_string()).collect(),
                actual: self.report.updates.clone(),
            });
        }
        Ok(())
    }

    /// Verifies no update string carries any of the given secret values,
    /// and that every update naming a secret field shows the marker.
    pub fn assert_redacted(&self, secrets: &[&str]) -> VerifyResult<()> {
        for update in &self.report.updates {
            for secret in secrets {
                if update.contains(secret) {
                    return Err(VerificationError::SecretLeaked {
                        context: update.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Verifies an update string carries the redaction marker.
    pub fn assert_marker(&self, index: usize) -> VerifyResult<()> {
        let update = &self.report.updates[index];
        if !update.contains(REDACTED) {
            return Err(VerificationError::MarkerMissing {
                update: update.clone(),
            });
        }
        Ok(())
    }
}

/// Captured-payload verification helper.
pub struct PayloadVerifier<'a> {
    payloads: &'a [ConfigPayload],
}

impl<'a> PayloadVerifier<'a> {
    /// Wraps captured payloads.
    pub fn new(payloads: &'a [ConfigPayload]) -> Self {
        Self { payloads }
    }

    /// Verifies the number of applies.
    pub fn assert_count(&self, expected: usize) -> VerifyResult<()> {
        if self.payloads.len() != expected {
            return Err(VerificationError::PayloadCountMismatch {
                expected,
                actual: self.payloads.len(),
            });
        }
        Ok(())
    }

    /// Verifies a payload carries a field with the real (unredacted)
    /// value — the structured side of the redaction law.
    pub fn assert_field(&self, index: usize, tag: &str, value: &str) -> VerifyResult<()> {
        let payload = self
            .payloads
            .get(index)
            .ok_or(VerificationError::PayloadCountMismatch {
                expected: index + 1,
                actual: self.payloads.len(),
            })?;
        match payload.fields.get_field(tag) {
            Some(actual) if actual == value => Ok(()),
            _ => Err(VerificationError::PayloadFieldMissing {
                index,
                tag: tag.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_reconcile_common::{field_values, Intent};

    fn report_with(updates: Vec<&str>, changed: bool) -> ReconcileReport {
        let mut report = ReconcileReport::proposed_from(&field_values! {}, Intent::Present);
        report.changed = changed;
        report.updates = updates.into_iter().map(String::from).collect();
        report
    }

    #[test]
    fn test_assert_changed() {
        let report = report_with(vec![], false);
        let verifier = ReportVerifier::new(&report);
        assert!(verifier.assert_changed(false).is_ok());
        assert!(verifier.assert_changed(true).is_err());
    }

    #[test]
    fn test_assert_redacted() {
        let report = report_with(vec!["snmp-agent community write ******"], true);
        let verifier = ReportVerifier::new(&report);
        assert!(verifier.assert_redacted(&["Wdz123"]).is_ok());
        assert!(verifier.assert_marker(0).is_ok());

        let leaky = report_with(vec!["snmp-agent community write Wdz123"], true);
        let verifier = ReportVerifier::new(&leaky);
        assert!(verifier.assert_redacted(&["Wdz123"]).is_err());
        assert!(verifier.assert_marker(0).is_err());
    }

    #[test]
    fn test_assert_updates_order() {
        let report = report_with(vec!["a", "b"], true);
        let verifier = ReportVerifier::new(&report);
        assert!(verifier.assert_updates(&["a", "b"]).is_ok());
        assert!(verifier.assert_updates(&["b", "a"]).is_err());
    }
}
