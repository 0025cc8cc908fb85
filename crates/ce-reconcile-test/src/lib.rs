//! Test infrastructure for CloudEngine configuration managers.
//!
//! Provides:
//! - An in-memory device session with payload folding
//! - Record fixtures for common device-state scenarios
//! - Report and payload verification helpers

pub mod fixtures;
mod mock_session;
mod verification;

pub use mock_session::MockSession;
pub use verification::{PayloadVerifier, ReportVerifier, VerificationError, VerifyResult};
