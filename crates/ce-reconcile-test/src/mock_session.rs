//! In-memory device session for manager testing.
//!
//! Holds per-entity record tables, answers fetches masked to the
//! requested tags, and folds applied payloads back into the tables so
//! the post-change fetch reflects the change — which is what makes
//! idempotence testable end to end without a device.

use async_trait::async_trait;
use std::collections::HashMap;

use ce_reconcile_common::{
    ActualRecord, CeError, CeResult, ConfigOp, ConfigPayload, DeviceSession, FetchQuery,
};

/// Scripted mock device.
#[derive(Debug, Default)]
pub struct MockSession {
    /// Current records per entity type.
    tables: HashMap<String, Vec<ActualRecord>>,
    /// Key tags per entity, used to match records when folding applies.
    key_tags: HashMap<String, Vec<&'static str>>,
    /// Every fetch query received, in order.
    pub fetched: Vec<FetchQuery>,
    /// Every payload applied, in order, with real values.
    pub applied: Vec<ConfigPayload>,
    /// When set, the next apply reports device rejection.
    reject_next_apply: bool,
    /// When set, every fetch fails with this transport message.
    fail_fetch: Option<String>,
    /// When set, every apply fails with this transport message.
    fail_apply: Option<String>,
}

impl MockSession {
    /// Creates an empty device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the records for an entity type (builder form).
    pub fn with_records(mut self, entity: &str, records: Vec<ActualRecord>) -> Self {
        self.tables.insert(entity.to_string(), records);
        self
    }

    /// Registers the key tags an entity's records are matched by when
    /// merge/delete payloads are folded in.
    pub fn with_key_tags(mut self, entity: &str, tags: Vec<&'static str>) -> Self {
        self.key_tags.insert(entity.to_string(), tags);
        self
    }

    /// Makes the next apply report a device rejection (`Ok(false)`).
    pub fn reject_next_apply(&mut self) {
        self.reject_next_apply = true;
    }

    /// Makes every fetch fail at the transport layer.
    pub fn fail_fetches(&mut self, message: impl Into<String>) {
        self.fail_fetch = Some(message.into());
    }

    /// Makes every apply fail at the transport layer.
    pub fn fail_applies(&mut self, message: impl Into<String>) {
        self.fail_apply = Some(message.into());
    }

    /// Current records for an entity type.
    pub fn records(&self, entity: &str) -> &[ActualRecord] {
        self.tables.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Display strings are not applied; payloads are. This folds one
    /// payload into the entity table the way a device would.
    fn fold(&mut self, payload: &ConfigPayload) {
        let keys = self
            .key_tags
            .get(payload.entity)
            .cloned()
            .unwrap_or_default();
        let table = self.tables.entry(payload.entity.to_string()).or_default();

        let matches = |record: &ActualRecord| -> bool {
            if keys.is_empty() {
                return true;
            }
            keys.iter().all(|tag| {
                payload
                    .fields
                    .iter()
                    .find(|(t, _)| t == tag)
                    .map(|(_, v)| record.get(tag) == Some(v.as_str()))
                    .unwrap_or(false)
            })
        };

        match payload.op {
            ConfigOp::Create => {
                let record: ActualRecord = payload
                    .fields
                    .iter()
                    .map(|(t, v)| (t.clone(), v.clone()))
                    .collect();
                table.push(record);
            }
            ConfigOp::Merge => {
                if let Some(record) = table.iter_mut().find(|r| matches(r)) {
                    for (tag, value) in &payload.fields {
                        record.0.insert(tag.clone(), value.clone());
                    }
                } else {
                    let record: ActualRecord = payload
                        .fields
                        .iter()
                        .map(|(t, v)| (t.clone(), v.clone()))
                        .collect();
                    table.push(record);
                }
            }
            ConfigOp::Delete => {
                table.retain(|r| !matches(r));
            }
        }
    }
}

#[async_trait]
impl DeviceSession for MockSession {
    async fn fetch(&mut self, query: &FetchQuery) -> CeResult<Vec<ActualRecord>> {
        if let Some(message) = &self.fail_fetch {
            return Err(CeError::transport("fetch", message.clone()));
        }
        self.fetched.push(query.clone());

        // Echo only the requested tags, like a subtree-filtered read.
        let records = self
            .tables
            .get(query.entity)
            .map(|records| {
                records
                    .iter()
                    .map(|record| {
                        query
                            .tags
                            .iter()
                            .filter_map(|tag| record.get(tag).map(|v| (*tag, v)))
                            .collect::<ActualRecord>()
                    })
                    .filter(|record: &ActualRecord| !record.0.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn apply(&mut self, payload: &ConfigPayload) -> CeResult<bool> {
        if let Some(message) = &self.fail_apply {
            return Err(CeError::transport("apply", message.clone()));
        }
        if self.reject_next_apply {
            self.reject_next_apply = false;
            return Ok(false);
        }
        self.applied.push(payload.clone());
        self.fold(payload);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ce_reconcile_common::schema::{Constraint, EntitySchema, FieldSpec};

    const SCHEMA: EntitySchema = EntitySchema {
        entity: "mock-entity",
        label: "mock entity",
        key_fields: &["name"],
        fields: &[FieldSpec::new("name", "entryName", Constraint::Any)],
        rules: &[],
    };

    #[tokio::test]
    async fn test_fetch_masks_tags() {
        let mut session = MockSession::new().with_records(
            "mock-entity",
            vec![ActualRecord::new()
                .with("entryName", "a")
                .with("extraTag", "hidden")],
        );
        let records = session
            .fetch(&FetchQuery::new("mock-entity", vec!["entryName"]))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("entryName"), Some("a"));
        assert!(!records[0].has("extraTag"));
    }

    #[tokio::test]
    async fn test_apply_folds_create_and_delete() {
        let mut session =
            MockSession::new().with_key_tags("mock-entity", vec!["entryName"]);

        let create = ConfigPayload::new(&SCHEMA, ConfigOp::Create, &[]).with("entryName", "a");
        assert!(session.apply(&create).await.unwrap());
        assert_eq!(session.records("mock-entity").len(), 1);

        let delete = ConfigPayload::new(&SCHEMA, ConfigOp::Delete, &[]).with("entryName", "a");
        assert!(session.apply(&delete).await.unwrap());
        assert!(session.records("mock-entity").is_empty());
    }

    #[tokio::test]
    async fn test_merge_updates_matching_record() {
        let mut session = MockSession::new()
            .with_records(
                "mock-entity",
                vec![
                    ActualRecord::new().with("entryName", "a").with("x", "1"),
                    ActualRecord::new().with("entryName", "b").with("x", "2"),
                ],
            )
            .with_key_tags("mock-entity", vec!["entryName"]);

        let merge = ConfigPayload::new(&SCHEMA, ConfigOp::Merge, &[])
            .with("entryName", "b")
            .with("x", "9");
        session.apply(&merge).await.unwrap();

        let records = session.records("mock-entity");
        assert_eq!(records[0].get("x"), Some("1"));
        assert_eq!(records[1].get("x"), Some("9"));
    }

    #[tokio::test]
    async fn test_rejection_and_transport_failure() {
        let mut session = MockSession::new();
        session.reject_next_apply();
        let payload = ConfigPayload::new(&SCHEMA, ConfigOp::Create, &[]).with("entryName", "a");
        assert!(!session.apply(&payload).await.unwrap());
        // One-shot: the next apply goes through.
        assert!(session.apply(&payload).await.unwrap());

        session.fail_fetches("connection closed");
        let err = session
            .fetch(&FetchQuery::new("mock-entity", vec!["entryName"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CeError::Transport { .. }));
    }
}
