//! Shared reconciliation engine for CloudEngine configuration managers.
//!
//! This crate provides the common machinery every manager crate
//! (ce-evpnmgr, ce-snmp-communitymgr, ce-snmp-usermgr) is built on:
//!
//! - [`schema`]: data-driven field schemas and the desired-state validator
//! - [`reconcile`]: the desired-vs-actual change decision
//! - [`command`]: structured payloads paired with redacted display strings
//! - [`session`]: the device transport boundary ([`DeviceSession`])
//! - [`converge`]: per-entity orchestration ([`EntityManager`], [`converge()`])
//! - [`report`]: the per-invocation result envelope
//! - [`error`]: the error taxonomy
//!
//! # Architecture
//!
//! Managers follow this pattern, once per entity type per invocation:
//!
//! 1. Validate the declared fields against the entity schema (no I/O)
//! 2. Fetch the device's current records, masked to the declared fields
//! 3. Reconcile: decide none / create / merge / delete
//! 4. Synthesize ordered commands and apply them one at a time
//! 5. Fetch again and assemble the before/after/changed report
//!
//! The engine holds no state between invocations; the device is the only
//! durable store.
//!
//! # Example
//!
//! ```ignore
//! use ce_reconcile_common::{converge, DeviceSession, EntityManager, Intent};
//!
//! async fn run(mgr: &impl EntityManager, session: &mut impl DeviceSession) {
//!     let declared = field_values! { "community_name" => "Wdz123", "access_right" => "write" };
//!     let outcome = converge(mgr, session, &declared, Intent::Present).await?;
//!     assert!(outcome.changed);
//! }
//! ```

pub mod command;
pub mod converge;
pub mod error;
pub mod fields;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod session;
pub mod state;

// Re-export commonly used items at crate root
pub use command::{Command, ConfigOp, ConfigPayload, REDACTED};
pub use converge::{converge, skipped, EntityManager, EntityOutcome};
pub use error::{CeError, CeResult};
pub use fields::{FieldValue, FieldValues, FieldValuesExt};
pub use reconcile::{reconcile, ChangeDecision, ChangeKind};
pub use report::ReconcileReport;
pub use schema::{validate, Constraint, EntitySchema, FieldSpec, Rule};
pub use session::{DeviceSession, FetchQuery};
pub use state::{ActualRecord, DesiredState, Intent};
