//! Application layer for studylog.
//!
//! This crate keeps the in-memory record list in step with the remote
//! record store, on top of the domain types in `studylog-core`.

pub mod record;

pub use record::{GoalProgress, LoadPhase, RecordReconciler, RecordsView};
