//! Record application services.
//!
//! This module contains the reconciler that mirrors the remote record table
//! in memory, together with the collection and view types it publishes.

mod collection;
mod reconciler;
mod view;

pub use collection::RecordCollection;
pub use reconciler::RecordReconciler;
pub use view::{GoalProgress, LoadPhase, RecordsView};
