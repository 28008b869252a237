use super::collection::RecordCollection;
use serde::Serialize;
use studylog_core::record::Record;

/// Top-level lifecycle of a reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    /// Nothing fetched yet.
    Uninitialized,
    /// A full fetch is in flight.
    Loading,
    /// At least one fetch has finished, successfully or not.
    Ready,
}

/// Observable state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsView {
    pub(crate) collection: RecordCollection,
    pub(crate) phase: LoadPhase,
    pub(crate) goal_hours: f64,
}

impl RecordsView {
    pub(crate) fn new(goal_hours: f64) -> Self {
        Self {
            collection: RecordCollection::new(),
            phase: LoadPhase::Uninitialized,
            goal_hours,
        }
    }

    pub fn records(&self) -> &[Record] {
        self.collection.records()
    }

    pub fn total(&self) -> f64 {
        self.collection.total()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn progress(&self) -> GoalProgress {
        GoalProgress::new(self.total(), self.goal_hours)
    }
}

/// Total study time measured against the goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub total: f64,
    pub goal: f64,
    /// `total / goal`; may exceed 1.0 once the goal is passed.
    pub ratio: f64,
    pub remaining: f64,
}

impl GoalProgress {
    pub fn new(total: f64, goal: f64) -> Self {
        let ratio = if goal > 0.0 { total / goal } else { 0.0 };
        Self {
            total,
            goal,
            ratio,
            remaining: (goal - total).max(0.0),
        }
    }

    pub fn is_reached(&self) -> bool {
        self.total >= self.goal
    }
}
