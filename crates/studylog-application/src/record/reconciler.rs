use super::view::{GoalProgress, LoadPhase, RecordsView};
use std::sync::Arc;
use studylog_core::config::{DEFAULT_GOAL_HOURS, RemovePolicy, StudyLogConfig};
use studylog_core::error::{Result, StudyLogError};
use studylog_core::record::{Record, RecordDraft, RecordId, RecordRepository};
use tokio::sync::{Mutex, watch};

/// Keeps an in-memory mirror of the remote record table.
///
/// `RecordReconciler` is responsible for:
/// - Loading the full record list and its total
/// - Appending and editing records once the remote store confirms them
/// - Removing records locally first, then remotely
/// - Publishing every change to subscribers
///
/// Loads and mutations run one at a time: each holds the mutation gate
/// for its whole duration, so completions are applied in the order the
/// calls were made. Readers never wait on the gate.
pub struct RecordReconciler {
    repository: Arc<dyn RecordRepository>,
    state: watch::Sender<RecordsView>,
    mutation_gate: Mutex<()>,
    remove_policy: RemovePolicy,
}

/// Marks the load as finished when dropped, whether the fetch returned,
/// failed or was cancelled.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<RecordsView>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|view| {
            if view.phase == LoadPhase::Ready {
                return false;
            }
            view.phase = LoadPhase::Ready;
            true
        });
    }
}

impl RecordReconciler {
    /// Creates a reconciler with the default goal and remove policy.
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        let (state, _) = watch::channel(RecordsView::new(DEFAULT_GOAL_HOURS));
        Self {
            repository,
            state,
            mutation_gate: Mutex::new(()),
            remove_policy: RemovePolicy::default(),
        }
    }

    /// Creates a reconciler using the goal and remove policy from `config`.
    pub fn from_config(repository: Arc<dyn RecordRepository>, config: &StudyLogConfig) -> Self {
        Self::new(repository)
            .with_goal_hours(config.goal_hours)
            .with_remove_policy(config.remove_policy)
    }

    pub fn with_goal_hours(self, goal_hours: f64) -> Self {
        self.state.send_modify(|view| view.goal_hours = goal_hours);
        self
    }

    pub fn with_remove_policy(mut self, policy: RemovePolicy) -> Self {
        self.remove_policy = policy;
        self
    }

    // ============================================================================
    // Observable state
    // ============================================================================

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> RecordsView {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RecordsView> {
        self.state.subscribe()
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.borrow().records().to_vec()
    }

    pub fn total(&self) -> f64 {
        self.state.borrow().total()
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.borrow().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn progress(&self) -> GoalProgress {
        self.state.borrow().progress()
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.phase() {
            LoadPhase::Ready => Ok(()),
            _ => Err(StudyLogError::NotReady),
        }
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Fetches every record and replaces the local list with them.
    ///
    /// On failure the local list is left as it was. Either way the phase
    /// ends at `Ready`.
    pub async fn load(&self) -> Result<()> {
        let _gate = self.mutation_gate.lock().await;

        self.state.send_modify(|view| view.phase = LoadPhase::Loading);
        let _loading = LoadingGuard { state: &self.state };

        match self.repository.fetch_all().await {
            Ok(rows) => {
                let count = rows.len();
                self.state.send_modify(|view| {
                    view.collection.replace(rows.into_iter().map(Record::from));
                    view.phase = LoadPhase::Ready;
                });
                tracing::info!(
                    "[RecordReconciler] Loaded {} records, total {}",
                    count,
                    self.total()
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[RecordReconciler] Load failed: {}", err);
                Err(err)
            }
        }
    }

    /// Inserts a record remotely and appends it once the store confirms.
    ///
    /// Nothing changes locally when validation or the remote insert fails.
    pub async fn append(&self, draft: RecordDraft) -> Result<Record> {
        self.ensure_ready()?;
        let valid = draft.validate()?;

        let _gate = self.mutation_gate.lock().await;

        let row = self
            .repository
            .insert(valid.title(), valid.duration())
            .await
            .inspect_err(|err| tracing::warn!("[RecordReconciler] Append failed: {}", err))?;

        let record = Record::from(row);
        tracing::debug!(
            "[RecordReconciler] Appended id={}, duration={}",
            record.id,
            record.duration
        );
        self.state
            .send_modify(|view| view.collection.push(record.clone()));

        Ok(record)
    }

    /// Updates a record remotely, then locally once the store confirms.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: the local record after the update
    /// - `Ok(None)`: the remote accepted the update but no local record has
    ///   that id; the local list is unchanged
    /// - `Err(_)`: validation or the remote call failed; nothing changed
    pub async fn update(&self, id: &RecordId, draft: RecordDraft) -> Result<Option<Record>> {
        self.ensure_ready()?;
        let valid = draft.validate()?;

        let _gate = self.mutation_gate.lock().await;

        let row = self
            .repository
            .update(id, valid.title(), valid.duration())
            .await
            .inspect_err(|err| tracing::warn!("[RecordReconciler] Update of {} failed: {}", id, err))?;

        let confirmed = Record::from(row);
        let mut updated = None;
        self.state.send_if_modified(|view| {
            updated = view
                .collection
                .update(id, confirmed.title, confirmed.duration);
            updated.is_some()
        });

        if updated.is_none() {
            tracing::debug!("[RecordReconciler] Update of {} matched no local record", id);
        }

        Ok(updated)
    }

    /// Removes a record locally, then asks the remote store to delete it.
    ///
    /// The local removal is visible before the remote call resolves. When
    /// the remote delete fails the removal stands under
    /// [`RemovePolicy::Optimistic`], and is undone under
    /// [`RemovePolicy::RollbackOnFailure`]; the error is returned in both
    /// cases.
    pub async fn remove(&self, id: &RecordId) -> Result<Option<Record>> {
        self.ensure_ready()?;

        let _gate = self.mutation_gate.lock().await;

        let mut removed = None;
        self.state.send_if_modified(|view| {
            removed = view.collection.remove(id);
            removed.is_some()
        });

        if let Err(err) = self.repository.delete(id).await {
            tracing::warn!("[RecordReconciler] Remote delete of {} failed: {}", id, err);

            if self.remove_policy == RemovePolicy::RollbackOnFailure {
                if let Some((index, record)) = removed {
                    tracing::debug!("[RecordReconciler] Restoring {} at index {}", id, index);
                    self.state
                        .send_modify(|view| view.collection.restore(index, record));
                }
            }

            return Err(err);
        }

        Ok(removed.map(|(_, record)| record))
    }
}
