//! In-memory stand-in for the remote record table.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::Arc;
use studylog_core::error::{RemoteOperation, Result, StudyLogError};
use studylog_core::record::{RecordId, RecordRepository, RemoteRecord};
use tokio::sync::{Semaphore, mpsc};

/// Holds a remote call open until the test releases it.
#[derive(Clone)]
struct Gate {
    started: mpsc::UnboundedSender<()>,
    release: Arc<Semaphore>,
}

/// Test-side handle of a [`Gate`].
pub struct GateHandle {
    pub started: mpsc::UnboundedReceiver<()>,
    release: Arc<Semaphore>,
}

impl GateHandle {
    /// Waits until a gated call has reached the remote store.
    pub async fn wait_started(&mut self) {
        self.started.recv().await.expect("gate sender dropped");
    }

    /// Lets `count` gated calls complete.
    pub fn release(&self, count: usize) {
        self.release.add_permits(count);
    }
}

/// Mock repository backed by a `Vec`, with switchable failures.
pub struct MockRecordRepository {
    rows: Mutex<Vec<RemoteRecord>>,
    next_id: Mutex<u64>,
    failing: Mutex<HashSet<RemoteOperation>>,
    gates: Mutex<HashMap<RemoteOperation, Gate>>,
    calls: Mutex<Vec<RemoteOperation>>,
    accept_unknown_updates: Mutex<bool>,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Seeds the table. Generated ids continue after the number of rows.
    pub fn with_rows(rows: Vec<RemoteRecord>) -> Self {
        let next_id = rows.len() as u64 + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
            failing: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            accept_unknown_updates: Mutex::new(false),
        }
    }

    pub fn fail(&self, operation: RemoteOperation) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: RemoteOperation) {
        self.failing.lock().unwrap().remove(&operation);
    }

    /// Makes `update` echo a row even when the id is not stored.
    pub fn accept_unknown_updates(&self) {
        *self.accept_unknown_updates.lock().unwrap() = true;
    }

    pub fn gate(&self, operation: RemoteOperation) -> GateHandle {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Semaphore::new(0));
        self.gates.lock().unwrap().insert(
            operation,
            Gate {
                started: started_tx,
                release: release.clone(),
            },
        );
        GateHandle {
            started: started_rx,
            release,
        }
    }

    pub fn rows(&self) -> Vec<RemoteRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<RemoteOperation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: RemoteOperation) -> usize {
        self.calls().iter().filter(|op| **op == operation).count()
    }

    async fn enter(&self, operation: RemoteOperation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);

        let gate = self.gates.lock().unwrap().get(&operation).cloned();
        if let Some(gate) = gate {
            let _ = gate.started.send(());
            gate.release
                .acquire()
                .await
                .expect("gate closed")
                .forget();
        }

        if self.failing.lock().unwrap().contains(&operation) {
            return Err(StudyLogError::remote(operation, "simulated failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>> {
        self.enter(RemoteOperation::FetchAll).await?;
        Ok(self.rows())
    }

    async fn insert(&self, title: &str, duration: f64) -> Result<RemoteRecord> {
        self.enter(RemoteOperation::Insert).await?;

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };
        let row = RemoteRecord::new(id.to_string(), title, Some(duration));
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &RecordId, title: &str, duration: f64) -> Result<RemoteRecord> {
        self.enter(RemoteOperation::Update).await?;

        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| &row.id == id) {
            Some(row) => {
                row.title = title.to_string();
                row.duration = Some(duration);
                Ok(row.clone())
            }
            None if *self.accept_unknown_updates.lock().unwrap() => {
                Ok(RemoteRecord::new(id.clone(), title, Some(duration)))
            }
            None => Err(StudyLogError::remote(
                RemoteOperation::Update,
                format!("no row with id {}", id),
            )),
        }
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        self.enter(RemoteOperation::Delete).await?;
        self.rows.lock().unwrap().retain(|row| &row.id != id);
        Ok(())
    }
}

/// The two rows of the study-log walkthrough: Math (3h) and Physics (no time).
pub fn seed_rows() -> Vec<RemoteRecord> {
    vec![
        RemoteRecord::new("1", "Math", Some(3.0)),
        RemoteRecord::new("2", "Physics", None),
    ]
}

pub fn sum_of(records: &[studylog_core::record::Record]) -> f64 {
    records.iter().map(|r| r.duration).sum()
}
