mod common;

use common::{MockRecordRepository, seed_rows, sum_of};
use std::sync::Arc;
use studylog_application::{LoadPhase, RecordReconciler};
use studylog_core::error::{RemoteOperation, StudyLogError};
use studylog_core::record::{RecordDraft, RecordId, RemoteRecord};

async fn shared(repo: &Arc<MockRecordRepository>) -> Arc<RecordReconciler> {
    let reconciler = Arc::new(RecordReconciler::new(repo.clone()));
    reconciler.load().await.expect("load should succeed");
    reconciler
}

#[tokio::test]
async fn test_remove_is_visible_before_remote_delete_resolves() {
    let repo = Arc::new(MockRecordRepository::with_rows(seed_rows()));
    let reconciler = shared(&repo).await;
    let mut rx = reconciler.subscribe();
    rx.borrow_and_update();

    let mut gate = repo.gate(RemoteOperation::Delete);
    repo.fail(RemoteOperation::Delete);

    let task = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.remove(&RecordId::new("1")).await }
    });
    gate.wait_started().await;

    // Remote delete still pending, local state already updated
    assert_eq!(reconciler.records().len(), 1);
    assert_eq!(reconciler.total(), 0.0);
    assert!(rx.has_changed().unwrap());
    assert_eq!(repo.rows().len(), 2);

    gate.release(1);
    let result = task.await.unwrap();
    assert!(result.is_err());
    assert_eq!(reconciler.records().len(), 1);
    assert_eq!(reconciler.total(), 0.0);
}

#[tokio::test]
async fn test_loading_flag_while_fetch_in_flight() {
    let repo = Arc::new(MockRecordRepository::with_rows(seed_rows()));
    let reconciler = Arc::new(RecordReconciler::new(repo.clone()));
    let mut gate = repo.gate(RemoteOperation::FetchAll);

    let task = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.load().await }
    });
    gate.wait_started().await;

    assert_eq!(reconciler.phase(), LoadPhase::Loading);
    assert!(reconciler.is_loading());
    assert!(reconciler.snapshot().is_loading());

    let err = reconciler
        .append(RecordDraft::new("Chemistry", 5.0))
        .await
        .unwrap_err();
    assert!(matches!(err, StudyLogError::NotReady));

    gate.release(1);
    task.await.unwrap().unwrap();

    assert_eq!(reconciler.phase(), LoadPhase::Ready);
    assert!(!reconciler.is_loading());
    assert_eq!(reconciler.total(), 3.0);
    assert_eq!(repo.call_count(RemoteOperation::Insert), 0);
}

#[tokio::test]
async fn test_cancelled_load_clears_loading_flag() {
    let repo = Arc::new(MockRecordRepository::with_rows(seed_rows()));
    let reconciler = Arc::new(RecordReconciler::new(repo.clone()));
    let mut gate = repo.gate(RemoteOperation::FetchAll);

    let task = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.load().await }
    });
    gate.wait_started().await;
    assert!(reconciler.is_loading());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(reconciler.phase(), LoadPhase::Ready);
    assert!(reconciler.records().is_empty());
}

#[tokio::test]
async fn test_concurrent_removes_keep_total_consistent() {
    let repo = Arc::new(MockRecordRepository::with_rows(vec![
        RemoteRecord::new("1", "Math", Some(3.0)),
        RemoteRecord::new("2", "Physics", Some(1.5)),
        RemoteRecord::new("3", "Chemistry", Some(5.0)),
    ]));
    let reconciler = shared(&repo).await;
    let mut gate = repo.gate(RemoteOperation::Delete);

    let first = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.remove(&RecordId::new("1")).await }
    });
    let second = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.remove(&RecordId::new("3")).await }
    });
    gate.wait_started().await;

    // One delete in flight, the other queued behind it
    assert_eq!(reconciler.records().len(), 2);
    assert_eq!(reconciler.total(), sum_of(&reconciler.records()));

    gate.release(2);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let records = reconciler.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_str(), "2");
    assert_eq!(reconciler.total(), 1.5);
    assert_eq!(repo.rows().len(), 1);
}

#[tokio::test]
async fn test_appends_apply_in_initiation_order() {
    let repo = Arc::new(MockRecordRepository::new());
    let reconciler = shared(&repo).await;
    let mut gate = repo.gate(RemoteOperation::Insert);

    let first = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.append(RecordDraft::new("First", 1.0)).await }
    });
    gate.wait_started().await;

    let second = tokio::spawn({
        let reconciler = reconciler.clone();
        async move { reconciler.append(RecordDraft::new("Second", 2.0)).await }
    });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    // Second insert is waiting for the first to finish
    assert_eq!(repo.call_count(RemoteOperation::Insert), 1);

    gate.release(2);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let titles: Vec<String> = reconciler.records().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, ["First", "Second"]);
    assert_eq!(reconciler.total(), 3.0);
}
