use crate::commands::report;
use crate::render;
use anyhow::Result;
use studylog_application::RecordReconciler;
use studylog_core::record::RecordId;

const DELETE_FAILED: &str = "failed to delete, please try again";

pub async fn run(reconciler: &RecordReconciler, id: String) -> Result<()> {
    let id = RecordId::new(id);
    let result = reconciler.remove(&id).await;

    // Show the list as it stands after the remote call, whatever the outcome
    render::print_view(&reconciler.snapshot());

    match result.map_err(|e| report(e, DELETE_FAILED))? {
        Some(record) => println!("Removed {}: {}", record.id, render::record_line(&record)),
        None => println!("Removed {} remotely; it was not in the loaded list", id),
    }
    Ok(())
}
