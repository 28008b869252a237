use crate::commands::report;
use crate::render;
use anyhow::Result;
use studylog_application::RecordReconciler;
use studylog_core::record::{RecordDraft, RecordId};

pub async fn run(reconciler: &RecordReconciler, id: String, title: String, hours: f64) -> Result<()> {
    let id = RecordId::new(id);
    let updated = reconciler
        .update(&id, RecordDraft::new(title, hours))
        .await
        .map_err(|e| report(e, "failed to edit, please try again"))?;

    match updated {
        Some(record) => println!("Updated {}: {}", record.id, render::record_line(&record)),
        None => println!("Updated {} remotely; it was not in the loaded list", id),
    }
    render::print_view(&reconciler.snapshot());
    Ok(())
}
