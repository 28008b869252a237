use crate::commands::report;
use crate::render;
use anyhow::Result;
use studylog_application::RecordReconciler;
use studylog_core::record::RecordDraft;

pub async fn run(reconciler: &RecordReconciler, title: String, hours: f64) -> Result<()> {
    let record = reconciler
        .append(RecordDraft::new(title, hours))
        .await
        .map_err(|e| report(e, "failed to register, please try again"))?;

    println!("Added {}: {}", record.id, render::record_line(&record));
    render::print_view(&reconciler.snapshot());
    Ok(())
}
