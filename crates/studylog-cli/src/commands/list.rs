use crate::render;
use anyhow::Result;
use serde::Serialize;
use studylog_application::{GoalProgress, RecordReconciler};
use studylog_core::record::Record;

#[derive(Serialize)]
struct ListOutput<'a> {
    records: &'a [Record],
    progress: GoalProgress,
}

pub async fn run(reconciler: &RecordReconciler, json: bool) -> Result<()> {
    let view = reconciler.snapshot();

    if json {
        let output = ListOutput {
            records: view.records(),
            progress: view.progress(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_view(&view);
    }

    Ok(())
}
