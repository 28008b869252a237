pub mod add;
pub mod edit;
pub mod init;
pub mod list;
pub mod remove;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use studylog_application::RecordReconciler;
use studylog_core::StudyLogError;
use studylog_infrastructure::{ConfigService, SupabaseRecordRepository};

/// Resolves the config, builds the remote repository and runs the initial
/// load.
///
/// A failed load is reported but not fatal: the reconciler is ready with an
/// empty list and mutations still go through.
pub async fn connect(config_path: Option<&Path>) -> Result<RecordReconciler> {
    let service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new_default()?,
    };
    let config = service
        .load()
        .with_context(|| format!("Failed to load config from {}", service.path().display()))?;

    let repository = Arc::new(SupabaseRecordRepository::new(&config.remote));
    let reconciler = RecordReconciler::from_config(repository, &config);

    if let Err(err) = reconciler.load().await {
        tracing::warn!("[Cli] Initial load failed: {}", err);
    }

    Ok(reconciler)
}

/// Wraps a failed operation with the message shown to the user.
///
/// Validation failures are shown as-is; anything else gets `action_message`
/// on top with the underlying error as its cause.
pub fn report(err: StudyLogError, action_message: &'static str) -> anyhow::Error {
    match err {
        StudyLogError::Validation(errors) => anyhow::anyhow!("{}", errors),
        other => anyhow::Error::new(other).context(action_message),
    }
}
