//! Configuration loading.
//!
//! Each setting is taken from `config.toml` first, then from the
//! environment, then from built-in defaults.

use crate::paths::StudyLogPaths;
use std::path::{Path, PathBuf};
use studylog_core::config::{
    ConfigRoot, DEFAULT_GOAL_HOURS, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS, RemoteConfig,
    StudyLogConfig,
};
use studylog_core::error::{Result, StudyLogError};

pub const ENV_URL: &str = "STUDYLOG_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "STUDYLOG_SUPABASE_ANON_KEY";
pub const ENV_TABLE: &str = "STUDYLOG_TABLE";
pub const ENV_GOAL_HOURS: &str = "STUDYLOG_GOAL_HOURS";

/// Loads and resolves [`StudyLogConfig`].
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `~/.config/studylog/config.toml`.
    pub fn new_default() -> Result<Self> {
        let path =
            StudyLogPaths::config_file().map_err(|e| StudyLogError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Uses a custom config file location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file. A missing file is not an error.
    pub fn load_root(&self) -> Result<ConfigRoot> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using environment only",
                self.path.display()
            );
            return Ok(ConfigRoot::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let root = toml::from_str(&content)?;
        Ok(root)
    }

    /// Loads the file and resolves it against the process environment.
    pub fn load(&self) -> Result<StudyLogConfig> {
        let root = self.load_root()?;
        resolve(root, |key| std::env::var(key).ok())
    }
}

/// Merges file values, environment values and defaults.
///
/// `env` is injected so resolution can be tested without touching the
/// process environment.
pub fn resolve<F>(root: ConfigRoot, env: F) -> Result<StudyLogConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let url = non_empty(root.remote.url).or_else(|| non_empty(env(ENV_URL)));
    let anon_key = non_empty(root.remote.anon_key).or_else(|| non_empty(env(ENV_ANON_KEY)));

    let (url, anon_key) = match (url, anon_key) {
        (Some(url), Some(key)) => (url, key),
        (url, key) => {
            let mut missing = Vec::new();
            if url.is_none() {
                missing.push(format!("remote.url / {}", ENV_URL));
            }
            if key.is_none() {
                missing.push(format!("remote.anon_key / {}", ENV_ANON_KEY));
            }
            return Err(StudyLogError::config(format!(
                "missing {} in config.toml or environment variables",
                missing.join(", ")
            )));
        }
    };

    let table = non_empty(root.remote.table)
        .or_else(|| non_empty(env(ENV_TABLE)))
        .unwrap_or_else(|| DEFAULT_TABLE.to_string());

    let goal_hours = match root.goal.hours {
        Some(hours) => hours,
        None => match non_empty(env(ENV_GOAL_HOURS)) {
            Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                StudyLogError::config(format!("{} is not a number: {}", ENV_GOAL_HOURS, e))
            })?,
            None => DEFAULT_GOAL_HOURS,
        },
    };
    if !(goal_hours.is_finite() && goal_hours > 0.0) {
        return Err(StudyLogError::config(format!(
            "goal hours must be a positive number, got {}",
            goal_hours
        )));
    }

    Ok(StudyLogConfig {
        remote: RemoteConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            table,
            timeout_secs: root.remote.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        },
        goal_hours,
        remove_policy: root.reconciler.remove_policy,
    })
}
