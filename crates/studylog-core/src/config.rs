use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE: &str = "study-record";
pub const DEFAULT_GOAL_HOURS: f64 = 1000.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What the reconciler does with a locally removed record when the remote
/// delete fails.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Keep the local removal; the next load resynchronizes.
    #[default]
    Optimistic,
    /// Put the record back where it was.
    RollbackOnFailure,
}

/// Root of `config.toml`.
///
/// Every field is optional in the file; unset values are filled from the
/// environment or defaults by the infrastructure config service.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub goal: GoalSection,
    #[serde(default)]
    pub reconciler: ReconcilerSection,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RemoteSection {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub table: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct GoalSection {
    pub hours: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReconcilerSection {
    #[serde(default)]
    pub remove_policy: RemovePolicy,
}

/// Connection settings for the hosted record table.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
    pub timeout_secs: u64,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyLogConfig {
    pub remote: RemoteConfig,
    pub goal_hours: f64,
    pub remove_policy: RemovePolicy,
}
