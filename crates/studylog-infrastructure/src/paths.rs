//! Path management for studylog configuration files.

use std::path::PathBuf;
use studylog_core::config::{ConfigRoot, DEFAULT_TABLE, RemoteSection};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path management for studylog.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/studylog/
/// └── config.toml    # remote endpoint, anon key, goal, policies
/// ```
pub struct StudyLogPaths;

impl StudyLogPaths {
    /// Returns the studylog configuration directory (`~/.config/studylog/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("studylog"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Ensures the config file exists, writing a template if it doesn't.
    ///
    /// The file holds the anon key, so on Unix it is created with mode 600.
    pub fn ensure_config_file() -> Result<PathBuf, std::io::Error> {
        let config_path = Self::config_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if config_path.exists() {
            return Ok(config_path);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = ConfigRoot {
            remote: RemoteSection {
                url: Some(String::new()),
                anon_key: Some(String::new()),
                table: Some(DEFAULT_TABLE.to_string()),
                timeout_secs: None,
            },
            ..ConfigRoot::default()
        };
        let template_toml = toml::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&config_path, template_toml)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&config_path, permissions)?;
        }

        Ok(config_path)
    }
}
