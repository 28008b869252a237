use anyhow::{Context, Result};
use studylog_infrastructure::StudyLogPaths;

pub fn run() -> Result<()> {
    let path = StudyLogPaths::ensure_config_file().context("Failed to create config file")?;
    println!("Config file: {}", path.display());
    println!("Fill in remote.url and remote.anon_key, or set STUDYLOG_SUPABASE_URL and STUDYLOG_SUPABASE_ANON_KEY.");
    Ok(())
}
