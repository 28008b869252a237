pub mod config;
pub mod error;
pub mod record;

// Re-export common error type
pub use error::StudyLogError;
