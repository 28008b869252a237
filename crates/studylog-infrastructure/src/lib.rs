pub mod config_service;
pub mod dto;
pub mod paths;
pub mod supabase_record_repository;

pub use crate::config_service::ConfigService;
pub use crate::paths::StudyLogPaths;
pub use crate::supabase_record_repository::SupabaseRecordRepository;
