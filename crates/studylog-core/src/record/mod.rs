//! Record domain module.
//!
//! # Module Structure
//!
//! - `model`: `Record`, `RecordId` and the boundary row type `RemoteRecord`
//! - `draft`: user input and its validation rules
//! - `repository`: the remote store contract

mod draft;
mod model;
pub mod repository;

pub use draft::{
    DURATION_NEGATIVE, DURATION_REQUIRED, RecordDraft, TITLE_REQUIRED, ValidDraft,
};
pub use model::{Record, RecordId, RemoteRecord, normalize_duration};
pub use repository::RecordRepository;
