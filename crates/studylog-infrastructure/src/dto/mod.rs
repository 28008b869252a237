//! Data transfer objects for the remote record table.

mod record;

pub use record::{RecordPayload, RecordRow, RowId};
