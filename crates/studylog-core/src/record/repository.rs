//! Record repository trait.
//!
//! Defines the four calls the remote record store offers.

use super::model::{RecordId, RemoteRecord};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract remote store of study records.
///
/// Every failure is reported as `StudyLogError::Remote`. Implementations do
/// not retry and do not normalize rows; the caller decides what an absent
/// duration means.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetches every stored record, in the store's order.
    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>>;

    /// Inserts a new record and returns the row the store created,
    /// including its generated id.
    async fn insert(&self, title: &str, duration: f64) -> Result<RemoteRecord>;

    /// Overwrites title and duration of the record keyed by `id`.
    ///
    /// # Returns
    ///
    /// - `Ok(RemoteRecord)`: the row as stored after the update
    /// - `Err(_)`: the call failed or no row matched `id`
    async fn update(&self, id: &RecordId, title: &str, duration: f64) -> Result<RemoteRecord>;

    /// Deletes the record keyed by `id`.
    async fn delete(&self, id: &RecordId) -> Result<()>;
}
