//! SupabaseRecordRepository - PostgREST implementation of `RecordRepository`.
//!
//! Talks to the `rest/v1/{table}` endpoint of a Supabase project using the
//! project's anon key.

use crate::dto::{RecordPayload, RecordRow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use studylog_core::config::RemoteConfig;
use studylog_core::error::{RemoteError, RemoteOperation, Result};
use studylog_core::record::{RecordId, RecordRepository, RemoteRecord};

/// Record repository backed by a Supabase table.
#[derive(Clone)]
pub struct SupabaseRecordRepository {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
    timeout: Duration,
}

/// PostgREST error body.
#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

impl SupabaseRecordRepository {
    /// Creates a repository from resolved remote settings.
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            table: config.table.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Attaches the key headers and the request timeout.
    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .timeout(self.timeout)
    }

    async fn send(&self, operation: RemoteOperation, request: RequestBuilder) -> Result<Response> {
        let response = self
            .auth_request(request)
            .send()
            .await
            .map_err(|err| RemoteError::new(operation, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(operation, status, body_text).into());
        }

        Ok(response)
    }

    async fn read_rows(operation: RemoteOperation, response: Response) -> Result<Vec<RecordRow>> {
        let rows: Vec<RecordRow> = response.json().await.map_err(|err| {
            RemoteError::new(operation, format!("failed to parse response: {err}"))
        })?;
        Ok(rows)
    }

    /// Takes the single row a `return=representation` write should echo.
    fn single_row(operation: RemoteOperation, rows: Vec<RecordRow>) -> Result<RemoteRecord> {
        match rows.into_iter().next() {
            Some(row) => Ok(row.into()),
            None => Err(RemoteError::new(operation, "no row returned").into()),
        }
    }
}

#[async_trait]
impl RecordRepository for SupabaseRecordRepository {
    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>> {
        let operation = RemoteOperation::FetchAll;
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*")]);

        let response = self.send(operation, request).await?;
        let rows = Self::read_rows(operation, response).await?;
        tracing::debug!("[SupabaseRecordRepository] fetched {} rows", rows.len());

        Ok(rows.into_iter().map(RemoteRecord::from).collect())
    }

    async fn insert(&self, title: &str, duration: f64) -> Result<RemoteRecord> {
        let operation = RemoteOperation::Insert;
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&RecordPayload {
                title,
                time: duration,
            });

        let response = self.send(operation, request).await?;
        let rows = Self::read_rows(operation, response).await?;
        Self::single_row(operation, rows)
    }

    async fn update(&self, id: &RecordId, title: &str, duration: f64) -> Result<RemoteRecord> {
        let operation = RemoteOperation::Update;
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", id_filter(id))])
            .header("Prefer", "return=representation")
            .json(&RecordPayload {
                title,
                time: duration,
            });

        let response = self.send(operation, request).await?;
        let rows = Self::read_rows(operation, response).await?;
        Self::single_row(operation, rows)
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        let operation = RemoteOperation::Delete;
        let request = self
            .client
            .delete(self.table_url())
            .query(&[("id", id_filter(id))]);

        self.send(operation, request).await?;
        tracing::debug!("[SupabaseRecordRepository] deleted {}", id);
        Ok(())
    }
}

fn id_filter(id: &RecordId) -> String {
    format!("eq.{}", id)
}

fn map_http_error(operation: RemoteOperation, status: StatusCode, body: String) -> RemoteError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.message)
        .unwrap_or(body);

    RemoteError::new(operation, message).with_status(status.as_u16())
}
