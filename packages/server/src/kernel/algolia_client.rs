use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{BaseSearchIndex, SearchIndexError};

/// Algolia client for partial document updates.
///
/// Only the write path the mutation engine needs is implemented; querying and
/// ranking stay on the index side.
pub struct AlgoliaClient {
    app_id: String,
    api_key: String,
    index: String,
    client: reqwest::Client,
}

impl AlgoliaClient {
    /// Create a new Algolia client
    pub fn new(app_id: String, api_key: String, index: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            app_id,
            api_key,
            index,
            client,
        })
    }

    fn partial_update_url(&self, object_id: i32) -> String {
        format!(
            "https://{}.algolia.net/1/indexes/{}/{}/partial",
            self.app_id, self.index, object_id
        )
    }
}

#[async_trait]
impl BaseSearchIndex for AlgoliaClient {
    async fn partial_update(
        &self,
        object_id: i32,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .post(self.partial_update_url(object_id))
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(fields)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SearchIndexError::Unreachable(e.to_string())
                } else {
                    SearchIndexError::Service(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::Service(format!(
                "Algolia API error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// No-op index for environments without Algolia credentials.
pub struct NoopSearchIndex;

#[async_trait]
impl BaseSearchIndex for NoopSearchIndex {
    async fn partial_update(
        &self,
        object_id: i32,
        _fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError> {
        tracing::warn!(
            object_id = object_id,
            "NoopSearchIndex: partial_update called but no Algolia credentials configured"
        );
        Ok(())
    }
}
