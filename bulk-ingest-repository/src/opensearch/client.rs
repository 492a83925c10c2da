//! OpenSearch index implementation.
//!
//! This module provides the concrete implementation of `DocumentIndex`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, CountParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::batch::{DocumentBatch, StagedDocument};
use crate::errors::IndexError;
use crate::interfaces::{DocumentIndex, IndexBatch};
use crate::opensearch::index_config::IndexConfig;

/// OpenSearch-backed document index.
///
/// Each commit is sent as one `_bulk` request, so a batch succeeds or fails
/// as a unit from the caller's point of view.
///
/// # Example
///
/// ```ignore
/// use bulk_ingest_repository::{IndexConfig, OpenSearchIndex};
/// let index = OpenSearchIndex::new("http://localhost:9200", IndexConfig::new("articles")).await?;
/// index.ensure_index_exists().await?;
///
/// let mut batch = index.new_batch();
/// batch.add("1", json!({"title": "Hello"}))?;
/// index.commit(batch).await?;
/// ```
pub struct OpenSearchIndex {
    client: OpenSearch,
    config: IndexConfig,
}

impl OpenSearchIndex {
    /// Create a new OpenSearch index client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - The index name and creation settings
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchIndex)` - A new client instance
    /// * `Err(IndexError)` - If connection setup fails
    pub async fn new(url: &str, config: IndexConfig) -> Result<Self, IndexError> {
        let parsed_url = Url::parse(url).map_err(|e| IndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %config.name, "Created OpenSearch client");

        Ok(Self { client, config })
    }

    /// Ensure the index exists, creating it with the configured settings if not.
    #[instrument(skip(self), fields(index = %self.config.name))]
    pub async fn ensure_index_exists(&self) -> Result<(), IndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.config.name]))
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!("Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.config.name))
            .body(self.config.settings())
            .send()
            .await
            .map_err(|e| IndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(IndexError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!("Index created");
        Ok(())
    }

    /// Build the newline-delimited `_bulk` body: an `index` action line
    /// followed by the document source, per staged document.
    fn bulk_lines(staged: Vec<StagedDocument>) -> Vec<Value> {
        let mut lines = Vec::with_capacity(staged.len() * 2);
        for doc in staged {
            lines.push(json!({"index": {"_id": doc.id}}));
            lines.push(doc.document);
        }
        lines
    }

    /// Summarize item failures reported in a `_bulk` response body.
    fn bulk_failure(response_body: &Value) -> Option<String> {
        if !response_body
            .get("errors")
            .and_then(|e| e.as_bool())
            .unwrap_or(false)
        {
            return None;
        }

        let failed: Vec<String> = response_body
            .get("items")
            .and_then(|i| i.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let action = item.get("index")?;
                        let error = action.get("error")?;
                        let id = action.get("_id").and_then(|v| v.as_str()).unwrap_or("?");
                        let reason = error
                            .get("reason")
                            .and_then(|r| r.as_str())
                            .unwrap_or("unknown reason");
                        Some(format!("{}: {}", id, reason))
                    })
                    .collect()
            })
            .unwrap_or_default();

        match failed.first() {
            Some(first) => Some(format!(
                "{} documents failed, first: {}",
                failed.len(),
                first
            )),
            None => Some("bulk response reported errors".to_string()),
        }
    }
}

#[async_trait]
impl DocumentIndex for OpenSearchIndex {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn new_batch(&self) -> Box<dyn IndexBatch> {
        Box::new(DocumentBatch::new())
    }

    /// Send all staged documents in one `_bulk` request.
    ///
    /// A transport error, a non-success status, or item-level errors in the
    /// response fail the commit. An empty batch sends nothing.
    #[instrument(skip(self, batch), fields(index = %self.config.name, count = batch.len()))]
    async fn commit(&self, batch: Box<dyn IndexBatch>) -> Result<(), IndexError> {
        if batch.is_empty() {
            debug!("Skipping empty batch");
            return Ok(());
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_lines(batch.into_documents())
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.config.name))
            .body(body)
            .send()
            .await
            .map_err(|e| IndexError::commit(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(IndexError::commit(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        if let Some(failure) = Self::bulk_failure(&response_body) {
            error!(failure = %failure, "Bulk request reported item errors");
            return Err(IndexError::commit(failure));
        }

        debug!("Batch committed");
        Ok(())
    }

    async fn document_count(&self) -> Result<usize, IndexError> {
        let response = self
            .client
            .count(CountParts::Index(&[&self.config.name]))
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        body.get("count")
            .and_then(|c| c.as_u64())
            .map(|c| c as usize)
            .ok_or_else(|| IndexError::parse("count response is missing 'count'"))
    }

    async fn health_check(&self) -> Result<bool, IndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_lines() {
        let staged = vec![
            StagedDocument {
                id: "a".to_string(),
                document: json!({"x": 1}),
            },
            StagedDocument {
                id: "b".to_string(),
                document: json!({"x": 2}),
            },
        ];

        let lines = OpenSearchIndex::bulk_lines(staged);

        assert_eq!(
            lines,
            vec![
                json!({"index": {"_id": "a"}}),
                json!({"x": 1}),
                json!({"index": {"_id": "b"}}),
                json!({"x": 2}),
            ]
        );
    }

    #[test]
    fn test_bulk_failure_none_when_clean() {
        let body = json!({"took": 3, "errors": false, "items": []});
        assert!(OpenSearchIndex::bulk_failure(&body).is_none());
    }

    #[test]
    fn test_bulk_failure_reports_items() {
        let body = json!({
            "errors": true,
            "items": [
                {"index": {"_id": "a", "status": 201}},
                {"index": {"_id": "b", "status": 400, "error": {"type": "mapper_parsing_exception", "reason": "failed to parse"}}}
            ]
        });

        let failure = OpenSearchIndex::bulk_failure(&body).unwrap();

        assert_eq!(failure, "1 documents failed, first: b: failed to parse");
    }

    #[test]
    fn test_bulk_failure_without_items() {
        let body = json!({"errors": true});
        assert_eq!(
            OpenSearchIndex::bulk_failure(&body).unwrap(),
            "bulk response reported errors"
        );
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchIndex::new("not a url", IndexConfig::default()).await;
        assert!(matches!(result, Err(IndexError::ConnectionError(_))));
    }
}
