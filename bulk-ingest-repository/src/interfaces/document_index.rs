//! Document index trait definitions.
//!
//! This module defines the abstract interface the ingestion pipeline uses to
//! stage and commit documents, allowing for different backend implementations
//! (in-memory, OpenSearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::batch::StagedDocument;
use crate::errors::IndexError;

/// A staging buffer of document additions, committed to its index as a unit.
///
/// A batch is owned by exactly one ingestion pass. It is never reused after
/// being handed to [`DocumentIndex::commit`].
pub trait IndexBatch: Send {
    /// Stage one document under the given identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was staged
    /// * `Err(IndexError::InvalidDocument)` - If the index rejects the document;
    ///   nothing is staged in that case
    fn add(&mut self, id: &str, document: Value) -> Result<(), IndexError>;

    /// Number of staged documents.
    fn len(&self) -> usize;

    /// Whether nothing has been staged.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the staged documents in staging order.
    fn into_documents(self: Box<Self>) -> Vec<StagedDocument>;
}

/// Abstracts the underlying index implementation (in-memory, OpenSearch, etc.).
///
/// Implementations are shared between concurrent requests behind an `Arc`, so
/// they must be `Send + Sync` and must make `commit` safe under concurrent use.
/// Callers do not coordinate between requests.
///
/// All fallible methods return `Result<T, IndexError>` for consistent error
/// handling across backends.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// The name this index is registered under.
    fn name(&self) -> &str;

    /// Allocate an empty staging batch for this index.
    fn new_batch(&self) -> Box<dyn IndexBatch>;

    /// Apply every staged addition in the batch, reporting the outcome as one unit.
    ///
    /// A document whose identifier already exists is replaced. Committing an
    /// empty batch is a no-op.
    ///
    /// # Arguments
    ///
    /// * `batch` - A batch previously returned by `new_batch` on this index
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every staged document is now indexed
    /// * `Err(IndexError)` - If the commit failed; depending on the backend,
    ///   part of the batch may already be applied
    async fn commit(&self, batch: Box<dyn IndexBatch>) -> Result<(), IndexError>;

    /// Index a single document by staging it into a fresh batch and committing.
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier
    /// * `document` - The document body
    async fn index(&self, id: &str, document: Value) -> Result<(), IndexError> {
        let mut batch = self.new_batch();
        batch.add(id, document)?;
        self.commit(batch).await
    }

    /// Number of documents currently visible in the index.
    async fn document_count(&self) -> Result<usize, IndexError>;

    /// Check if the index backend is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the backend is healthy
    /// * `Ok(false)` - If the backend is reachable but unhealthy
    /// * `Err(IndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, IndexError> {
        Ok(true)
    }
}
