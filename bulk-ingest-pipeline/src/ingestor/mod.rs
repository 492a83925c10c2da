//! Ingestor module for the bulk ingest pipeline.
//!
//! Stages documents into bounded-size batches and commits each batch to the
//! target index.

use tracing::{debug, info, instrument, warn};

use crate::config::{IngestorConfig, StatusPolicy};
use crate::errors::IngestError;
use bulk_ingest_repository::{DocumentIndex, IndexBatch};
use bulk_ingest_shared::{DocumentSource, IngestionFailure, IngestionResult, IngestionStatus};

/// Ingestor that commits a document collection to an index in fixed-size batches.
///
/// One call to [`ingest`](BatchIngestor::ingest) is a single sequential pass:
/// - Every document is staged into the current batch, in source order
/// - Every `batch_size`-th document closes the batch, which is committed and
///   replaced by a fresh one
/// - The last batch is always committed after the loop, even when empty
///
/// Staging and commit failures are recorded and the pass carries on. Nothing
/// is rolled back: batches committed before a failure stay committed.
#[derive(Debug, Clone, Default)]
pub struct BatchIngestor {
    config: IngestorConfig,
}

impl BatchIngestor {
    /// Create a new ingestor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ingestor with custom configuration.
    pub fn with_config(config: IngestorConfig) -> Result<Self, IngestError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &IngestorConfig {
        &self.config
    }

    /// Ingest every document of `source` into `index`.
    ///
    /// A document whose staging fails still counts towards the batch
    /// boundary. For positional sources the running count equals the 0-based
    /// position plus one, so both shapes close batches at the same documents.
    #[instrument(
        skip(self, source, index),
        fields(index = %index.name(), kind = %source.kind(), documents = source.len())
    )]
    pub async fn ingest(&self, source: DocumentSource, index: &dyn DocumentIndex) -> IngestionResult {
        let batch_size = self.config.batch_size;
        let mut errors: Vec<IngestionFailure> = Vec::new();
        let mut batch = index.new_batch();
        let mut processed = 0usize;
        let mut batches = 0usize;
        let mut committed_batches = 0usize;

        for (id, doc) in source.into_documents() {
            if let Err(e) = batch.add(&id, doc) {
                warn!(document_id = %id, error = %e, "Failed to stage document");
                errors.push(IngestionFailure::document(id, e.to_string()));
            }

            processed += 1;

            if processed % batch_size == 0 {
                let full = std::mem::replace(&mut batch, index.new_batch());
                batches += 1;
                if Self::commit_batch(index, full, batches, processed, &mut errors).await {
                    committed_batches += 1;
                }
            }
        }

        batches += 1;
        if Self::commit_batch(index, batch, batches, processed, &mut errors).await {
            committed_batches += 1;
        }

        let status = match self.config.status_policy {
            StatusPolicy::AlwaysOk => IngestionStatus::Ok,
            StatusPolicy::ReportPartialFailure if errors.is_empty() => IngestionStatus::Ok,
            StatusPolicy::ReportPartialFailure => IngestionStatus::CompletedWithErrors,
        };

        info!(
            processed,
            batches,
            committed_batches,
            errors = errors.len(),
            "Ingestion pass completed"
        );

        IngestionResult {
            status,
            documents: processed,
            batches,
            committed_batches,
            errors,
        }
    }

    /// Commit one batch, recording a failure against it. Returns whether the
    /// commit succeeded.
    async fn commit_batch(
        index: &dyn DocumentIndex,
        batch: Box<dyn IndexBatch>,
        ordinal: usize,
        last_position: usize,
        errors: &mut Vec<IngestionFailure>,
    ) -> bool {
        let count = batch.len();
        debug!(ordinal, count, "Committing batch");

        match index.commit(batch).await {
            Ok(()) => {
                debug!(ordinal, count, "Batch committed");
                true
            }
            Err(e) => {
                warn!(ordinal, last_position, count, error = %e, "Failed to commit batch");
                errors.push(IngestionFailure::batch(ordinal, last_position, e.to_string()));
                false
            }
        }
    }
}
