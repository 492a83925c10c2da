//! Outcome of one bulk ingestion pass.

use serde::{Deserialize, Serialize};

/// Overall status reported for an ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    /// The pass ran to completion.
    Ok,
    /// The pass ran to completion but recorded at least one failure.
    CompletedWithErrors,
}

/// What a recorded failure is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureTarget {
    /// Staging the document with this identifier failed.
    Document(String),
    /// Committing a batch failed.
    Batch {
        /// 1-based ordinal of the batch within the pass.
        ordinal: usize,
        /// 1-based position of the last document counted into the batch.
        /// Equal to the previous boundary for an empty trailing batch.
        last_position: usize,
    },
}

/// A single failure recorded during an ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionFailure {
    #[serde(flatten)]
    pub target: FailureTarget,
    pub message: String,
}

impl IngestionFailure {
    /// A failure attributed to one document.
    pub fn document(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: FailureTarget::Document(id.into()),
            message: message.into(),
        }
    }

    /// A failure attributed to a batch commit.
    pub fn batch(ordinal: usize, last_position: usize, message: impl Into<String>) -> Self {
        Self {
            target: FailureTarget::Batch {
                ordinal,
                last_position,
            },
            message: message.into(),
        }
    }
}

/// Aggregated result of an ingestion pass.
///
/// Failures are listed in the order they occurred. Batches committed before a
/// failure stay committed, so a non-empty `errors` list means the index holds
/// part of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub status: IngestionStatus,
    /// Documents processed, including ones whose staging failed.
    pub documents: usize,
    /// Commit attempts, including the trailing commit.
    pub batches: usize,
    /// Commit attempts that succeeded.
    pub committed_batches: usize,
    #[serde(default)]
    pub errors: Vec<IngestionFailure>,
}

impl IngestionResult {
    /// Whether no failure was recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Identifiers of documents whose staging failed.
    pub fn failed_documents(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|failure| match &failure.target {
                FailureTarget::Document(id) => Some(id.as_str()),
                FailureTarget::Batch { .. } => None,
            })
            .collect()
    }

    /// Ordinals of batches whose commit failed.
    pub fn failed_batches(&self) -> Vec<usize> {
        self.errors
            .iter()
            .filter_map(|failure| match failure.target {
                FailureTarget::Batch { ordinal, .. } => Some(ordinal),
                FailureTarget::Document(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_serialization() {
        let result = IngestionResult {
            status: IngestionStatus::Ok,
            documents: 3,
            batches: 2,
            committed_batches: 1,
            errors: vec![
                IngestionFailure::document("b", "document must be a JSON object"),
                IngestionFailure::batch(2, 3, "storage unavailable"),
            ],
        };

        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["status"], "ok");
        assert_eq!(
            value["errors"][0],
            json!({"document": "b", "message": "document must be a JSON object"})
        );
        assert_eq!(
            value["errors"][1],
            json!({"batch": {"ordinal": 2, "last_position": 3}, "message": "storage unavailable"})
        );
    }

    #[test]
    fn test_status_names() {
        assert_eq!(
            serde_json::to_value(IngestionStatus::CompletedWithErrors).unwrap(),
            "completed_with_errors"
        );
    }

    #[test]
    fn test_failure_accessors() {
        let result = IngestionResult {
            status: IngestionStatus::CompletedWithErrors,
            documents: 2,
            batches: 1,
            committed_batches: 0,
            errors: vec![
                IngestionFailure::document("a", "bad"),
                IngestionFailure::batch(1, 2, "down"),
            ],
        };

        assert!(!result.is_clean());
        assert_eq!(result.failed_documents(), vec!["a"]);
        assert_eq!(result.failed_batches(), vec![1]);
    }
}
