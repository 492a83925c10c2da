//! The stock staging batch shared by the bundled index backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::IndexError;
use crate::interfaces::IndexBatch;

/// A document staged for commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedDocument {
    /// The document identifier.
    pub id: String,
    /// The document body.
    pub document: Value,
}

/// In-memory staging batch.
///
/// Rejects documents with an empty identifier and documents that are not JSON
/// objects, since neither can be mapped to fields.
#[derive(Debug, Default)]
pub struct DocumentBatch {
    staged: Vec<StagedDocument>,
}

impl DocumentBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a document can be staged under `id`.
    pub fn validate(id: &str, document: &Value) -> Result<(), IndexError> {
        if id.is_empty() {
            return Err(IndexError::invalid_document("document ID cannot be empty"));
        }
        if !document.is_object() {
            return Err(IndexError::invalid_document(format!(
                "document '{}' must be a JSON object",
                id
            )));
        }
        Ok(())
    }
}

impl IndexBatch for DocumentBatch {
    fn add(&mut self, id: &str, document: Value) -> Result<(), IndexError> {
        Self::validate(id, &document)?;
        self.staged.push(StagedDocument {
            id: id.to_string(),
            document,
        });
        Ok(())
    }

    fn len(&self) -> usize {
        self.staged.len()
    }

    fn into_documents(self: Box<Self>) -> Vec<StagedDocument> {
        self.staged
    }
}
