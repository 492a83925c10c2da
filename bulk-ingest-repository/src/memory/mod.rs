//! In-memory implementation of the document index.
//!
//! Used as the default backend for local runs and as a real collaborator in
//! tests. Commits can be made to fail on purpose to exercise partial-failure
//! handling.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::batch::DocumentBatch;
use crate::errors::IndexError;
use crate::interfaces::{DocumentIndex, IndexBatch};

/// Index holding documents in a sorted map guarded by an async lock.
pub struct MemoryIndex {
    name: String,
    documents: RwLock<BTreeMap<String, Value>>,
    commit_attempts: AtomicUsize,
    commit_sizes: Mutex<Vec<usize>>,
    failing_commits: HashSet<usize>,
}

impl MemoryIndex {
    /// Create an empty index.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: RwLock::new(BTreeMap::new()),
            commit_attempts: AtomicUsize::new(0),
            commit_sizes: Mutex::new(Vec::new()),
            failing_commits: HashSet::new(),
        }
    }

    /// Make the given commit attempts fail (1-based, counted across the
    /// lifetime of the index). A failing commit applies nothing.
    pub fn with_failing_commits(mut self, attempts: impl IntoIterator<Item = usize>) -> Self {
        self.failing_commits = attempts.into_iter().collect();
        self
    }

    /// Fetch a committed document.
    pub async fn get(&self, id: &str) -> Option<Value> {
        self.documents.read().await.get(id).cloned()
    }

    /// Identifiers of all committed documents, sorted.
    pub async fn ids(&self) -> Vec<String> {
        self.documents.read().await.keys().cloned().collect()
    }

    /// Number of commit attempts so far, failed ones included.
    pub fn commit_attempts(&self) -> usize {
        self.commit_attempts.load(Ordering::SeqCst)
    }

    /// Number of staged documents handed to each commit attempt, in order.
    pub async fn commit_sizes(&self) -> Vec<usize> {
        self.commit_sizes.lock().await.clone()
    }
}

#[async_trait]
impl DocumentIndex for MemoryIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_batch(&self) -> Box<dyn IndexBatch> {
        Box::new(DocumentBatch::new())
    }

    async fn commit(&self, batch: Box<dyn IndexBatch>) -> Result<(), IndexError> {
        let attempt = self.commit_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let staged = batch.into_documents();
        self.commit_sizes.lock().await.push(staged.len());

        if self.failing_commits.contains(&attempt) {
            warn!(index = %self.name, attempt, "Rejecting commit");
            return Err(IndexError::commit(format!(
                "commit {} rejected by index '{}'",
                attempt, self.name
            )));
        }

        let count = staged.len();
        let mut documents = self.documents.write().await;
        for doc in staged {
            documents.insert(doc.id, doc.document);
        }

        debug!(index = %self.name, attempt, count, "Batch committed");
        Ok(())
    }

    async fn document_count(&self) -> Result<usize, IndexError> {
        Ok(self.documents.read().await.len())
    }
}
