//! OpenSearch implementation of the document index.
//!
//! This module provides a concrete implementation of `DocumentIndex` whose
//! batch commit is a single `_bulk` request.

mod client;
mod index_config;

pub use client::OpenSearchIndex;
pub use index_config::{IndexConfig, DEFAULT_INDEX_NAME};
