//! # Bulk Ingest Repository
//!
//! This crate provides the narrow contract the ingestion pipeline uses to talk
//! to a search index: allocate a staging batch, stage documents into it, and
//! commit it as a unit. It includes the error types, an in-memory index, an
//! OpenSearch-backed index, and a registry for looking indexes up by name.

pub mod batch;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod registry;

pub use batch::{DocumentBatch, StagedDocument};
pub use errors::IndexError;
pub use interfaces::{DocumentIndex, IndexBatch};
pub use memory::MemoryIndex;
pub use opensearch::{IndexConfig, OpenSearchIndex};
pub use registry::IndexRegistry;
