//! # Bulk Ingest Shared
//!
//! Plain data types shared by the bulk ingestion crates: the decoded document
//! collection submitted by a caller and the aggregated outcome of one ingestion
//! pass.

pub mod document;
pub mod result;

pub use document::{DocumentSource, Documents, SourceKind};
pub use result::{FailureTarget, IngestionFailure, IngestionResult, IngestionStatus};
