//! # Bulk Ingest Pipeline
//!
//! This crate turns a decoded bulk request into a sequence of bounded-size
//! batch commits against an index.
//!
//! ## Architecture
//!
//! 1. **Handler**: Resolves the target index and decodes the request body
//! 2. **Decoder**: Turns a JSON payload into a `DocumentSource`
//! 3. **Ingestor**: Stages documents into batches and commits each batch,
//!    collecting failures without aborting the pass

pub mod config;
pub mod decoder;
pub mod errors;
pub mod handler;
pub mod ingestor;

pub use config::{IngestorConfig, StatusPolicy};
pub use decoder::decode_documents;
pub use errors::{DecodeError, IngestError, RequestError};
pub use handler::{BulkIndexHandler, IngestRequest, PathParamResolver, TargetResolver};
pub use ingestor::BatchIngestor;
