//! Error types for the bulk ingest pipeline.
//!
//! Failures inside an ingestion pass are never raised as errors; they are
//! recorded in the `IngestionResult`. The types here cover what happens
//! before a pass starts.

use thiserror::Error;

/// Errors raised while configuring the ingestor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// A configuration value is out of range or unparsable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IngestError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Errors raised while decoding a request body into documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("error parsing request body as JSON: {0}")]
    InvalidJson(String),

    /// The body is JSON but neither an object nor an array.
    #[error("request body must be a JSON object or array, got {0}")]
    UnsupportedShape(&'static str),
}

/// Errors surfaced by the request layer before the ingestor runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No index is registered under the resolved name.
    #[error("no such index '{0}'")]
    IndexNotFound(String),

    /// The request body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
