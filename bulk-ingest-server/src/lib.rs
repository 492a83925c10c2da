//! # Bulk Ingest Server
//!
//! HTTP front end for the bulk ingest pipeline.
//!
//! This crate provides the configuration, dependency wiring, and axum router
//! for serving bulk ingestion requests.

pub mod config;
pub mod errors;
pub mod router;

pub use config::{Backend, Dependencies, ServerConfig};
pub use errors::AppError;
pub use router::build_router;

use thiserror::Error;

/// Errors that can occur during server initialization or execution.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingestor error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] bulk_ingest_pipeline::IngestError),

    /// Index backend error.
    #[error("Index error: {0}")]
    IndexError(#[from] bulk_ingest_repository::IndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
