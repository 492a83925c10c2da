//! Error types for the bulk ingest repository.

mod index_error;

pub use index_error::IndexError;
