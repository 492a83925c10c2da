//! Interface definitions for the index collaborator.
//!
//! This module defines the abstract `DocumentIndex` and `IndexBatch` traits
//! that allow for dependency injection and swappable index backends.

mod document_index;

pub use document_index::{DocumentIndex, IndexBatch};
