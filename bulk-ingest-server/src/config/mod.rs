//! Configuration and dependency wiring for the bulk ingest server.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{Backend, ServerConfig};
