//! Environment-driven server settings.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::ServerError;
use bulk_ingest_pipeline::{IngestorConfig, StatusPolicy};
use bulk_ingest_repository::opensearch::DEFAULT_INDEX_NAME;

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8095";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default request body cap (64 MiB).
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Which index implementation backs the served indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Memory,
    OpenSearch,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => write!(f, "memory"),
            Backend::OpenSearch => write!(f, "opensearch"),
        }
    }
}

impl FromStr for Backend {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "opensearch" => Ok(Backend::OpenSearch),
            other => Err(ServerError::config(format!("unknown backend '{}'", other))),
        }
    }
}

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Index targeted when a request names none.
    pub default_index: String,
    /// Additional indexes served next to the default one.
    pub extra_indexes: Vec<String>,
    pub ingestor: IngestorConfig,
    pub backend: Backend,
    pub opensearch_url: String,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8095)),
            default_index: DEFAULT_INDEX_NAME.to_string(),
            extra_indexes: Vec::new(),
            ingestor: IngestorConfig::default(),
            backend: Backend::default(),
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `BULK_LISTEN_ADDR`: listen address (default: 0.0.0.0:8095)
    /// - `BULK_DEFAULT_INDEX`: default target index (default: documents)
    /// - `BULK_EXTRA_INDEXES`: comma-separated additional index names (default: none)
    /// - `BULK_BATCH_SIZE`: documents per committed batch (default: 1000)
    /// - `BULK_STATUS_POLICY`: `always_ok` or `report_partial_failure` (default: always_ok)
    /// - `BULK_BACKEND`: `memory` or `opensearch` (default: memory)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `BULK_MAX_BODY_BYTES`: request body cap in bytes (default: 64 MiB)
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = get("BULK_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::config(format!("invalid BULK_LISTEN_ADDR: {}", e)))?;

        let default_index = get("BULK_DEFAULT_INDEX")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let extra_indexes = get("BULK_EXTRA_INDEXES")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty() && *name != default_index)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let batch_size = match get("BULK_BATCH_SIZE") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|e| ServerError::config(format!("invalid BULK_BATCH_SIZE: {}", e)))?,
            None => IngestorConfig::default().batch_size,
        };

        let status_policy = match get("BULK_STATUS_POLICY") {
            Some(v) => v.parse::<StatusPolicy>()?,
            None => StatusPolicy::default(),
        };

        let ingestor = IngestorConfig::with_batch_size(batch_size).status_policy(status_policy);
        ingestor.validate()?;

        let backend = match get("BULK_BACKEND") {
            Some(v) => v.parse::<Backend>()?,
            None => Backend::default(),
        };

        let opensearch_url = get("OPENSEARCH_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let max_body_bytes = match get("BULK_MAX_BODY_BYTES") {
            Some(v) => v.trim().parse::<usize>().map_err(|e| {
                ServerError::config(format!("invalid BULK_MAX_BODY_BYTES: {}", e))
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            listen_addr,
            default_index,
            extra_indexes,
            ingestor,
            backend,
            opensearch_url,
            max_body_bytes,
        })
    }

    /// All index names this process serves, default first.
    pub fn index_names(&self) -> Vec<String> {
        std::iter::once(self.default_index.clone())
            .chain(self.extra_indexes.iter().cloned())
            .collect()
    }
}
