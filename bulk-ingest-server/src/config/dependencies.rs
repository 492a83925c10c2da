//! Dependency initialization and wiring for the bulk ingest server.

use std::sync::Arc;
use tracing::info;

use crate::config::{Backend, ServerConfig};
use crate::ServerError;
use bulk_ingest_pipeline::{BatchIngestor, BulkIndexHandler, PathParamResolver};
use bulk_ingest_repository::{
    DocumentIndex, IndexConfig, IndexRegistry, MemoryIndex, OpenSearchIndex,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Registry holding every served index.
    pub registry: Arc<IndexRegistry>,
    /// The request handler ready to serve.
    pub handler: Arc<BulkIndexHandler>,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// With the OpenSearch backend the cluster must be reachable and healthy;
    /// each served index is created if it does not exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServerError)` - If initialization fails
    pub async fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        info!(
            backend = %config.backend,
            default_index = %config.default_index,
            batch_size = config.ingestor.batch_size,
            status_policy = %config.ingestor.status_policy,
            "Initializing dependencies"
        );

        let registry = Arc::new(IndexRegistry::new());

        for name in config.index_names() {
            let index: Arc<dyn DocumentIndex> = match config.backend {
                Backend::Memory => Arc::new(MemoryIndex::new(name)),
                Backend::OpenSearch => Arc::new(open_search_index(config, name).await?),
            };
            registry.register(index);
        }

        let ingestor = BatchIngestor::with_config(config.ingestor.clone())?;

        let handler = BulkIndexHandler::new(config.default_index.clone(), registry.clone(), ingestor)
            .with_resolver(Arc::new(PathParamResolver::default()));

        Ok(Self {
            registry,
            handler: Arc::new(handler),
        })
    }
}

async fn open_search_index(config: &ServerConfig, name: String) -> Result<OpenSearchIndex, ServerError> {
    let index = OpenSearchIndex::new(&config.opensearch_url, IndexConfig::new(name))
        .await
        .map_err(|e| ServerError::config(format!("Failed to create OpenSearch client: {}", e)))?;

    let healthy = index
        .health_check()
        .await
        .map_err(|e| ServerError::config(format!("OpenSearch health check failed: {}", e)))?;

    if !healthy {
        return Err(ServerError::config("OpenSearch cluster is unhealthy"));
    }

    index.ensure_index_exists().await?;

    info!(index = %index.name(), "OpenSearch index ready");

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulk_ingest_pipeline::IngestRequest;

    #[tokio::test]
    async fn test_memory_backend_registers_all_indexes() {
        let config = ServerConfig {
            extra_indexes: vec!["logs".to_string()],
            ..ServerConfig::default()
        };

        let deps = Dependencies::new(&config).await.unwrap();

        assert_eq!(deps.registry.names(), vec!["documents", "logs"]);
        assert_eq!(deps.handler.default_index(), "documents");
    }

    #[tokio::test]
    async fn test_handler_resolves_path_param() {
        let config = ServerConfig {
            extra_indexes: vec!["logs".to_string()],
            ..ServerConfig::default()
        };
        let deps = Dependencies::new(&config).await.unwrap();

        let request = IngestRequest::new(r#"[{"msg": "hi"}]"#).with_param("index", "logs");
        deps.handler.handle(request).await.unwrap();

        let logs = deps.registry.get("logs").unwrap();
        assert_eq!(logs.document_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_opensearch_fails() {
        let config = ServerConfig {
            backend: Backend::OpenSearch,
            opensearch_url: "not a url".to_string(),
            ..ServerConfig::default()
        };

        let result = Dependencies::new(&config).await;

        assert!(matches!(result, Err(ServerError::ConfigError(_))));
    }
}
