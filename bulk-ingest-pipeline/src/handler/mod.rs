//! Handler module for the bulk ingest pipeline.
//!
//! Coordinates target resolution, index lookup, decoding, and ingestion for
//! one bulk request.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::decoder::decode_documents;
use crate::errors::RequestError;
use crate::ingestor::BatchIngestor;
use bulk_ingest_repository::IndexRegistry;
use bulk_ingest_shared::IngestionResult;

/// Transport-independent view of a bulk request.
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    /// Named values captured from the request (path segments, query string).
    pub params: HashMap<String, String>,
    /// The raw request body.
    pub body: Vec<u8>,
}

impl IngestRequest {
    /// Create a request with a body and no captured values.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            params: HashMap::new(),
            body: body.into(),
        }
    }

    /// Attach a captured value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look a captured value up.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Strategy picking the target index name from a request.
///
/// Returning `None` (or an empty name) selects the handler's default index.
pub trait TargetResolver: Send + Sync {
    fn resolve(&self, request: &IngestRequest) -> Option<String>;
}

impl<F> TargetResolver for F
where
    F: Fn(&IngestRequest) -> Option<String> + Send + Sync,
{
    fn resolve(&self, request: &IngestRequest) -> Option<String> {
        self(request)
    }
}

/// Resolves the target from one captured request value.
#[derive(Debug, Clone)]
pub struct PathParamResolver {
    param: String,
}

impl PathParamResolver {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }
}

impl Default for PathParamResolver {
    fn default() -> Self {
        Self::new("index")
    }
}

impl TargetResolver for PathParamResolver {
    fn resolve(&self, request: &IngestRequest) -> Option<String> {
        request.param(&self.param).map(str::to_string)
    }
}

/// Request-level entry point for bulk ingestion.
///
/// The handler:
/// - Resolves the target index name, falling back to the default
/// - Looks the index up before reading the body
/// - Decodes the body, rejecting it without touching the index on failure
/// - Runs one ingestion pass and returns its result
pub struct BulkIndexHandler {
    default_index: String,
    resolver: Option<Arc<dyn TargetResolver>>,
    registry: Arc<IndexRegistry>,
    ingestor: BatchIngestor,
}

impl BulkIndexHandler {
    /// Create a handler that always targets `default_index`.
    pub fn new(
        default_index: impl Into<String>,
        registry: Arc<IndexRegistry>,
        ingestor: BatchIngestor,
    ) -> Self {
        Self {
            default_index: default_index.into(),
            resolver: None,
            registry,
            ingestor,
        }
    }

    /// Install a target resolution strategy.
    pub fn with_resolver(mut self, resolver: Arc<dyn TargetResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The index name used when the resolver yields nothing.
    pub fn default_index(&self) -> &str {
        &self.default_index
    }

    /// The registry targets are looked up in.
    pub fn registry(&self) -> &Arc<IndexRegistry> {
        &self.registry
    }

    /// Pick the target index name for a request.
    pub fn resolve_index_name(&self, request: &IngestRequest) -> String {
        self.resolver
            .as_ref()
            .and_then(|resolver| resolver.resolve(request))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.default_index.clone())
    }

    /// Handle one bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(IngestionResult)` - The pass ran; inspect `errors` for partial failure
    /// * `Err(RequestError::IndexNotFound)` - No index under the resolved name
    /// * `Err(RequestError::Decode)` - The body is not a document collection
    #[instrument(skip(self, request), fields(body_len = request.body.len()))]
    pub async fn handle(&self, request: IngestRequest) -> Result<IngestionResult, RequestError> {
        let index_name = self.resolve_index_name(&request);

        let index = self.registry.get(&index_name).ok_or_else(|| {
            warn!(index = %index_name, "Unknown target index");
            RequestError::IndexNotFound(index_name.clone())
        })?;

        let source = decode_documents(&request.body).map_err(|e| {
            warn!(index = %index_name, error = %e, "Rejecting bulk request body");
            e
        })?;

        info!(index = %index_name, documents = source.len(), "Starting bulk ingestion");

        Ok(self.ingestor.ingest(source, index.as_ref()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestorConfig;
    use crate::errors::DecodeError;
    use bulk_ingest_repository::{DocumentIndex, MemoryIndex};
    use bulk_ingest_shared::IngestionStatus;

    fn setup() -> (Arc<MemoryIndex>, BulkIndexHandler) {
        let registry = Arc::new(IndexRegistry::new());
        let docs = Arc::new(MemoryIndex::new("docs"));
        registry.register(docs.clone());
        registry.register(Arc::new(MemoryIndex::new("other")));

        let handler = BulkIndexHandler::new("docs", registry, BatchIngestor::new())
            .with_resolver(Arc::new(PathParamResolver::default()));
        (docs, handler)
    }

    #[tokio::test]
    async fn test_handle_default_index() {
        let (docs, handler) = setup();

        let result = handler
            .handle(IngestRequest::new(r#"{"a": {"x": 1}, "b": {"x": 2}}"#))
            .await
            .unwrap();

        assert_eq!(result.status, IngestionStatus::Ok);
        assert!(result.errors.is_empty());
        assert_eq!(docs.ids().await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_handle_resolved_index() {
        let (docs, handler) = setup();

        let request = IngestRequest::new(r#"[{"x": 1}]"#).with_param("index", "other");
        handler.handle(request).await.unwrap();

        let other = handler.registry().get("other").unwrap();
        assert_eq!(other.document_count().await.unwrap(), 1);
        assert_eq!(docs.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_handle_unknown_index() {
        let (_, handler) = setup();

        let request = IngestRequest::new("{}").with_param("index", "missing");
        let result = handler.handle(request).await;

        assert_eq!(
            result.unwrap_err(),
            RequestError::IndexNotFound("missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_index_checked_before_decoding() {
        let (_, handler) = setup();

        let request = IngestRequest::new("not json").with_param("index", "missing");
        let result = handler.handle(request).await;

        assert!(matches!(result, Err(RequestError::IndexNotFound(_))));
    }

    #[tokio::test]
    async fn test_decode_failure_skips_ingestion() {
        let (docs, handler) = setup();

        let result = handler.handle(IngestRequest::new(r#"{"a": "#)).await;

        assert!(matches!(
            result,
            Err(RequestError::Decode(DecodeError::InvalidJson(_)))
        ));
        assert_eq!(docs.commit_attempts(), 0);
    }

    #[tokio::test]
    async fn test_closure_resolver_and_empty_name_fallback() {
        let registry = Arc::new(IndexRegistry::new());
        let docs = Arc::new(MemoryIndex::new("docs"));
        registry.register(docs.clone());
        let ingestor = BatchIngestor::with_config(IngestorConfig::with_batch_size(1)).unwrap();
        let handler = BulkIndexHandler::new("docs", registry, ingestor)
            .with_resolver(Arc::new(|_: &IngestRequest| Some(String::new())));

        let request = IngestRequest::new(r#"[{"x": 1}, {"x": 2}]"#);
        assert_eq!(handler.resolve_index_name(&request), "docs");

        let result = handler.handle(request).await.unwrap();

        assert_eq!(result.batches, 3);
        assert_eq!(docs.commit_sizes().await, vec![1, 1, 0]);
    }

    #[test]
    fn test_resolver_absent_uses_default() {
        let handler = BulkIndexHandler::new(
            "docs",
            Arc::new(IndexRegistry::new()),
            BatchIngestor::new(),
        );
        let request = IngestRequest::new("{}").with_param("index", "other");

        assert_eq!(handler.resolve_index_name(&request), "docs");
        assert_eq!(handler.default_index(), "docs");
    }
}
