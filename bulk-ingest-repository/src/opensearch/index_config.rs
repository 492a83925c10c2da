//! OpenSearch index configuration and settings.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default name of the target index.
pub const DEFAULT_INDEX_NAME: &str = "documents";

/// Configuration of the OpenSearch index documents are committed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// The index name, also the name the index is registered under.
    pub name: String,
    /// Primary shard count used when the index is created.
    pub number_of_shards: u32,
    /// Replica count used when the index is created.
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INDEX_NAME.to_string(),
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }
}

impl IndexConfig {
    /// Create a config for the named index with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the index creation body.
    ///
    /// Mappings are left dynamic: bulk documents are arbitrary JSON objects.
    pub fn settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            },
            "mappings": {
                "dynamic": true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let config = IndexConfig::new("articles");
        let settings = config.settings();

        assert_eq!(config.name, "articles");
        assert_eq!(settings["settings"]["number_of_shards"], 1);
        assert_eq!(settings["settings"]["number_of_replicas"], 1);
        assert_eq!(settings["mappings"]["dynamic"], true);
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, DEFAULT_INDEX_NAME);
    }
}
