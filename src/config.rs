use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Hosted vector store (Qdrant) configuration
    pub qdrant: QdrantConfig,
    /// Number of documents returned per retrieval
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the embedding API
    pub base_url: String,
    /// Model name for embeddings
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// Qdrant endpoint, e.g. "http://localhost:6334"
    pub url: String,
    /// API key for hosted clusters
    pub api_key: Option<String>,
    /// Collection holding the pre-ingested documents
    pub collection: String,
    /// Logical partition within the collection, matched against the
    /// `namespace` payload field. Empty string disables the filter.
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            embedding: EmbeddingConfig::default(),
            qdrant: QdrantConfig::default(),
            top_k: 4,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-ada-002".to_string(),
            api_key: None,
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            collection: "talkwithpdfnew".to_string(),
            namespace: "6".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("RETRIEVER_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.embedding.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.qdrant.url = url;
        }
        if let Ok(key) = std::env::var("QDRANT_API_KEY") {
            config.qdrant.api_key = Some(key);
        }
        if let Ok(name) = std::env::var("QDRANT_COLLECTION") {
            config.qdrant.collection = name;
        }
        if let Ok(ns) = std::env::var("QDRANT_NAMESPACE") {
            config.qdrant.namespace = ns;
        }
        if let Ok(k) = std::env::var("RETRIEVER_TOP_K") {
            if let Ok(k) = k.parse() {
                config.top_k = k;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.top_k, 4);
        assert_eq!(config.embedding.provider, "openai");
        assert_eq!(config.qdrant.collection, "talkwithpdfnew");
        assert_eq!(config.qdrant.namespace, "6");
        assert!(config.qdrant.api_key.is_none());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bind_addr, config.bind_addr);
        assert_eq!(back.qdrant.collection, config.qdrant.collection);
    }
}
