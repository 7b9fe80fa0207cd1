//! Thin adapter around `qdrant-client` so the rest of the server never sees
//! the builder API. The collection is pre-populated out of band; this side
//! only searches.

use anyhow::{Context, Result};
use qdrant_client::qdrant::r#match::MatchValue;
use qdrant_client::qdrant::{
    condition::ConditionOneOf, Condition, FieldCondition, Filter, SearchPointsBuilder,
    Value as QValue,
};
use qdrant_client::Qdrant;

use crate::config::QdrantConfig;
use crate::models::RetrievedDocument;

/// Payload key holding the document text.
const TEXT_KEY: &str = "text";
/// Payload key holding the logical partition name.
const NAMESPACE_KEY: &str = "namespace";

/// Handle to one hosted Qdrant collection, scoped to a namespace.
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    namespace: String,
}

impl QdrantStore {
    /// Build the handle. The underlying client opens its channel lazily, so
    /// this performs no network I/O.
    pub fn new(config: &QdrantConfig) -> Result<Self> {
        let mut builder = Qdrant::from_url(&config.url);
        if let Some(key) = &config.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .context("Failed to build Qdrant client")?;

        Ok(Self {
            client,
            collection: config.collection.clone(),
            namespace: config.namespace.clone(),
        })
    }

    /// Nearest-neighbor search, scoped to the configured namespace.
    pub async fn search(
        &self,
        query_vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        tracing::debug!(
            "Qdrant search in '{}' namespace '{}' top_k={top_k}",
            self.collection,
            self.namespace
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, query_vector, top_k as u64)
                .with_payload(true);

        if let Some(filter) = self.namespace_filter() {
            builder = builder.filter(filter);
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .context("Qdrant search failed")?;

        let docs = res
            .result
            .into_iter()
            .map(|point| {
                let mut payload = qpayload_to_json(point.payload);
                let text = payload
                    .as_object_mut()
                    .and_then(|m| m.remove(TEXT_KEY))
                    .and_then(|v| v.as_str().map(|s| s.to_string()))
                    .unwrap_or_default();
                RetrievedDocument {
                    text,
                    score: point.score,
                    metadata: payload,
                }
            })
            .collect();

        Ok(docs)
    }

    fn namespace_filter(&self) -> Option<Filter> {
        if self.namespace.is_empty() {
            return None;
        }
        let condition = Condition {
            condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
                key: NAMESPACE_KEY.to_string(),
                r#match: Some(qdrant_client::qdrant::Match {
                    match_value: Some(MatchValue::Keyword(self.namespace.clone())),
                }),
                ..Default::default()
            })),
        };
        Some(Filter {
            must: vec![condition],
            ..Default::default()
        })
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
/// Nested objects and arrays are mapped to `Null`.
fn qpayload_to_json(mut payload: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in payload.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QdrantConfig;

    #[test]
    fn test_construction_is_offline() {
        // Unroutable endpoint: building the handle must still succeed
        // because the client connects lazily.
        let config = QdrantConfig {
            url: "http://203.0.113.1:6334".to_string(),
            api_key: None,
            collection: "demo".to_string(),
            namespace: "6".to_string(),
        };
        assert!(QdrantStore::new(&config).is_ok());
    }

    #[test]
    fn test_empty_namespace_disables_filter() {
        let config = QdrantConfig {
            namespace: String::new(),
            ..QdrantConfig::default()
        };
        let store = QdrantStore::new(&config).unwrap();
        assert!(store.namespace_filter().is_none());
    }

    #[test]
    fn test_namespace_filter_matches_keyword() {
        let store = QdrantStore::new(&QdrantConfig::default()).unwrap();
        let filter = store.namespace_filter().unwrap();
        assert_eq!(filter.must.len(), 1);
    }
}
