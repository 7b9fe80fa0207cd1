//! The one piece of original logic in this server: mapping a collection
//! option to a backing store, and running a retrieval against it.
//!
//! Resolution and search are deliberately split into two phases:
//! [`Collection::resolve`] is a pure lookup that clones an `Arc` and may run
//! once per request without cost, while [`StoreHandle::search`] is the only
//! place network I/O happens (query embedding plus the store call).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::embeddings;
use crate::models::RetrievedDocument;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::qdrant::QdrantStore;

/// Errors surfaced by the retrieval operation.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// Requested collection name is outside the declared set.
    #[error("unsupported collection: {0}")]
    UnsupportedCollection(String),

    /// Operation declared but intentionally not supported by this demo.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),

    /// Embedding provider failure, passed through unchanged.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    /// Backing store failure, passed through unchanged.
    #[error("store query failed: {0}")]
    Store(#[source] anyhow::Error),
}

/// The closed set of collections this server can retrieve from.
///
/// The set is fixed at compile time; the only open boundary is parsing an
/// incoming string, which fails explicitly for unknown names instead of
/// falling back to a default store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Collection {
    /// The hosted Qdrant index ("Basic Retriever" in the UI).
    #[default]
    Primary,
    /// The in-memory index seeded at startup ("Index 2" in the UI).
    Scratch,
}

/// All declared options, in presentation order.
pub const COLLECTIONS: [Collection; 2] = [Collection::Primary, Collection::Scratch];

impl Collection {
    /// Stable identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Primary => "index1",
            Collection::Scratch => "index2",
        }
    }

    /// Human-readable label for option listings.
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Primary => "Basic Retriever",
            Collection::Scratch => "Index 2",
        }
    }

    /// Resolve this option to a store handle. Pure lookup: clones an `Arc`,
    /// touches no network.
    pub fn resolve(&self, state: &AppState) -> StoreHandle {
        match self {
            Collection::Primary => StoreHandle::Hosted(state.hosted.clone()),
            Collection::Scratch => StoreHandle::Memory(state.memory.clone()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = RetrieveError;

    /// Accepts both the wire identifier and the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index1" | "Basic Retriever" => Ok(Collection::Primary),
            "index2" | "Index 2" => Ok(Collection::Scratch),
            other => Err(RetrieveError::UnsupportedCollection(other.to_string())),
        }
    }
}

impl TryFrom<String> for Collection {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|e: RetrieveError| e.to_string())
    }
}

impl From<Collection> for String {
    fn from(c: Collection) -> Self {
        c.as_str().to_string()
    }
}

/// A retrieval-capable handle bound to exactly one backing store.
#[derive(Clone)]
pub enum StoreHandle {
    Hosted(Arc<QdrantStore>),
    Memory(Arc<MemoryStore>),
}

impl StoreHandle {
    /// Embed the query and run a nearest-neighbor search against the bound
    /// store. Ordering and length of the result are whatever the store
    /// returns; nothing is re-ranked or filtered here.
    pub async fn search(
        &self,
        client: &reqwest::Client,
        config: &Config,
        query: &str,
    ) -> Result<Vec<RetrievedDocument>, RetrieveError> {
        let query_embedding = embeddings::embed_single(client, &config.embedding, query)
            .await
            .map_err(RetrieveError::Embedding)?;
        self.search_vector(query_embedding, config.top_k).await
    }

    /// Search with an already-computed query embedding.
    pub async fn search_vector(
        &self,
        query_embedding: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrieveError> {
        match self {
            StoreHandle::Hosted(store) => store
                .search(query_embedding, top_k)
                .await
                .map_err(RetrieveError::Store),
            StoreHandle::Memory(store) => Ok(store.search(&query_embedding, top_k)),
        }
    }

    /// Ingestion is not part of this demo; both stores are populated
    /// elsewhere (Qdrant out of band, memory at startup).
    pub fn add_texts(&self, _texts: &[String]) -> Result<Vec<String>, RetrieveError> {
        Err(RetrieveError::Unsupported("add_texts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_state() -> AppState {
        // Unroutable endpoints: anything that touches the network would hang
        // or fail, so these tests double as proof that resolution is I/O-free.
        let mut config = Config::default();
        config.embedding.base_url = "http://203.0.113.1:9".to_string();
        config.qdrant.url = "http://203.0.113.1:6334".to_string();
        AppState::new(config).unwrap()
    }

    #[test]
    fn test_every_option_parses_by_id_and_label() {
        assert_eq!("index1".parse::<Collection>().unwrap(), Collection::Primary);
        assert_eq!(
            "Basic Retriever".parse::<Collection>().unwrap(),
            Collection::Primary
        );
        assert_eq!("index2".parse::<Collection>().unwrap(), Collection::Scratch);
        assert_eq!("Index 2".parse::<Collection>().unwrap(), Collection::Scratch);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "index3".parse::<Collection>().unwrap_err();
        assert!(matches!(err, RetrieveError::UnsupportedCollection(ref s) if s == "index3"));
    }

    #[test]
    fn test_default_is_first_option() {
        assert_eq!(Collection::default(), Collection::Primary);
        assert_eq!(COLLECTIONS[0], Collection::default());
    }

    #[test]
    fn test_serde_rejects_unknown_collection() {
        let err = serde_json::from_str::<Collection>("\"nope\"").unwrap_err();
        assert!(err.to_string().contains("unsupported collection"));
    }

    #[test]
    fn test_resolution_binds_the_matching_store() {
        let state = offline_state();
        assert!(matches!(
            Collection::Primary.resolve(&state),
            StoreHandle::Hosted(_)
        ));
        assert!(matches!(
            Collection::Scratch.resolve(&state),
            StoreHandle::Memory(_)
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let state = offline_state();
        for _ in 0..3 {
            let handle = Collection::Scratch.resolve(&state);
            let StoreHandle::Memory(store) = handle else {
                panic!("expected memory store");
            };
            assert!(Arc::ptr_eq(&store, &state.memory));
        }
    }

    #[tokio::test]
    async fn test_memory_search_is_pass_through() {
        let state = offline_state();
        state
            .memory
            .insert("x_n+1=a * xn * (1-xn)", serde_json::Value::Null, vec![1.0, 0.0]);

        let handle = Collection::Scratch.resolve(&state);
        let docs = handle.search_vector(vec![1.0, 0.0], 4).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "x_n+1=a * xn * (1-xn)");
    }

    #[test]
    fn test_add_texts_is_unsupported_on_both_stores() {
        let state = offline_state();
        for collection in COLLECTIONS {
            let handle = collection.resolve(&state);
            let err = handle.add_texts(&["new doc".to_string()]).unwrap_err();
            assert!(matches!(err, RetrieveError::Unsupported("add_texts")));
        }
        // Nothing was ingested
        assert_eq!(state.memory.entry_count(), 0);
    }
}
