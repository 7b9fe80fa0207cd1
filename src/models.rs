use serde::{Deserialize, Serialize};

/// A single retrieved document, as returned by the backing store.
///
/// The metadata is opaque to this server: whatever payload the store holds
/// alongside the text is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Retrieval request body
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveRequest {
    /// Search query
    #[serde(default = "default_query")]
    pub query: String,
    /// Which collection to retrieve from; defaults to the first option.
    #[serde(default)]
    pub collection_name: Option<String>,
}

fn default_query() -> String {
    "cat".to_string()
}

/// Retrieval response
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    pub collection: String,
    pub documents: Vec<RetrievedDocument>,
}

/// Batch retrieval request body
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRetrieveRequest {
    pub inputs: Vec<RetrieveRequest>,
    #[serde(default)]
    pub collection_name: Option<String>,
}

/// Batch retrieval response
#[derive(Debug, Clone, Serialize)]
pub struct BatchRetrieveResponse {
    pub collection: String,
    pub outputs: Vec<Vec<RetrievedDocument>>,
}

/// One entry in the GET /collections listing
#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    pub id: String,
    pub label: String,
}
