use axum::Json;
use serde_json::{json, Value};

use crate::models::CollectionInfo;
use crate::retriever::COLLECTIONS;

/// GET /health - Fixed liveness payload; never consults the stores.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

/// GET /jp - Vestigial example endpoint, kept for parity with the demo.
pub async fn jp() -> Json<Value> {
    Json(json!({"JP": "is a squirrel", "status": "casse noisette"}))
}

/// GET /collections - The declared collection options, in order.
pub async fn collections() -> Json<Vec<CollectionInfo>> {
    Json(
        COLLECTIONS
            .iter()
            .map(|c| CollectionInfo {
                id: c.as_str().to_string(),
                label: c.label().to_string(),
            })
            .collect(),
    )
}
