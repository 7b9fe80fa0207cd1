use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::models::{
    BatchRetrieveRequest, BatchRetrieveResponse, RetrieveRequest, RetrieveResponse,
};
use crate::retriever::{Collection, RetrieveError};
use crate::state::AppState;

/// POST /invoke - Run one retrieval against the selected collection:
/// resolve the collection option to a store handle, embed the query,
/// delegate the similarity search, and pass the store's ranking through.
pub async fn invoke(
    State(state): State<AppState>,
    Json(req): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, (StatusCode, String)> {
    let collection = parse_collection(req.collection_name.as_deref())?;
    let handle = collection.resolve(&state);

    let documents = handle
        .search(&state.http_client, &state.config, &req.query)
        .await
        .map_err(into_http)?;

    Ok(Json(RetrieveResponse {
        collection: collection.to_string(),
        documents,
    }))
}

/// POST /batch - Run each input against the same selected collection.
/// Inputs run sequentially; the demo has no batching contract beyond
/// "one output list per input, in order".
pub async fn batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRetrieveRequest>,
) -> Result<Json<BatchRetrieveResponse>, (StatusCode, String)> {
    let collection = parse_collection(req.collection_name.as_deref())?;
    let handle = collection.resolve(&state);

    let mut outputs = Vec::with_capacity(req.inputs.len());
    for input in &req.inputs {
        let docs = handle
            .search(&state.http_client, &state.config, &input.query)
            .await
            .map_err(into_http)?;
        outputs.push(docs);
    }

    Ok(Json(BatchRetrieveResponse {
        collection: collection.to_string(),
        outputs,
    }))
}

fn parse_collection(name: Option<&str>) -> Result<Collection, (StatusCode, String)> {
    match name {
        Some(name) => name.parse().map_err(into_http),
        None => Ok(Collection::default()),
    }
}

fn into_http(err: RetrieveError) -> (StatusCode, String) {
    let status = match err {
        RetrieveError::UnsupportedCollection(_) => StatusCode::BAD_REQUEST,
        RetrieveError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        RetrieveError::Embedding(_) | RetrieveError::Store(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
