//! Integration tests for the retrieval flow.
//!
//! These exercise resolution and search end to end without a running
//! embedding API or Qdrant instance: the memory store is seeded directly
//! with precomputed vectors, and all configured endpoints are unroutable
//! so any accidental network call would fail loudly.

use serde_json::json;

use doc_retriever::config::Config;
use doc_retriever::models::RetrieveRequest;
use doc_retriever::retriever::{Collection, RetrieveError, StoreHandle, COLLECTIONS};
use doc_retriever::state::AppState;

fn offline_state() -> AppState {
    let mut config = Config::default();
    config.embedding.base_url = "http://203.0.113.1:9".to_string();
    config.qdrant.url = "http://203.0.113.1:6334".to_string();
    AppState::new(config).unwrap()
}

/// Seed the memory store with a tiny corpus of orthogonal-ish vectors.
fn seed(state: &AppState) {
    state.memory.insert(
        "x_n+1=a * xn * (1-xn)",
        json!({"topic": "chaos"}),
        vec![1.0, 0.0, 0.0],
    );
    state.memory.insert(
        "cats sleep sixteen hours a day",
        json!({"topic": "cats"}),
        vec![0.0, 1.0, 0.0],
    );
    state.memory.insert(
        "squirrels cache nuts for winter",
        json!({"topic": "squirrels"}),
        vec![0.0, 0.2, 1.0],
    );
}

#[test]
fn state_construction_performs_no_io() {
    // Unroutable endpoints everywhere: if construction dialed out this
    // would error or hang, per the cheap-to-construct contract.
    let state = offline_state();
    assert_eq!(state.memory.entry_count(), 0);
}

#[test]
fn every_declared_option_resolves() {
    let state = offline_state();
    for collection in COLLECTIONS {
        // Resolution must be a pure lookup for all declared options.
        let _handle = collection.resolve(&state);
    }
}

#[tokio::test]
async fn memory_retrieval_returns_store_ranking_unchanged() {
    let state = offline_state();
    seed(&state);

    let handle = Collection::Scratch.resolve(&state);
    let docs = handle
        .search_vector(vec![0.0, 1.0, 0.1], 2)
        .await
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text, "cats sleep sixteen hours a day");
    assert_eq!(docs[0].metadata, json!({"topic": "cats"}));
    assert_eq!(docs[1].text, "squirrels cache nuts for winter");
    assert!(docs[0].score > docs[1].score);
}

#[tokio::test]
async fn top_k_truncates_the_result() {
    let state = offline_state();
    seed(&state);

    let handle = Collection::Scratch.resolve(&state);
    let docs = handle.search_vector(vec![1.0, 0.0, 0.0], 1).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].text, "x_n+1=a * xn * (1-xn)");
}

#[tokio::test]
async fn repeated_retrievals_share_one_store() {
    let state = offline_state();
    seed(&state);

    let first = Collection::Scratch
        .resolve(&state)
        .search_vector(vec![1.0, 0.0, 0.0], 4)
        .await
        .unwrap();
    let second = Collection::Scratch
        .resolve(&state)
        .search_vector(vec![1.0, 0.0, 0.0], 4)
        .await
        .unwrap();

    // The enum-to-store mapping never mutates across calls.
    assert_eq!(first, second);
    assert_eq!(state.memory.entry_count(), 3);
}

#[test]
fn unknown_collection_fails_before_any_store_access() {
    let state = offline_state();
    let err = "Fancy Retriever".parse::<Collection>().unwrap_err();
    assert!(matches!(err, RetrieveError::UnsupportedCollection(_)));
    // No store was touched along the way.
    assert_eq!(state.memory.entry_count(), 0);
}

#[test]
fn request_without_query_defaults_to_cat() {
    let req: RetrieveRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(req.query, "cat");

    let req: RetrieveRequest =
        serde_json::from_value(json!({"collection_name": "index2"})).unwrap();
    assert_eq!(req.query, "cat");
}

#[test]
fn ingestion_is_an_explicit_stub() {
    let state = offline_state();
    let handle = Collection::Primary.resolve(&state);
    let err = handle.add_texts(&["more text".to_string()]).unwrap_err();
    assert!(matches!(err, RetrieveError::Unsupported("add_texts")));

    let StoreHandle::Hosted(_) = Collection::Primary.resolve(&state) else {
        panic!("primary must bind the hosted store");
    };
}
