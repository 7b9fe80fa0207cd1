//! # doc-retriever
//!
//! A demo retrieval server: one configurable retrieval operation whose
//! backing vector store is selected per request from a closed set of
//! options, plus two static health endpoints.
//!
//! ## Architecture
//!
//! ```text
//!   POST /invoke { query, collection_name }
//!               │
//!               ▼
//!   ┌───────────────────────┐
//!   │  Collection (enum)    │  parse: unknown name → 400
//!   └───────────┬───────────┘
//!               │ resolve (pure lookup, no I/O)
//!               ▼
//!   ┌───────────────────────┐
//!   │     StoreHandle       │
//!   └─────┬───────────┬─────┘
//!         │           │
//!         ▼           ▼
//!   ┌──────────┐ ┌──────────┐      ┌────────────────────┐
//!   │  Qdrant  │ │  Memory  │ ◄──── embedding API
//!   │ (hosted) │ │ (seeded) │      │ (Ollama / OpenAI)  │
//!   └──────────┘ └──────────┘      └────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, embedding
//!   provider, and the hosted store
//! - [`models`] - Request/response types with wire-level defaults
//! - [`embeddings`] - Query embedding via Ollama or OpenAI-compatible APIs
//! - [`store`] - The two backends: a Qdrant facade and an in-memory
//!   cosine-similarity index
//! - [`retriever`] - Collection option enum, two-phase resolve/search
//!   contract, and the error taxonomy
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state and startup seeding

pub mod api;
pub mod config;
pub mod embeddings;
pub mod models;
pub mod retriever;
pub mod state;
pub mod store;
