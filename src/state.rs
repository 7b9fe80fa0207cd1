use std::sync::Arc;

use crate::config::Config;
use crate::embeddings;
use crate::store::memory::MemoryStore;
use crate::store::qdrant::QdrantStore;

/// Texts the in-memory index is seeded with at startup.
pub const SEED_CORPUS: &[&str] = &["x_n+1=a * xn * (1-xn)"];

/// Shared application state.
///
/// Construction performs no network I/O: the Qdrant client connects lazily
/// and the memory store starts empty until [`AppState::seed_memory`] runs.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub hosted: Arc<QdrantStore>,
    pub memory: Arc<MemoryStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let hosted = QdrantStore::new(&config.qdrant)?;

        Ok(Self {
            config,
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            hosted: Arc::new(hosted),
            memory: Arc::new(MemoryStore::new()),
        })
    }

    /// Embed the seed corpus and load it into the memory store. Failure is
    /// non-fatal: the store simply stays empty and retrievals against it
    /// return nothing.
    pub async fn seed_memory(&self) {
        let texts: Vec<String> = SEED_CORPUS.iter().map(|t| t.to_string()).collect();
        match embeddings::embed_batch(&self.http_client, &self.config.embedding, &texts).await {
            Ok(embeddings) => {
                for (text, embedding) in texts.iter().zip(embeddings) {
                    self.memory.insert(text, serde_json::Value::Null, embedding);
                }
                tracing::info!("Seeded memory store with {} documents", self.memory.entry_count());
            }
            Err(e) => {
                tracing::warn!("Memory store seeding failed, store stays empty: {e}");
            }
        }
    }
}
