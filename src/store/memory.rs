use parking_lot::RwLock;

use crate::models::RetrievedDocument;

/// A stored vector entry
#[derive(Debug, Clone)]
struct MemoryEntry {
    text: String,
    metadata: serde_json::Value,
    embedding: Vec<f32>,
}

/// In-memory, ephemeral vector store with cosine similarity search.
///
/// Seeded once at startup from a fixed corpus; nothing is persisted and the
/// contents vanish with the process. Cheap to construct: creation allocates
/// an empty entry list and nothing else.
pub struct MemoryStore {
    entries: RwLock<Vec<MemoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Add a document with its precomputed embedding.
    pub fn insert(&self, text: &str, metadata: serde_json::Value, embedding: Vec<f32>) {
        let mut entries = self.entries.write();
        entries.push(MemoryEntry {
            text: text.to_string(),
            metadata,
            embedding,
        });
    }

    /// Search by cosine similarity against a query embedding.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<RetrievedDocument> {
        let entries = self.entries.read();

        let mut scored: Vec<(f32, &MemoryEntry)> = entries
            .iter()
            .map(|e| (cosine_similarity(query_embedding, &e.embedding), e))
            .collect();

        // Sort descending by score
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(score, e)| RetrievedDocument {
                text: e.text.clone(),
                score,
                metadata: e.metadata.clone(),
            })
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
