//! Chunk retrieval: selecting the segments most relevant to a query.
//!
//! Scoring is lexical term overlap, which is deterministic and needs no
//! external state or network calls. With no query, retrieval degrades to
//! full-context mode and passes every chunk through in document order.

use crate::chunking::Chunk;
use tracing::debug;

/// A chunk together with its relevance score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Relevance score (higher is better; 1.0 in full-context mode).
    pub score: f32,
}

/// An ordered subset of chunks selected for script generation.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    /// Selected chunks, ordered by descending score (ties by document order).
    pub chunks: Vec<ScoredChunk>,
    /// Whether every chunk was passed through unscored (no query given).
    pub full_context: bool,
}

impl RetrievalResult {
    /// Concatenate the selected chunk contents into a single context text.
    pub fn context_text(&self) -> String {
        self.chunks
            .iter()
            .map(|s| s.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of selected chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Lexical chunk retriever.
#[derive(Debug, Clone, Default)]
pub struct Retriever;

impl Retriever {
    /// Create a new retriever.
    pub fn new() -> Self {
        Self
    }

    /// Select the chunks most relevant to `query`, up to `top_k`.
    ///
    /// An absent or empty query returns all chunks in original order.
    /// Otherwise chunks are scored by query-term overlap and returned in
    /// descending score order, ties broken by ascending document index.
    pub fn retrieve(
        &self,
        chunks: Vec<Chunk>,
        query: Option<&str>,
        top_k: usize,
    ) -> RetrievalResult {
        let query = query.map(str::trim).unwrap_or("");
        if query.is_empty() {
            debug!("No query given, passing through all {} chunks", chunks.len());
            return RetrievalResult {
                chunks: chunks
                    .into_iter()
                    .map(|chunk| ScoredChunk { chunk, score: 1.0 })
                    .collect(),
                full_context: true,
            };
        }

        let query_terms: Vec<String> = tokenize(query);

        let mut scored: Vec<ScoredChunk> = chunks
            .into_iter()
            .map(|chunk| {
                let score = score_chunk(&chunk, &query_terms);
                ScoredChunk { chunk, score }
            })
            .collect();

        // Descending score, ties by ascending document index
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.chunk.index.cmp(&b.chunk.index))
        });
        scored.truncate(top_k);

        debug!("Retrieved {} chunks for query", scored.len());

        RetrievalResult {
            chunks: scored,
            full_context: false,
        }
    }
}

/// Lowercase alphanumeric tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Fraction of chunk tokens that match a query term.
fn score_chunk(chunk: &Chunk, query_terms: &[String]) -> f32 {
    let tokens = tokenize(&chunk.content);
    if tokens.is_empty() {
        return 0.0;
    }

    let matches = tokens
        .iter()
        .filter(|t| query_terms.iter().any(|q| q == *t))
        .count();

    matches as f32 / tokens.len() as f32
}
