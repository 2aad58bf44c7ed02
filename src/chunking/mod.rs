//! Text chunking for breaking extracted documents into bounded segments.
//!
//! Splitting prefers paragraph boundaries, then sentence boundaries, then
//! word boundaries, and only hard-cuts when a chunk contains no boundary at
//! all (e.g. one enormous token).

use crate::error::{FortellError, Result};
use serde::{Deserialize, Serialize};

/// A bounded-size segment of document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the original document.
    pub index: usize,
    /// Text content of this chunk.
    pub content: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(index: usize, content: String) -> Self {
        Self { index, content }
    }

    /// Length of this chunk in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether this chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Boundary-aware text splitter.
///
/// Stateless: the same input always produces the same chunks.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chars: usize,
}

/// Fraction of `max_chars` searched backwards for a paragraph or sentence
/// boundary before falling back to a word boundary.
const LOOKBACK_DIVISOR: usize = 5;

impl TextChunker {
    /// Create a chunker with the given maximum chunk size in characters.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Split text into chunks no longer than `max_chars` characters.
    ///
    /// Fails with [`FortellError::InvalidInput`] if the text is empty after
    /// trimming.
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FortellError::InvalidInput(
                "Input text cannot be empty".to_string(),
            ));
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let total = chars.len();
        let lookback = (self.max_chars / LOOKBACK_DIVISOR).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total {
            // Skip whitespace left over from the previous cut
            while start < total && chars[start].is_whitespace() {
                start += 1;
            }
            if start >= total {
                break;
            }

            if total - start <= self.max_chars {
                Self::push_chunk(&mut chunks, &chars[start..total]);
                break;
            }

            let hard_end = start + self.max_chars;
            let window_start = hard_end.saturating_sub(lookback).max(start + 1);

            let cut = find_paragraph_break(&chars, window_start, hard_end)
                .or_else(|| find_sentence_break(&chars, window_start, hard_end))
                .or_else(|| find_word_break(&chars, start + 1, hard_end))
                .unwrap_or(hard_end);

            Self::push_chunk(&mut chunks, &chars[start..cut]);
            start = cut;
        }

        Ok(chunks)
    }

    fn push_chunk(chunks: &mut Vec<Chunk>, slice: &[char]) {
        let content: String = slice.iter().collect::<String>().trim_end().to_string();
        if !content.is_empty() {
            let index = chunks.len();
            chunks.push(Chunk::new(index, content));
        }
    }
}

/// Find the last paragraph break (blank line) in `[from, to)`.
fn find_paragraph_break(chars: &[char], from: usize, to: usize) -> Option<usize> {
    (from..to)
        .rev()
        .find(|&i| chars[i] == '\n' && i + 1 < chars.len() && chars[i + 1] == '\n')
}

/// Find the last sentence end in `[from, to)`, returning the position just
/// after the terminating punctuation.
fn find_sentence_break(chars: &[char], from: usize, to: usize) -> Option<usize> {
    (from..to)
        .rev()
        .find(|&i| {
            matches!(chars[i], '.' | '!' | '?')
                && i + 1 < chars.len()
                && chars[i + 1].is_whitespace()
        })
        .map(|i| i + 1)
}

/// Find the last whitespace in `[from, to)` so a cut never lands inside a word.
fn find_word_break(chars: &[char], from: usize, to: usize) -> Option<usize> {
    (from..to).rev().find(|&i| chars[i].is_whitespace())
}
