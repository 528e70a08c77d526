//! Token type emitted by the tokenizers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized word and the byte offset where its raw form starts.
///
/// The offset is relative to the chunk that was tokenized; the indexer adds
/// the chunk's absolute position in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    /// The normalized word (never empty).
    pub word: String,

    /// Byte offset of the raw token within its chunk.
    pub offset: usize,

    /// Byte length of the raw token. Lowercasing can change the byte length
    /// of a character, so this may differ from `word.len()`.
    pub raw_len: usize,
}

impl WordToken {
    /// Create a new token.
    pub fn new<S: Into<String>>(word: S, offset: usize) -> Self {
        let word = word.into();
        WordToken {
            raw_len: word.len(),
            word,
            offset,
        }
    }

    /// Set the byte length of the raw token.
    pub fn with_raw_len(mut self, raw_len: usize) -> Self {
        self.raw_len = raw_len;
        self
    }
}

impl fmt::Display for WordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.word, self.offset)
    }
}
