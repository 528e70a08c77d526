//! Per-word position lists.

use std::fmt;

/// A normalized word and every byte offset where it occurs, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    positions: Vec<u64>,
    word_len: usize,
}

impl WordEntry {
    /// Create an entry with its first occurrence, `raw_len` bytes long in
    /// the file.
    pub fn new<S: Into<String>>(word: S, initial: u64, raw_len: usize) -> Self {
        WordEntry {
            word: word.into(),
            positions: vec![initial],
            word_len: raw_len,
        }
    }

    /// The normalized word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Byte length of the longest occurrence as it appears in the file.
    ///
    /// This can differ from `word().len()` when lowercasing changed the
    /// encoded length of a character.
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Occurrence offsets, non-decreasing.
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    /// Record another occurrence. Offsets arrive in file order.
    pub(crate) fn add_position(&mut self, position: u64, raw_len: usize) {
        debug_assert!(self.positions.last().is_none_or(|&last| last <= position));
        self.positions.push(position);
        self.word_len = self.word_len.max(raw_len);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.positions.shrink_to_fit();
    }

    pub(crate) fn capacity(&self) -> usize {
        self.positions.capacity()
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\" {:?}}}", self.word, self.positions)
    }
}
