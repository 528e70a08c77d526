//! Index configuration.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::error::Result;

/// The word table starts with room for at least this many unique words.
pub const MIN_WORD_CAPACITY_ESTIMATE: usize = 64;

/// Smallest read buffer used while indexing a file.
pub const MIN_INDEXING_BUFFER_SIZE: usize = 4096;

/// Default capacity of the scratch buffer used by streaming queries.
pub const DEFAULT_QUERY_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for building a [`WordIndex`](super::word_index::WordIndex).
///
/// # Examples
///
/// ```
/// use wordindex::analysis::analyzer::AnalyzerKind;
/// use wordindex::index::config::IndexConfig;
///
/// let config = IndexConfig::default()
///     .with_analyzer(AnalyzerKind::Whitespace)
///     .with_compact(true);
/// assert!(config.compact);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Analyzer used for indexing and for normalizing query words.
    pub analyzer: AnalyzerKind,

    /// Estimate of how many unique words the file contains.
    pub capacity_hint: usize,

    /// Size of the read buffer used while indexing.
    pub indexing_chunk_size: usize,

    /// Capacity of the scratch buffer used by `iterate_words`.
    pub query_buffer_size: usize,

    /// Shrink position lists to fit once indexing is done.
    pub compact: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            analyzer: AnalyzerKind::English,
            capacity_hint: 4096,
            indexing_chunk_size: 64 * 1024,
            query_buffer_size: DEFAULT_QUERY_BUFFER_SIZE,
            compact: false,
        }
    }
}

impl IndexConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the analyzer.
    pub fn with_analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Set the unique word estimate.
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Set the indexing read buffer size.
    pub fn with_indexing_chunk_size(mut self, size: usize) -> Self {
        self.indexing_chunk_size = size;
        self
    }

    /// Set the streaming query buffer capacity.
    pub fn with_query_buffer_size(mut self, size: usize) -> Self {
        self.query_buffer_size = size;
        self
    }

    /// Enable or disable compaction.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Raise the capacity hint and chunk size to their floors.
    ///
    /// The query buffer size is left alone; undersized query buffers are
    /// rejected when an iterator is created.
    pub(crate) fn clamped(mut self) -> Self {
        if self.capacity_hint < MIN_WORD_CAPACITY_ESTIMATE {
            debug!(
                "capacity hint {} raised to {}",
                self.capacity_hint, MIN_WORD_CAPACITY_ESTIMATE
            );
            self.capacity_hint = MIN_WORD_CAPACITY_ESTIMATE;
        }
        if self.indexing_chunk_size < MIN_INDEXING_BUFFER_SIZE {
            debug!(
                "indexing chunk size {} raised to {}",
                self.indexing_chunk_size, MIN_INDEXING_BUFFER_SIZE
            );
            self.indexing_chunk_size = MIN_INDEXING_BUFFER_SIZE;
        }
        self
    }
}
