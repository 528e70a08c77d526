//! The word position index over a single text file.
//!
//! # Examples
//!
//! ```no_run
//! use wordindex::analysis::analyzer::AnalyzerKind;
//! use wordindex::index::context::ContextSize;
//! use wordindex::index::word_index::WordIndex;
//!
//! # fn main() -> wordindex::error::Result<()> {
//! let mut index = WordIndex::open("bible.txt", AnalyzerKind::English)?;
//!
//! for hit in index.get_words("God", ContextSize::Small)? {
//!     println!("{hit}");
//! }
//!
//! {
//!     let mut iter = index.iterate_words("wrath", ContextSize::Medium)?;
//!     while iter.has_next()? {
//!         println!("{}", iter.next().unwrap()?);
//!     }
//!     iter.close()?;
//! }
//!
//! index.close()?;
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use uuid::Uuid;

use crate::analysis::analyzer::{Analyzer, AnalyzerKind};
use crate::error::{Result, WordIndexError};
use crate::index::config::IndexConfig;
use crate::index::context::{ContextSize, QueryWindow};
use crate::index::indexer::{Indexer, WordTable};
use crate::stream::iterator::WordContextIterator;
use crate::stream::position::PositionStream;
use crate::stream::source::{FrameSource, QueryBackend};

/// Statistics about an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of distinct normalized words.
    pub unique_words: usize,

    /// Number of occurrences across all words.
    pub total_positions: u64,

    /// Bytes scanned while indexing.
    pub file_len: u64,
}

/// Maps normalized words to every byte offset where they occur in a file,
/// and reads context windows around those offsets on demand.
///
/// The table is immutable once built, so a `&WordIndex` can serve queries
/// from several threads; each query opens its own read handle. Iterators
/// borrow the index, which keeps them from outliving [`close`](Self::close).
#[derive(Debug)]
pub struct WordIndex {
    id: Uuid,
    path: PathBuf,
    config: IndexConfig,
    table: WordTable,
    stats: IndexStats,
    closed: bool,
}

impl WordIndex {
    /// Index the file at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P, analyzer: AnalyzerKind) -> Result<Self> {
        Self::open_with(path, IndexConfig::default().with_analyzer(analyzer))
    }

    /// Index the file at `path`.
    ///
    /// Fails with [`WordIndexError::FileNotFound`] if the file does not exist
    /// and with [`WordIndexError::Indexing`] if reading it fails part way.
    pub fn open_with<P: AsRef<Path>>(path: P, config: IndexConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let config = config.clamped();
        let started = Instant::now();

        let file = File::open(&path).map_err(|e| WordIndexError::from_open(&path, e))?;
        let mut indexer = Indexer::new(&config.analyzer, config.capacity_hint);
        let file_len = indexer
            .index_reader(file, config.indexing_chunk_size)
            .map_err(|e| WordIndexError::indexing(&path, e))?;
        let total_positions = indexer.total_positions();
        let table = indexer.finish(config.compact);

        let stats = IndexStats {
            unique_words: table.len(),
            total_positions,
            file_len,
        };
        debug!(
            "indexed {} ({} bytes): {} unique words, {} positions in {:?}",
            path.display(),
            stats.file_len,
            stats.unique_words,
            stats.total_positions,
            started.elapsed()
        );

        Ok(WordIndex {
            id: Uuid::new_v4(),
            path,
            config,
            table,
            stats,
            closed: false,
        })
    }

    /// Unique identifier of this index instance.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Path of the indexed file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The effective configuration, after floors were applied.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The analyzer used for indexing and query normalization.
    pub fn analyzer(&self) -> AnalyzerKind {
        self.config.analyzer
    }

    /// Index statistics.
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Normalize `word` the way it was normalized at index time.
    pub fn normalize(&self, word: &str) -> String {
        self.config.analyzer.normalize(word)
    }

    /// Occurrence offsets of `word`, in file order.
    pub fn positions(&self, word: &str) -> Option<&[u64]> {
        self.table
            .get(&self.normalize(word))
            .map(|entry| entry.positions())
    }

    /// Whether `word` occurs in the file.
    pub fn contains(&self, word: &str) -> bool {
        self.positions(word).is_some()
    }

    /// Read every occurrence of `word` with `context` bytes on each side.
    ///
    /// A word that never occurs yields an empty vector. Returned text keeps
    /// the file's original casing; only the lookup is normalized.
    pub fn get_words(&self, word: &str, context: ContextSize) -> Result<Vec<String>> {
        self.check_open()?;
        let key = self.normalize(word);
        let Some(entry) = self.table.get(&key) else {
            return Ok(Vec::new());
        };

        let mut file = self.open_source()?;
        let mut buf = vec![0u8; QueryWindow::max_len(entry.word_len(), context)];
        let mut results = Vec::with_capacity(entry.positions().len());

        for &offset in entry.positions() {
            let window = QueryWindow::around(offset, entry.word_len(), context);
            let n = window.read_into(&mut file, &mut buf)?;
            if n == 0 {
                debug!("no bytes at offset {offset} of {}", self.path.display());
                continue;
            }
            results.push(String::from_utf8_lossy(&buf[..n]).into_owned());
        }

        Ok(results)
    }

    /// Lazily iterate over every occurrence of `word`, streaming through a
    /// buffer of the configured `query_buffer_size`.
    ///
    /// Fails with [`WordIndexError::FileNotFound`] if the file was removed
    /// after indexing.
    pub fn iterate_words(
        &self,
        word: &str,
        context: ContextSize,
    ) -> Result<WordContextIterator<'_>> {
        self.iterate_words_with_capacity(word, context, self.config.query_buffer_size)
    }

    /// Like [`iterate_words`](Self::iterate_words) with an explicit buffer
    /// capacity.
    ///
    /// Fails with [`WordIndexError::UndersizedBuffer`] if `capacity` cannot
    /// hold one `4 + 2 * context + word length` byte frame.
    pub fn iterate_words_with_capacity(
        &self,
        word: &str,
        context: ContextSize,
        capacity: usize,
    ) -> Result<WordContextIterator<'_>> {
        self.stream_words(word, context, capacity)
    }

    /// Release the word table. Closing twice does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.table = WordTable::default();
        debug!("closed index over {}", self.path.display());
        Ok(())
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(WordIndexError::Closed)
        } else {
            Ok(())
        }
    }

    fn open_source(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| WordIndexError::from_open(&self.path, e))
    }
}

impl QueryBackend for WordIndex {
    fn open_stream(&self, word: &str, context: ContextSize) -> Result<Box<dyn FrameSource + '_>> {
        self.check_open()?;
        let key = self.normalize(word);
        let (positions, word_len) = match self.table.get(&key) {
            Some(entry) => (entry.positions(), entry.word_len()),
            None => (&[][..], key.len()),
        };
        let file = self.open_source()?;
        Ok(Box::new(PositionStream::new(
            file, positions, word_len, context,
        )))
    }

    fn name(&self) -> &'static str {
        "in_process"
    }
}
