//! # wordindex
//!
//! An in-memory position index over a text file that answers
//! "word with surrounding context" queries.
//!
//! ## Features
//!
//! - Pluggable word-boundary analyzers
//! - Chunked indexing that never splits a word across reads
//! - Boundary-clamped context windows read straight from the file
//! - Bounded-buffer streaming of results with resumable continuation handles
//! - A single query backend trait for in-process and external implementations
//!
//! ## Example
//!
//! ```no_run
//! use wordindex::prelude::*;
//!
//! # fn main() -> wordindex::error::Result<()> {
//! let index = WordIndex::open("corpus.txt", AnalyzerKind::English)?;
//! let count = index
//!     .iterate_words_with_capacity("god", ContextSize::Small, 64)?
//!     .count();
//! println!("{count} occurrences");
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod index;
pub mod stream;

pub mod prelude {
    pub use crate::analysis::analyzer::{
        Analyzer, AnalyzerKind, EnglishAnalyzer, WhitespaceAnalyzer,
    };
    pub use crate::error::{Result, WordIndexError};
    pub use crate::index::config::IndexConfig;
    pub use crate::index::context::ContextSize;
    pub use crate::index::word_index::{IndexStats, WordIndex};
    pub use crate::stream::iterator::WordContextIterator;
    pub use crate::stream::source::{ContinuationHandle, FrameSource, QueryBackend};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
