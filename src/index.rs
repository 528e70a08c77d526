//! Word position indexing and context queries.
//!
//! - [`config`]: build-time configuration and its floors
//! - [`context`]: context sizes and boundary-clamped read windows
//! - [`entry`]: per-word position lists
//! - [`indexer`]: the table builder
//! - [`word_index`]: the queryable index

pub mod config;
pub mod context;
pub mod entry;
pub mod indexer;
pub mod word_index;
