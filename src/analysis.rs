//! Text analysis for the word index.
//!
//! This module provides word-boundary analyzers and the two tokenization
//! modes used by the indexer:
//!
//! - **Analyzer**: classifies characters as word boundaries and normalizes words
//! - **Tokenizer**: splits a line, or a fixed-size read buffer, into tokens
//! - **Token**: a normalized word with its byte offset

pub mod analyzer;
pub mod token;
pub mod tokenizer;
