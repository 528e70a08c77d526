//! Tokenizers that turn text chunks into normalized [`WordToken`]s.
//!
//! Two modes are provided:
//!
//! - [`tokenize_line`] - the whole chunk is available, so every word ends at a
//!   boundary character or at the end of the input.
//! - [`BufferedTokens`] - the chunk is a fixed-size read buffer that may stop
//!   in the middle of a word. A trailing partial word is moved to the front of
//!   the buffer so the next read can complete it.
//!
//! # Examples
//!
//! ```
//! use wordindex::analysis::analyzer::EnglishAnalyzer;
//! use wordindex::analysis::tokenizer::tokenize_line;
//!
//! let tokens = tokenize_line("This is; a line.", &EnglishAnalyzer);
//! let words: Vec<_> = tokens.iter().map(|t| t.word.as_str()).collect();
//! assert_eq!(words, ["this", "is", "a", "line"]);
//! ```

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::WordToken;

/// Tokenize a complete chunk of text.
///
/// Offsets are byte offsets into `text`.
pub fn tokenize_line(text: &str, analyzer: &dyn Analyzer) -> Vec<WordToken> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if analyzer.break_at(c) {
            push_token(&mut tokens, analyzer, &text[start..i], i - start, start);
            start = i + c.len_utf8();
        }
    }
    push_token(&mut tokens, analyzer, &text[start..], text.len() - start, start);

    tokens
}

fn push_token(
    tokens: &mut Vec<WordToken>,
    analyzer: &dyn Analyzer,
    raw: &str,
    raw_len: usize,
    offset: usize,
) {
    if raw.is_empty() {
        return;
    }
    let word = analyzer.normalize(raw);
    if !word.is_empty() {
        tokens.push(WordToken::new(word, offset).with_raw_len(raw_len));
    }
}

/// Tokens produced from one fill of a fixed-size read buffer.
#[derive(Debug, Default)]
pub struct BufferedTokens {
    tokens: Vec<WordToken>,
    truncated: usize,
}

impl BufferedTokens {
    /// Tokenize the first `len` bytes of `buffer`.
    ///
    /// The buffer counts as full when `len == buffer.len()`. In that case the
    /// last word is only emitted if the final byte is a boundary; otherwise
    /// its bytes are moved to the start of `buffer` and reported through
    /// [`truncated`](Self::truncated). A buffer that is not full is the end
    /// of the stream, so its last word is always emitted.
    ///
    /// Boundaries are found on decoded characters, the same way
    /// [`tokenize_line`] finds them. A multi-byte character cut off by the
    /// end of the buffer stays with the word being carried over.
    pub fn tokenize(buffer: &mut [u8], len: usize, analyzer: &dyn Analyzer) -> Self {
        let len = len.min(buffer.len());
        let full = len == buffer.len();
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < len {
            let width = utf8_width(buffer[i]);
            if i + width > len {
                break;
            }
            let decoded = std::str::from_utf8(&buffer[i..i + width])
                .ok()
                .and_then(|s| s.chars().next());
            match decoded {
                Some(c) if analyzer.break_at(c) => {
                    push_bytes(&mut tokens, analyzer, &buffer[start..i], start);
                    start = i + width;
                    i += width;
                }
                Some(_) => i += width,
                // Invalid UTF-8 never breaks a word.
                None => i += 1,
            }
        }

        let mut truncated = 0;
        if start < len {
            if full {
                truncated = len - start;
                buffer.copy_within(start..len, 0);
            } else {
                push_bytes(&mut tokens, analyzer, &buffer[start..len], start);
            }
        }

        BufferedTokens { tokens, truncated }
    }

    /// Number of trailing bytes moved to the front of the buffer.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Whether a partial word was carried over.
    pub fn did_truncate(&self) -> bool {
        self.truncated != 0
    }

    /// The complete tokens found in this fill.
    pub fn tokens(&self) -> &[WordToken] {
        &self.tokens
    }
}

impl IntoIterator for BufferedTokens {
    type Item = WordToken;
    type IntoIter = std::vec::IntoIter<WordToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

fn push_bytes(tokens: &mut Vec<WordToken>, analyzer: &dyn Analyzer, raw: &[u8], offset: usize) {
    if raw.is_empty() {
        return;
    }
    push_token(tokens, analyzer, &String::from_utf8_lossy(raw), raw.len(), offset);
}

/// Length of the UTF-8 sequence introduced by `lead`.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
