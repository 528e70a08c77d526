//! Word-boundary analyzers.
//!
//! An [`Analyzer`] decides, one character at a time, where a word ends. The
//! same analyzer is used when the index is built and when a query word is
//! normalized, so lookups see exactly the keys indexing produced.
//!
//! # Available Analyzers
//!
//! - [`EnglishAnalyzer`] - Breaks on whitespace and sentence punctuation
//! - [`WhitespaceAnalyzer`] - Breaks on whitespace only
//! - [`AnalyzerKind`] - Serializable selector over the built-in analyzers
//!
//! # Examples
//!
//! ```
//! use wordindex::analysis::analyzer::{Analyzer, EnglishAnalyzer};
//!
//! let analyzer = EnglishAnalyzer;
//! assert!(analyzer.break_at(','));
//! assert_eq!(analyzer.normalize("God,"), "god");
//! ```

use serde::{Deserialize, Serialize};

/// Characters the English analyzer breaks on in addition to whitespace.
const SENTENCE_DELIMITERS: &[char] = &['.', ',', ';', ':', '!', '?', '\n', '\r'];

/// Trait for analyzers that classify word boundaries.
///
/// Analyzers are stateless and must be shareable across threads.
pub trait Analyzer: Send + Sync {
    /// Returns true if a word should end at `c`.
    fn break_at(&self, c: char) -> bool;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Normalize a raw token: cut it at the first boundary character and
    /// lowercase what remains.
    ///
    /// Normalization is idempotent. A token made only of boundary characters
    /// normalizes to the empty string.
    fn normalize(&self, word: &str) -> String {
        let end = word
            .char_indices()
            .find(|&(_, c)| self.break_at(c))
            .map(|(i, _)| i)
            .unwrap_or(word.len());
        word[..end].to_lowercase()
    }
}

/// Analyzer for natural-language text.
///
/// Breaks on whitespace and on `. , ; : ! ?` and line terminators.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishAnalyzer;

impl Analyzer for EnglishAnalyzer {
    fn break_at(&self, c: char) -> bool {
        c.is_whitespace() || SENTENCE_DELIMITERS.contains(&c)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

/// Analyzer that breaks on whitespace only.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceAnalyzer;

impl Analyzer for WhitespaceAnalyzer {
    fn break_at(&self, c: char) -> bool {
        c.is_whitespace()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Serializable selector for the built-in analyzers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// See [`EnglishAnalyzer`].
    #[default]
    English,
    /// See [`WhitespaceAnalyzer`].
    Whitespace,
}

impl AnalyzerKind {
    /// Numeric identifier handed to external query backends.
    pub fn native_id(&self) -> u32 {
        match self {
            AnalyzerKind::English => 0,
            AnalyzerKind::Whitespace => 1,
        }
    }

    /// Look up an analyzer by its native identifier.
    pub fn from_native_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(AnalyzerKind::English),
            1 => Some(AnalyzerKind::Whitespace),
            _ => None,
        }
    }
}

impl Analyzer for AnalyzerKind {
    fn break_at(&self, c: char) -> bool {
        match self {
            AnalyzerKind::English => EnglishAnalyzer.break_at(c),
            AnalyzerKind::Whitespace => WhitespaceAnalyzer.break_at(c),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnalyzerKind::English => EnglishAnalyzer.name(),
            AnalyzerKind::Whitespace => WhitespaceAnalyzer.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_analyzer_breaks() {
        let analyzer = EnglishAnalyzer;
        for c in [' ', '\t', '\n', '\r', '.', ',', ';', ':', '!', '?'] {
            assert!(analyzer.break_at(c), "expected break at {c:?}");
        }
        assert!(!analyzer.break_at('a'));
        assert!(!analyzer.break_at('\''));
        assert!(!analyzer.break_at('-'));
    }

    #[test]
    fn test_whitespace_analyzer_keeps_punctuation() {
        let analyzer = WhitespaceAnalyzer;
        assert!(analyzer.break_at(' '));
        assert!(!analyzer.break_at(','));
        assert_eq!(analyzer.normalize("God,"), "god,");
    }

    #[test]
    fn test_normalize() {
        let analyzer = EnglishAnalyzer;
        assert_eq!(analyzer.normalize("God,"), "god");
        assert_eq!(analyzer.normalize("LORD"), "lord");
        assert_eq!(analyzer.normalize("end.of"), "end");
        assert_eq!(analyzer.normalize("..."), "");
        assert_eq!(analyzer.normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let analyzer = AnalyzerKind::English;
        for word in ["God,", "Wrath!", "hIm", "Äpfel;", "  lead", "x.y.z"] {
            let once = analyzer.normalize(word);
            assert_eq!(analyzer.normalize(&once), once);
        }
    }

    #[test]
    fn test_unicode_whitespace_breaks() {
        for c in ['\u{3000}', '\u{85}', '\u{2003}'] {
            assert!(EnglishAnalyzer.break_at(c), "expected break at {c:?}");
            assert!(WhitespaceAnalyzer.break_at(c), "expected break at {c:?}");
        }
        assert_eq!(WhitespaceAnalyzer.normalize("foo\u{3000}bar"), "foo");
    }

    #[test]
    fn test_analyzer_kind() {
        assert_eq!(AnalyzerKind::default(), AnalyzerKind::English);
        assert_eq!(AnalyzerKind::English.native_id(), 0);
        assert_eq!(AnalyzerKind::Whitespace.native_id(), 1);
        assert_eq!(AnalyzerKind::from_native_id(1), Some(AnalyzerKind::Whitespace));
        assert_eq!(AnalyzerKind::from_native_id(7), None);
        assert_eq!(AnalyzerKind::Whitespace.name(), "whitespace");
        assert!(!AnalyzerKind::Whitespace.break_at('.'));
    }
}
