//! Builds the word table from text.

use std::io::{self, Read};

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::tokenizer::{BufferedTokens, tokenize_line};
use crate::index::entry::WordEntry;

/// The word table: normalized word to its entry.
pub type WordTable = AHashMap<String, WordEntry>;

/// Accumulates `(word, absolute offset)` pairs into a [`WordTable`].
pub struct Indexer<'a> {
    analyzer: &'a dyn Analyzer,
    table: WordTable,
    total_positions: u64,
}

impl<'a> Indexer<'a> {
    /// Create an indexer whose table starts with room for `capacity_hint` words.
    pub fn new(analyzer: &'a dyn Analyzer, capacity_hint: usize) -> Self {
        Indexer {
            analyzer,
            table: AHashMap::with_capacity(capacity_hint),
            total_positions: 0,
        }
    }

    /// Record one occurrence of an already normalized word whose raw form is
    /// `raw_len` bytes long.
    pub fn insert(&mut self, word: String, offset: u64, raw_len: usize) {
        self.total_positions += 1;
        match self.table.get_mut(&word) {
            Some(entry) => entry.add_position(offset, raw_len),
            None => {
                let entry = WordEntry::new(word.clone(), offset, raw_len);
                self.table.insert(word, entry);
            }
        }
    }

    /// Index a complete in-memory text line by line.
    ///
    /// Offsets are byte offsets into `text`.
    pub fn index_text(&mut self, text: &str) {
        let mut base = 0u64;
        for line in text.split('\n') {
            for token in tokenize_line(line, self.analyzer) {
                self.insert(token.word, base + token.offset as u64, token.raw_len);
            }
            base += line.len() as u64 + 1;
        }
    }

    /// Index everything `reader` yields, reading `chunk_size` bytes at a time.
    ///
    /// Words are never split across chunks. A word longer than the whole
    /// chunk grows the buffer. Returns the number of bytes consumed.
    pub fn index_reader<R: Read>(&mut self, mut reader: R, chunk_size: usize) -> io::Result<u64> {
        let mut buffer = vec![0u8; chunk_size.max(1)];
        let mut carried = 0;
        let mut base = 0u64;

        loop {
            let n = read_full(&mut reader, &mut buffer[carried..])?;
            let len = carried + n;
            if len == 0 {
                break;
            }

            let tokens = BufferedTokens::tokenize(&mut buffer, len, self.analyzer);
            let truncated = tokens.truncated();
            for token in tokens {
                self.insert(token.word, base + token.offset as u64, token.raw_len);
            }
            base += (len - truncated) as u64;
            carried = truncated;

            if carried == buffer.len() {
                let grown = buffer.len() * 2;
                log::trace!("word longer than {} bytes, growing buffer to {grown}", buffer.len());
                buffer.resize(grown, 0);
            }
        }

        Ok(base)
    }

    /// Total occurrences recorded so far.
    pub fn total_positions(&self) -> u64 {
        self.total_positions
    }

    /// Finish indexing, optionally shrinking every allocation to fit.
    pub fn finish(mut self, compact: bool) -> WordTable {
        if compact {
            for entry in self.table.values_mut() {
                entry.shrink_to_fit();
            }
            self.table.shrink_to_fit();
        }
        self.table
    }
}

/// Read until `buf` is full or the reader is exhausted.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::{AnalyzerKind, EnglishAnalyzer, WhitespaceAnalyzer};

    const TEXT: &str = "In the beginning God created the heaven and the earth.\n\
                        And the earth was without form, and void.\n\
                        And God said, Let there be light: and there was light.\n";

    /// A reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_index_text() {
        let analyzer = EnglishAnalyzer;
        let mut indexer = Indexer::new(&analyzer, 64);
        indexer.index_text(TEXT);
        let table = indexer.finish(false);

        let god = table.get("god").unwrap();
        assert_eq!(god.positions().len(), 2);
        for &pos in god.positions() {
            assert_eq!(&TEXT[pos as usize..pos as usize + 3], "God");
        }
        assert_eq!(table.get("the").unwrap().positions().len(), 4);
        assert!(table.get("").is_none());
    }

    #[test]
    fn test_reader_matches_text_for_every_chunk_size() {
        let analyzer = EnglishAnalyzer;
        let mut reference = Indexer::new(&analyzer, 64);
        reference.index_text(TEXT);
        let reference = reference.finish(false);

        for chunk_size in [1, 2, 5, 7, 16, 31, 64, 4096] {
            let mut indexer = Indexer::new(&analyzer, 64);
            let consumed = indexer.index_reader(TEXT.as_bytes(), chunk_size).unwrap();
            assert_eq!(consumed, TEXT.len() as u64);
            assert_eq!(indexer.finish(false), reference, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_reader_handles_short_reads() {
        let analyzer = WhitespaceAnalyzer;
        let mut reference = Indexer::new(&analyzer, 64);
        reference.index_text(TEXT);

        let mut indexer = Indexer::new(&analyzer, 64);
        let reader = Trickle {
            data: TEXT.as_bytes(),
            step: 3,
        };
        indexer.index_reader(reader, 16).unwrap();
        assert_eq!(indexer.total_positions(), reference.total_positions());
        assert_eq!(indexer.finish(true), reference.finish(true));
    }

    #[test]
    fn test_word_longer_than_chunk() {
        let analyzer = EnglishAnalyzer;
        let text = "a supercalifragilisticexpialidocious word";
        let mut indexer = Indexer::new(&analyzer, 64);
        indexer.index_reader(text.as_bytes(), 4).unwrap();
        let table = indexer.finish(false);

        assert_eq!(
            table
                .get("supercalifragilisticexpialidocious")
                .unwrap()
                .positions(),
            &[2]
        );
        assert_eq!(table.get("word").unwrap().positions(), &[37]);
    }

    /// A reader that fails once `data` runs out.
    struct Failing<'a> {
        data: &'a [u8],
    }

    impl Read for Failing<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("device went away"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_reader_error_propagates() {
        let analyzer = EnglishAnalyzer;
        let mut indexer = Indexer::new(&analyzer, 64);
        let reader = Failing {
            data: b"In the beginning God",
        };

        let err = indexer.index_reader(reader, 8).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "device went away");
    }

    #[test]
    fn test_reader_matches_text_with_unicode_whitespace() {
        let text = "foo\u{3000}bar baz\nThe \u{212A}ing\u{85}spoke\u{2003}unto them.\n";
        for analyzer in [AnalyzerKind::English, AnalyzerKind::Whitespace] {
            let mut reference = Indexer::new(&analyzer, 64);
            reference.index_text(text);
            let reference = reference.finish(false);
            assert!(reference.contains_key("bar"));
            assert_eq!(reference.get("king").unwrap().word_len(), 6);

            for chunk_size in [1, 2, 3, 5, 16, 4096] {
                let mut indexer = Indexer::new(&analyzer, 64);
                indexer.index_reader(text.as_bytes(), chunk_size).unwrap();
                assert_eq!(
                    indexer.finish(false),
                    reference,
                    "{} with chunk size {chunk_size}",
                    analyzer.name()
                );
            }
        }
    }

    #[test]
    fn test_positions_are_ordered() {
        let analyzer = EnglishAnalyzer;
        let text = "god ".repeat(500);
        let mut indexer = Indexer::new(&analyzer, 64);
        indexer.index_reader(text.as_bytes(), 4096).unwrap();
        let table = indexer.finish(true);

        let positions = table.get("god").unwrap().positions();
        assert_eq!(positions.len(), 500);
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }
}
