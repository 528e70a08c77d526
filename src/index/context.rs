//! Context sizes and read windows around a match.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bytes of context requested on each side of a matched word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSize {
    /// Just the word itself.
    #[default]
    NoContext,
    /// 16 bytes on each side.
    Small,
    /// 64 bytes on each side.
    Medium,
    /// 128 bytes on each side.
    Large,
}

impl ContextSize {
    /// The largest context any query can ask for.
    pub const MAX: ContextSize = ContextSize::Large;

    /// Size of this context in bytes.
    pub fn bytes(&self) -> usize {
        match self {
            ContextSize::NoContext => 0,
            ContextSize::Small => 16,
            ContextSize::Medium => 64,
            ContextSize::Large => 128,
        }
    }
}

impl fmt::Display for ContextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.bytes())
    }
}

/// The span of the file read for one occurrence.
///
/// `len` is the requested length; the read itself stops early at end of
/// file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryWindow {
    /// First byte to read, never before offset 0.
    pub start: u64,
    /// Number of bytes to read.
    pub len: usize,
}

impl QueryWindow {
    /// Window for a word of `word_len` bytes found at `offset`.
    ///
    /// Nominally `context + word + context`. When fewer than `context` bytes
    /// precede the match, the window starts at 0 and shrinks by the missing
    /// amount so it still ends `context` bytes after the word.
    pub fn around(offset: u64, word_len: usize, context: ContextSize) -> Self {
        let ctx = context.bytes() as u64;
        let start = offset.saturating_sub(ctx);
        let end = offset + word_len as u64 + ctx;
        QueryWindow {
            start,
            len: (end - start) as usize,
        }
    }

    /// Largest window any occurrence of a `word_len`-byte word can need.
    pub fn max_len(word_len: usize, context: ContextSize) -> usize {
        2 * context.bytes() + word_len
    }

    /// Read this window into the front of `buf`, returning the number of
    /// bytes read. Fewer than `len` bytes are returned only at end of file.
    pub fn read_into(&self, file: &mut File, buf: &mut [u8]) -> Result<usize> {
        let want = self.len.min(buf.len());
        file.seek(SeekFrom::Start(self.start))?;
        let mut filled = 0;
        while filled < want {
            let n = file.read(&mut buf[filled..want])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}
