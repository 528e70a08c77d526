//! Query backend capability and resumable frame sources.
//!
//! A [`QueryBackend`] opens one [`FrameSource`] per query. The source fills a
//! caller-owned buffer with frames (see [`frame`](super::frame)) and hands
//! back a [`ContinuationHandle`] whenever results remain, so the next fill
//! resumes exactly where the previous one stopped.
//!
//! The in-process index is one backend. An out-of-process or native
//! implementation of the same algorithm plugs in by implementing these two
//! traits; nothing else in the crate depends on which one is used.

use std::fmt;

use uuid::Uuid;

use crate::error::Result;
use crate::index::context::ContextSize;
use crate::stream::iterator::WordContextIterator;

/// Cursor into the position list of one query.
///
/// Handles are tied to the stream that issued them and are rejected by any
/// other stream. `None` in place of a handle is the sentinel: nothing has
/// been read yet (when passed in) or nothing remains (when returned).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuationHandle {
    stream: Uuid,
    position: usize,
}

impl ContinuationHandle {
    /// Create a handle for `stream` resuming at `position`.
    pub fn new(stream: Uuid, position: usize) -> Self {
        ContinuationHandle { stream, position }
    }

    /// The stream that issued this handle.
    pub fn stream(&self) -> Uuid {
        self.stream
    }

    /// Index of the next occurrence to encode.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ContinuationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.stream, self.position)
    }
}

/// Produces the frames of a single query, one buffer at a time.
pub trait FrameSource {
    /// Smallest buffer capacity that can hold one result frame.
    fn required_capacity(&self) -> usize;

    /// Encode as many frames as fit into `buffer`, starting after `handle`.
    ///
    /// Returns the handle to resume from, or `None` once every result has
    /// been written. The buffer is overwritten from offset 0.
    fn fill(
        &mut self,
        buffer: &mut [u8],
        handle: Option<ContinuationHandle>,
    ) -> Result<Option<ContinuationHandle>>;

    /// Release a handle that will not be resumed.
    fn release(&mut self, handle: ContinuationHandle) -> Result<()>;
}

/// Something that can answer streaming word-context queries.
pub trait QueryBackend: Send + Sync {
    /// Open a frame source for `word` with `context` bytes on each side.
    fn open_stream(&self, word: &str, context: ContextSize) -> Result<Box<dyn FrameSource + '_>>;

    /// Get the name of this backend.
    fn name(&self) -> &'static str;

    /// Open a stream and wrap it in an iterator over a `capacity`-byte buffer.
    fn stream_words(
        &self,
        word: &str,
        context: ContextSize,
        capacity: usize,
    ) -> Result<WordContextIterator<'_>> {
        let source = self.open_stream(word, context)?;
        WordContextIterator::over(source, capacity)
    }
}
