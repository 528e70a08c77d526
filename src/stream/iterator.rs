//! Pull-based iterator over a [`FrameSource`].
//!
//! The iterator owns a fixed-capacity scratch buffer. It asks its source to
//! fill the buffer, drains the frames one at a time, and refills the same
//! buffer with the continuation handle until the source is exhausted:
//!
//! ```text
//! Fresh ──fill──▶ Buffered ──drain──▶ (handle?) ──yes──▶ fill again
//!                                         └──no──▶ Exhausted
//! ```
//!
//! Frames come out in the order the source wrote them, across refills.
//! Dropping the iterator releases any outstanding handle; [`close`] does the
//! same explicitly and reports release errors.
//!
//! [`close`]: WordContextIterator::close

use log::warn;

use crate::error::{Result, WordIndexError};
use crate::stream::frame::FrameReader;
use crate::stream::source::{ContinuationHandle, FrameSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Fresh,
    Buffered,
    Exhausted,
    Closed,
}

/// Iterator over word-context results streamed through a bounded buffer.
///
/// Yields `Result<String>`: a failed refill is reported once and ends the
/// iteration. Windows may start or end inside a multi-byte character, so
/// payloads are decoded lossily.
pub struct WordContextIterator<'a> {
    source: Option<Box<dyn FrameSource + 'a>>,
    buffer: Vec<u8>,
    cursor: usize,
    handle: Option<ContinuationHandle>,
    state: StreamState,
}

impl<'a> WordContextIterator<'a> {
    /// Drive `source` through a buffer of `capacity` bytes.
    ///
    /// Fails with [`WordIndexError::UndersizedBuffer`] if the buffer could not
    /// hold a single result frame.
    pub fn over(source: Box<dyn FrameSource + 'a>, capacity: usize) -> Result<Self> {
        let required = source.required_capacity();
        if capacity < required {
            return Err(WordIndexError::undersized_buffer(capacity, required));
        }
        Ok(WordContextIterator {
            source: Some(source),
            buffer: vec![0u8; capacity],
            cursor: 0,
            handle: None,
            state: StreamState::Fresh,
        })
    }

    /// Capacity of the scratch buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Whether another result is available, refilling the buffer if needed.
    pub fn has_next(&mut self) -> Result<bool> {
        loop {
            match self.state {
                StreamState::Fresh => self.refill(None)?,
                StreamState::Buffered => {
                    if FrameReader::at(&self.buffer, self.cursor).has_frame()? {
                        return Ok(true);
                    }
                    match self.handle.take() {
                        Some(handle) => self.refill(Some(handle))?,
                        None => self.state = StreamState::Exhausted,
                    }
                }
                StreamState::Exhausted | StreamState::Closed => return Ok(false),
            }
        }
    }

    /// Release the continuation handle and the source.
    ///
    /// Closing twice, or closing an exhausted iterator, does nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.state == StreamState::Closed {
            return Ok(());
        }
        self.state = StreamState::Closed;

        let handle = self.handle.take();
        let source = self.source.take();
        self.buffer = Vec::new();

        match (source, handle) {
            (Some(mut source), Some(handle)) => source.release(handle),
            _ => Ok(()),
        }
    }

    fn refill(&mut self, handle: Option<ContinuationHandle>) -> Result<()> {
        let Some(source) = self.source.as_mut() else {
            self.state = StreamState::Exhausted;
            return Ok(());
        };

        match source.fill(&mut self.buffer, handle) {
            Ok(next) => {
                self.handle = next;
                self.cursor = 0;
                self.state = StreamState::Buffered;
                Ok(())
            }
            Err(e) => {
                self.state = StreamState::Exhausted;
                Err(e)
            }
        }
    }

    fn take_frame(&mut self) -> Result<String> {
        let mut reader = FrameReader::at(&self.buffer, self.cursor);
        let frame = reader
            .next_frame()?
            .ok_or_else(|| WordIndexError::malformed_frame("expected a frame"))?;
        let text = String::from_utf8_lossy(frame).into_owned();
        self.cursor = reader.position();
        Ok(text)
    }
}

impl Iterator for WordContextIterator<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.take_frame()),
            Ok(false) => None,
            Err(e) => {
                self.state = StreamState::Exhausted;
                Some(Err(e))
            }
        }
    }
}

impl Drop for WordContextIterator<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to release word context stream: {e}");
        }
    }
}

impl std::fmt::Debug for WordContextIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordContextIterator")
            .field("capacity", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("handle", &self.handle)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use uuid::Uuid;

    use super::*;
    use crate::stream::frame::{FRAME_HEADER_LEN, FrameWriter};

    /// In-memory source over fixed strings, recording releases.
    struct VecSource {
        id: Uuid,
        items: Vec<String>,
        fills: Rc<RefCell<usize>>,
        released: Rc<RefCell<Vec<usize>>>,
    }

    impl VecSource {
        fn boxed(
            items: &[&str],
        ) -> (Box<dyn FrameSource>, Rc<RefCell<usize>>, Rc<RefCell<Vec<usize>>>) {
            let fills = Rc::new(RefCell::new(0));
            let released = Rc::new(RefCell::new(Vec::new()));
            let source = VecSource {
                id: Uuid::new_v4(),
                items: items.iter().map(|s| s.to_string()).collect(),
                fills: fills.clone(),
                released: released.clone(),
            };
            (Box::new(source), fills, released)
        }
    }

    impl FrameSource for VecSource {
        fn required_capacity(&self) -> usize {
            FRAME_HEADER_LEN + self.items.iter().map(String::len).max().unwrap_or(0)
        }

        fn fill(
            &mut self,
            buffer: &mut [u8],
            handle: Option<ContinuationHandle>,
        ) -> Result<Option<ContinuationHandle>> {
            *self.fills.borrow_mut() += 1;
            let mut next = handle.map(|h| h.position()).unwrap_or(0);
            let mut writer = FrameWriter::new(buffer);
            while next < self.items.len() && writer.fits(self.items[next].len()) {
                writer.write_frame(self.items[next].as_bytes())?;
                next += 1;
            }
            writer.finish();
            Ok((next < self.items.len()).then(|| ContinuationHandle::new(self.id, next)))
        }

        fn release(&mut self, handle: ContinuationHandle) -> Result<()> {
            self.released.borrow_mut().push(handle.position());
            Ok(())
        }
    }

    #[test]
    fn test_drains_across_refills() {
        let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let (source, fills, _) = VecSource::boxed(&words);
        let iter = WordContextIterator::over(source, 20).unwrap();

        let out: Vec<String> = iter.collect::<Result<_>>().unwrap();
        assert_eq!(out, words);
        assert!(*fills.borrow() > 1);
    }

    #[test]
    fn test_lazy_until_first_pull() {
        let (source, fills, _) = VecSource::boxed(&["a", "b"]);
        let mut iter = WordContextIterator::over(source, 64).unwrap();
        assert_eq!(*fills.borrow(), 0);

        assert!(iter.has_next().unwrap());
        assert!(iter.has_next().unwrap());
        assert_eq!(*fills.borrow(), 1);
        assert_eq!(iter.next().unwrap().unwrap(), "a");
        assert_eq!(iter.next().unwrap().unwrap(), "b");
        assert!(iter.next().is_none());
        assert!(!iter.has_next().unwrap());
    }

    #[test]
    fn test_rejects_undersized_buffer() {
        let (source, _, _) = VecSource::boxed(&["abcdefgh"]);
        let err = WordContextIterator::over(source, 11).unwrap_err();
        assert!(matches!(
            err,
            WordIndexError::UndersizedBuffer {
                capacity: 11,
                required: 12
            }
        ));
    }

    #[test]
    fn test_close_releases_outstanding_handle() {
        let (source, _, released) = VecSource::boxed(&["one", "two", "three"]);
        let mut iter = WordContextIterator::over(source, 9).unwrap();
        assert_eq!(iter.next().unwrap().unwrap(), "one");

        iter.close().unwrap();
        assert_eq!(*released.borrow(), [1]);
        assert!(iter.next().is_none());

        iter.close().unwrap();
        assert_eq!(released.borrow().len(), 1);
    }

    #[test]
    fn test_close_after_exhaustion_is_noop() {
        let (source, _, released) = VecSource::boxed(&["one"]);
        let mut iter = WordContextIterator::over(source, 64).unwrap();
        assert_eq!(iter.by_ref().count(), 1);
        iter.close().unwrap();
        iter.close().unwrap();
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn test_drop_releases_handle() {
        let (source, _, released) = VecSource::boxed(&["one", "two"]);
        {
            let mut iter = WordContextIterator::over(source, 8).unwrap();
            iter.next().unwrap().unwrap();
        }
        assert_eq!(*released.borrow(), [1]);
    }
}
