//! Frame source that reads context windows straight from the indexed file.

use std::fs::File;

use log::{trace, warn};
use uuid::Uuid;

use crate::error::{Result, WordIndexError};
use crate::index::context::{ContextSize, QueryWindow};
use crate::stream::frame::{FRAME_HEADER_LEN, FrameWriter};
use crate::stream::source::{ContinuationHandle, FrameSource};

/// Streams the windows around a borrowed list of positions.
///
/// Owns its own read handle on the file, so independent streams over the
/// same index never share mutable state.
#[derive(Debug)]
pub struct PositionStream<'a> {
    id: Uuid,
    file: File,
    positions: &'a [u64],
    word_len: usize,
    context: ContextSize,
}

impl<'a> PositionStream<'a> {
    /// Create a stream over `positions` of a `word_len`-byte word.
    pub fn new(file: File, positions: &'a [u64], word_len: usize, context: ContextSize) -> Self {
        PositionStream {
            id: Uuid::new_v4(),
            file,
            positions,
            word_len,
            context,
        }
    }

    fn resume_point(&self, handle: Option<ContinuationHandle>) -> Result<usize> {
        let Some(handle) = handle else {
            return Ok(0);
        };
        if handle.stream() != self.id {
            return Err(WordIndexError::invalid_handle(format!(
                "handle {handle} does not belong to stream {}",
                self.id
            )));
        }
        if handle.position() > self.positions.len() {
            return Err(WordIndexError::invalid_handle(format!(
                "handle {handle} is past the last of {} positions",
                self.positions.len()
            )));
        }
        Ok(handle.position())
    }
}

impl FrameSource for PositionStream<'_> {
    fn required_capacity(&self) -> usize {
        FRAME_HEADER_LEN + QueryWindow::max_len(self.word_len, self.context)
    }

    fn fill(
        &mut self,
        buffer: &mut [u8],
        handle: Option<ContinuationHandle>,
    ) -> Result<Option<ContinuationHandle>> {
        let start = self.resume_point(handle)?;
        let mut writer = FrameWriter::new(buffer);
        let mut next = start;

        while let Some(&offset) = self.positions.get(next) {
            let window = QueryWindow::around(offset, self.word_len, self.context);
            if !writer.fits(window.len) {
                break;
            }

            let file = &mut self.file;
            let used = writer.write_frame_with(window.len, |dst| window.read_into(file, dst))?;
            if used == 0 {
                // The file shrank after indexing.
                warn!("no bytes at offset {offset}, skipping occurrence");
            }
            next += 1;
        }

        let frames = writer.frames();
        writer.finish();

        if next < self.positions.len() {
            if next == start {
                return Err(WordIndexError::undersized_buffer(
                    buffer.len(),
                    self.required_capacity(),
                ));
            }
            trace!("stream {} wrote {frames} frames, resuming at {next}", self.id);
            Ok(Some(ContinuationHandle::new(self.id, next)))
        } else {
            trace!("stream {} wrote {frames} frames, exhausted", self.id);
            Ok(None)
        }
    }

    fn release(&mut self, handle: ContinuationHandle) -> Result<()> {
        self.resume_point(Some(handle))?;
        trace!("stream {} released", self.id);
        Ok(())
    }
}
