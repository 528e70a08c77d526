//! Length-prefixed frame codec for fixed-capacity buffers.
//!
//! A buffer holds a run of frames, each a little-endian `u32` length followed
//! by that many payload bytes. A length of `0` terminates the run. When fewer
//! than four bytes remain after the last frame there is no room for the
//! terminator, and the end of the buffer terminates the run instead.
//!
//! ```text
//! [len=3]["God"][len=19]["In the beginning..."][0]
//! ```
//!
//! # Examples
//!
//! ```
//! use wordindex::stream::frame::{FrameReader, FrameWriter};
//!
//! let mut buf = [0u8; 32];
//! let mut writer = FrameWriter::new(&mut buf);
//! writer.write_frame(b"hello").unwrap();
//! writer.finish();
//!
//! let mut reader = FrameReader::new(&buf);
//! assert_eq!(reader.next_frame().unwrap(), Some(&b"hello"[..]));
//! assert_eq!(reader.next_frame().unwrap(), None);
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Result, WordIndexError};

/// Size of the length prefix.
pub const FRAME_HEADER_LEN: usize = 4;

/// Length prefix value that ends a run of frames.
pub const TERMINATOR: u32 = 0;

/// Writes frames into a caller-owned buffer.
#[derive(Debug)]
pub struct FrameWriter<'b> {
    buf: &'b mut [u8],
    written: usize,
    frames: usize,
}

impl<'b> FrameWriter<'b> {
    /// Start writing at the beginning of `buf`.
    pub fn new(buf: &'b mut [u8]) -> Self {
        FrameWriter {
            buf,
            written: 0,
            frames: 0,
        }
    }

    /// Bytes still free.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }

    /// Whether a frame carrying `payload_len` bytes fits.
    pub fn fits(&self, payload_len: usize) -> bool {
        self.remaining() >= FRAME_HEADER_LEN + payload_len
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Append a frame holding `payload`, which must not be empty.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        if payload.is_empty() {
            return Err(WordIndexError::malformed_frame("empty payload"));
        }
        self.write_frame_with(payload.len(), |dst| {
            dst.copy_from_slice(payload);
            Ok(dst.len())
        })
        .map(|_| ())
    }

    /// Append a frame whose payload is produced in place.
    ///
    /// `fill` receives `max_len` bytes of buffer and returns how many it
    /// used. The prefix records that count, so a short fill costs nothing.
    /// Returns the payload length. A fill of zero bytes writes no frame,
    /// since a zero prefix would read back as the terminator.
    pub fn write_frame_with<F>(&mut self, max_len: usize, fill: F) -> Result<usize>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        if !self.fits(max_len) {
            return Err(WordIndexError::undersized_buffer(
                self.remaining(),
                FRAME_HEADER_LEN + max_len,
            ));
        }

        let payload_start = self.written + FRAME_HEADER_LEN;
        let used = fill(&mut self.buf[payload_start..payload_start + max_len])?;
        if used == 0 {
            return Ok(0);
        }
        if used > max_len {
            return Err(WordIndexError::malformed_frame(format!(
                "payload of {used} bytes, expected at most {max_len}"
            )));
        }
        let len = u32::try_from(used)
            .map_err(|_| WordIndexError::malformed_frame("payload exceeds u32::MAX bytes"))?;

        LittleEndian::write_u32(&mut self.buf[self.written..payload_start], len);
        self.written = payload_start + used;
        self.frames += 1;
        Ok(used)
    }

    /// Write the terminator if it fits and return the bytes used.
    pub fn finish(mut self) -> usize {
        if self.remaining() >= FRAME_HEADER_LEN {
            LittleEndian::write_u32(
                &mut self.buf[self.written..self.written + FRAME_HEADER_LEN],
                TERMINATOR,
            );
        }
        self.written
    }
}

/// Reads frames back out of a buffer.
#[derive(Debug, Clone)]
pub struct FrameReader<'b> {
    buf: &'b [u8],
    position: usize,
}

impl<'b> FrameReader<'b> {
    /// Read from the start of `buf`.
    pub fn new(buf: &'b [u8]) -> Self {
        Self::at(buf, 0)
    }

    /// Resume reading at byte `position`.
    pub fn at(buf: &'b [u8], position: usize) -> Self {
        FrameReader { buf, position }
    }

    /// Byte offset of the next frame.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The next frame's payload, or `None` at the terminator.
    pub fn next_frame(&mut self) -> Result<Option<&'b [u8]>> {
        let header_end = self.position + FRAME_HEADER_LEN;
        if header_end > self.buf.len() {
            return Ok(None);
        }

        let len = LittleEndian::read_u32(&self.buf[self.position..header_end]) as usize;
        if len == TERMINATOR as usize {
            return Ok(None);
        }

        let end = header_end + len;
        if end > self.buf.len() {
            return Err(WordIndexError::malformed_frame(format!(
                "frame at {} claims {len} bytes, only {} remain",
                self.position,
                self.buf.len() - header_end
            )));
        }

        self.position = end;
        Ok(Some(&self.buf[header_end..end]))
    }

    /// Whether a frame follows, without consuming it.
    pub fn has_frame(&self) -> Result<bool> {
        Ok(self.clone().next_frame()?.is_some())
    }
}
