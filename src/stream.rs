//! Bounded-buffer streaming of query results.
//!
//! Results cross a fixed-capacity buffer as length-prefixed frames. A
//! continuation handle lets the producer resume where the previous fill
//! stopped, so any number of results can be pulled through the same buffer
//! without re-scanning the index.
//!
//! - [`frame`]: the byte-exact wire codec
//! - [`source`]: the backend and frame source traits, and the handle type
//! - [`position`]: the in-process source reading windows from the file
//! - [`iterator`]: the consumer-facing pull iterator

pub mod frame;
pub mod iterator;
pub mod position;
pub mod source;
