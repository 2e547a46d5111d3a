//! # Byte Streams
//!
//! The cursor every codec in this crate operates on. A single stream is
//! created per top-level call and passed down the whole call tree as a
//! `&mut` borrow, so there is exactly one position and it only moves
//! forward (apart from length backpatching on the write side).
//!
//! ```text
//! read.rs  : ReadStream: bounds-checked reads and peeks over &[u8]
//! write.rs : WriteStream: appending writer with reserve/patch checkpoints
//! ```
//!
//! Streams are not thread-safe by construction (`&mut` access only).
//! Distinct streams over distinct buffers are fully independent.

mod read;
mod write;

pub use read::ReadStream;
pub use write::{Checkpoint, WriteStream};

use crate::error::CodecResult;

/// A value with a canonical binary encoding.
///
/// `decode` must consume exactly the bytes `encode` produced for the same
/// value; the codecs in this crate rely on that to chain structures
/// back to back without framing.
pub trait WireCodec: Sized {
    /// Logical name of the structure, used as the root of error paths.
    const PATH: &'static str;

    /// Reads one value from the stream.
    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self>;

    /// Appends the canonical encoding of `self` to the stream.
    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()>;

    /// Decodes a value that must span the whole buffer.
    fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut stream = ReadStream::new(bytes);
        let value = Self::decode(&mut stream)?;
        stream.ensure_consumed(Self::PATH)?;
        Ok(value)
    }

    /// Encodes the value into a fresh buffer.
    fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut stream = WriteStream::new();
        self.encode(&mut stream)?;
        Ok(stream.finish())
    }
}
