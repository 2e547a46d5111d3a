//! Growable writer with length backpatching.

use crate::error::{CodecError, CodecResult};

/// Position of a reserved `u32` slot that is filled in later.
///
/// Handed out by [`WriteStream::reserve_u32`] and consumed by
/// [`WriteStream::patch_u32`]. Not `Clone`, so each slot is patched at most
/// once.
#[derive(Debug)]
#[must_use = "a reserved slot must be patched"]
pub struct Checkpoint {
    offset: usize,
}

impl Checkpoint {
    /// Offset of the first byte written after the reserved slot.
    fn body_start(&self) -> usize {
        self.offset + 4
    }
}

/// Sequential writer over an owned, growable buffer.
///
/// All multi-byte integers are little-endian. A failed encode leaves
/// partial content behind; callers discard the stream in that case.
#[derive(Debug, Clone, Default)]
pub struct WriteStream {
    buf: Vec<u8>,
}

impl WriteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current write offset, which is also the number of bytes written.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrows everything written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the stream and returns the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a one-byte element count, failing if `count` does not fit.
    pub fn write_count_u8(&mut self, path: &str, count: usize) -> CodecResult<()> {
        let count = narrow::<u8>(path, count)?;
        self.write_u8(count);
        Ok(())
    }

    /// Writes a two-byte element count, failing if `count` does not fit.
    pub fn write_count_u16(&mut self, path: &str, count: usize) -> CodecResult<()> {
        let count = narrow::<u16>(path, count)?;
        self.write_u16(count);
        Ok(())
    }

    /// Writes `bytes` behind a one-byte length. Empty input writes `0x00`.
    pub fn write_u8_prefixed(&mut self, path: &str, bytes: &[u8]) -> CodecResult<()> {
        self.write_count_u8(path, bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }

    /// Writes `bytes` behind a two-byte length.
    pub fn write_u16_prefixed(&mut self, path: &str, bytes: &[u8]) -> CodecResult<()> {
        self.write_count_u16(path, bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }

    /// Writes `bytes` behind a four-byte length.
    pub fn write_u32_prefixed(&mut self, path: &str, bytes: &[u8]) -> CodecResult<()> {
        let len = narrow::<u32>(path, bytes.len())?;
        self.write_u32(len);
        self.write_bytes(bytes);
        Ok(())
    }

    /// Reserves a zeroed `u32` slot to be patched once its value is known.
    pub fn reserve_u32(&mut self) -> Checkpoint {
        let offset = self.buf.len();
        self.write_u32(0);
        Checkpoint { offset }
    }

    /// Overwrites a reserved slot in place. The write position stays at the
    /// end of the buffer.
    pub fn patch_u32(&mut self, checkpoint: Checkpoint, value: u32) {
        self.buf[checkpoint.offset..checkpoint.body_start()].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes `body` behind a `u32` length prefix whose value is the exact
    /// number of bytes `body` produced.
    ///
    /// The prefix is reserved first and backpatched after the body is
    /// written. Returns the body length.
    pub fn write_length_prefixed<F>(&mut self, path: &str, body: F) -> CodecResult<usize>
    where
        F: FnOnce(&mut Self) -> CodecResult<()>,
    {
        let checkpoint = self.reserve_u32();
        body(self)?;
        let body_len = self.buf.len() - checkpoint.body_start();
        let prefix = narrow::<u32>(path, body_len)?;
        self.patch_u32(checkpoint, prefix);
        Ok(body_len)
    }
}

/// Converts a `usize` length into a narrower wire integer.
fn narrow<T>(path: &str, value: usize) -> CodecResult<T>
where
    T: TryFrom<usize> + Bounded,
{
    T::try_from(value).map_err(|_| CodecError::LengthOverflow {
        path: path.to_string(),
        max: T::MAX_USIZE,
        actual: value,
    })
}

/// Largest value of a length prefix type, as a `usize`.
trait Bounded {
    const MAX_USIZE: usize;
}

impl Bounded for u8 {
    const MAX_USIZE: usize = u8::MAX as usize;
}

impl Bounded for u16 {
    const MAX_USIZE: usize = u16::MAX as usize;
}

impl Bounded for u32 {
    const MAX_USIZE: usize = u32::MAX as usize;
}
