//! Bounds-checked sequential reader.

use crate::error::{CodecError, CodecResult};

/// Sequential, bounds-checked reader over a borrowed byte buffer.
///
/// Every read names the logical field it is reading so that a short buffer
/// fails with [`CodecError::TruncatedInput`] pointing at the exact field.
/// Multi-byte integers are little-endian.
#[derive(Debug, Clone)]
pub struct ReadStream<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadStream<'a> {
    /// Creates a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Total length of the underlying buffer.
    pub fn length(&self) -> usize {
        self.buf.len()
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn unused(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Returns true if at least `n` bytes remain.
    pub fn has_remaining(&self, n: usize) -> bool {
        self.unused() >= n
    }

    /// Fails with `TruncatedInput` unless at least `n` bytes remain.
    pub fn ensure_remaining(&self, path: &str, n: usize) -> CodecResult<()> {
        if self.has_remaining(n) {
            Ok(())
        } else {
            Err(self.truncated(path, n))
        }
    }

    /// Fails with `TrailingData` if any byte is left unconsumed.
    pub fn ensure_consumed(&self, path: &str) -> CodecResult<()> {
        match self.unused() {
            0 => Ok(()),
            unused => Err(CodecError::TrailingData {
                path: path.to_string(),
                unused,
            }),
        }
    }

    /// Reads `n` raw bytes, borrowing them from the buffer.
    pub fn read_bytes(&mut self, path: &str, n: usize) -> CodecResult<&'a [u8]> {
        let slice = self.peek_bytes(path, n)?;
        self.pos += n;
        Ok(slice)
    }

    /// Reads `n` raw bytes into an owned vector. Zero bytes is not a read.
    pub fn read_vec(&mut self, path: &str, n: usize) -> CodecResult<Vec<u8>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        Ok(self.read_bytes(path, n)?.to_vec())
    }

    /// Reads exactly `N` bytes into a fixed array.
    pub fn read_array<const N: usize>(&mut self, path: &str) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(path, N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, path: &str) -> CodecResult<u8> {
        Ok(self.read_array::<1>(path)?[0])
    }

    pub fn read_u16(&mut self, path: &str) -> CodecResult<u16> {
        Ok(u16::from_le_bytes(self.read_array(path)?))
    }

    pub fn read_u32(&mut self, path: &str) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.read_array(path)?))
    }

    pub fn read_u64(&mut self, path: &str) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.read_array(path)?))
    }

    /// Reads a boolean byte. Anything other than 0 or 1 is rejected.
    pub fn read_bool(&mut self, path: &str) -> CodecResult<bool> {
        match self.read_u8(path)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidValue {
                path: path.to_string(),
                reason: format!("boolean byte must be 0 or 1, found {other}"),
            }),
        }
    }

    /// Reads the next byte without advancing.
    pub fn peek_u8(&self, path: &str) -> CodecResult<u8> {
        Ok(self.peek_bytes(path, 1)?[0])
    }

    /// Reads the next four bytes as a `u32` without advancing.
    ///
    /// Payload codecs re-read their own discriminator, so the dispatcher
    /// only peeks at it.
    pub fn peek_u32(&self, path: &str) -> CodecResult<u32> {
        let mut out = [0u8; 4];
        out.copy_from_slice(self.peek_bytes(path, 4)?);
        Ok(u32::from_le_bytes(out))
    }

    /// Reads a byte string prefixed by a one-byte length.
    pub fn read_u8_prefixed(&mut self, length_path: &str, path: &str) -> CodecResult<Vec<u8>> {
        let len = self.read_u8(length_path)? as usize;
        self.read_vec(path, len)
    }

    /// Reads a byte string prefixed by a two-byte length.
    pub fn read_u16_prefixed(&mut self, length_path: &str, path: &str) -> CodecResult<Vec<u8>> {
        let len = self.read_u16(length_path)? as usize;
        self.read_vec(path, len)
    }

    /// Reads a byte string prefixed by a four-byte length.
    pub fn read_u32_prefixed(&mut self, length_path: &str, path: &str) -> CodecResult<Vec<u8>> {
        let len = self.read_u32(length_path)? as usize;
        self.read_vec(path, len)
    }

    fn peek_bytes(&self, path: &str, n: usize) -> CodecResult<&'a [u8]> {
        // checked_add keeps a hostile length from wrapping on 32-bit targets
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| self.truncated(path, n))?;
        Ok(&self.buf[self.pos..end])
    }

    fn truncated(&self, path: &str, required: usize) -> CodecError {
        CodecError::TruncatedInput {
            path: path.to_string(),
            required,
            remaining: self.unused(),
        }
    }
}
