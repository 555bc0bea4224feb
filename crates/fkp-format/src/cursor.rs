//! Byte cursor over an in-memory buffer.
//!
//! All container decoding goes through [`Cursor`]: fixed-width unsigned
//! integers and fixed-length null-padded text fields read at a running
//! offset. Reads past the end of the buffer fail with
//! [`FkpError::TruncatedInput`] carrying the absolute byte offset.

use crate::error::{FkpError, Result};

/// Read cursor over a byte slice.
///
/// The cursor tracks an absolute base offset so that sub-cursors created
/// over payload slices still report positions relative to the start of the
/// whole document.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Create a cursor over a sub-slice whose first byte sits at absolute
    /// offset `base` in the original buffer.
    pub fn at_offset(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute position of the next unread byte.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consume and return the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let span = self
            .data
            .get(self.pos..self.pos + len)
            .ok_or_else(|| FkpError::truncated(self.position(), len, self.remaining()))?;
        self.pos += len;
        Ok(span)
    }

    /// Read an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read an unsigned 32-bit little-endian integer.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let span = self.take(4)?;
        Ok(u32::from_le_bytes([span[0], span[1], span[2], span[3]]))
    }

    /// Read a fixed-length text field.
    ///
    /// The full `len`-byte span is consumed regardless of the text's actual
    /// length; the returned string is truncated at the first null byte.
    pub fn read_str(&mut self, len: usize) -> Result<String> {
        let span = self.take(len)?;
        let text = match span.iter().position(|&b| b == 0) {
            Some(end) => &span[..end],
            None => span,
        };
        Ok(String::from_utf8_lossy(text).into_owned())
    }
}
