//! Bounds-checked cursor over a borrowed byte range.

use std::fmt;
use std::slice;

use crate::error::ReaderError;

use super::MemoryMapping;

/// Position-tracked cursor over bytes it does not own.
///
/// A reader aliases either a [`MemoryMapping`]'s view or a caller-supplied
/// buffer; both look the same once constructed. Every consuming operation is
/// range-checked before memory is touched, and a failed operation leaves the
/// position where it was.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DataReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> DataReader<'a> {
    /// Create a reader over a byte slice, positioned at the start.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a reader over the full view of a mapping.
    pub fn from_mapping(mapping: &'a MemoryMapping) -> Self {
        Self::new(mapping.view())
    }

    /// Create a reader over a raw `(pointer, length)` region.
    ///
    /// A zero `len` yields an empty reader and `ptr` is never read.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must be non-null and valid for reads of `len`
    /// bytes for all of `'a`, and the memory must not be mutated or freed
    /// during that time.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        if len == 0 || ptr.is_null() {
            return Self::new(&[]);
        }
        Self::new(slice::from_raw_parts(ptr, len))
    }

    /// Total length of the underlying range.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current position (always `<= len()`).
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left between the position and the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether the position has reached the end.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying range, independent of position.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// The bytes from the position to the end.
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// End offset of an `n`-byte access at the current position, if in range.
    #[inline]
    fn end_of(&self, n: usize) -> Result<usize, ReaderError> {
        self.position
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(ReaderError::OutOfBounds {
                position: self.position,
                requested: n,
                length: self.data.len(),
            })
    }

    /// Move the position to `target`.
    pub fn seek(&mut self, target: usize) -> Result<(), ReaderError> {
        if target > self.data.len() {
            return Err(ReaderError::InvalidSeek {
                target,
                length: self.data.len(),
            });
        }
        self.position = target;
        Ok(())
    }

    /// Move the position back to the start.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Advance the position by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), ReaderError> {
        self.position = self.end_of(n)?;
        Ok(())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ReaderError> {
        let end = self.end_of(n)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Read `N` bytes into an array.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReaderError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    /// Look at the next byte without advancing.
    pub fn peek_u8(&self) -> Result<u8, ReaderError> {
        self.end_of(1)?;
        Ok(self.data[self.position])
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a u16-length-prefixed byte string.
    ///
    /// The position is unchanged if either the prefix or the body is out of
    /// range.
    pub fn read_string(&mut self) -> Result<&'a [u8], ReaderError> {
        let start = self.position;
        let len = self.read_u16()? as usize;
        self.read_bytes(len).map_err(|e| {
            self.position = start;
            e
        })
    }

    /// Split off a sub-reader over the next `n` bytes and advance past them.
    pub fn slice(&mut self, n: usize) -> Result<DataReader<'a>, ReaderError> {
        self.read_bytes(n).map(DataReader::new)
    }
}

impl<'a> From<&'a [u8]> for DataReader<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a MemoryMapping> for DataReader<'a> {
    fn from(mapping: &'a MemoryMapping) -> Self {
        Self::from_mapping(mapping)
    }
}

impl fmt::Debug for DataReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataReader")
            .field("length", &self.data.len())
            .field("position", &self.position)
            .finish()
    }
}
