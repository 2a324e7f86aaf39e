//! This module provides the `ByteRange` struct, which locates one record inside a file or buffer.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::ByteRange;
//!
//! let range = ByteRange::new(23, 42);
//! assert_eq!(range.end(), 65);
//! assert_eq!(range.as_range_usize(), 23..65);
//! ```

use std::fmt;
use std::ops::Range;

/// A contiguous range of bytes, given by offset and length.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ByteRange {
	/// The starting offset of the byte range.
	pub offset: u64,
	/// The length of the byte range.
	pub length: u64,
}

impl ByteRange {
	pub fn new(offset: u64, length: u64) -> Self {
		Self { offset, length }
	}

	pub fn empty() -> Self {
		Self { offset: 0, length: 0 }
	}

	/// Offset of the first byte after the range.
	pub fn end(&self) -> u64 {
		self.offset + self.length
	}

	/// Like [`ByteRange::end`], but `None` if the end does not fit into a `u64`.
	pub fn checked_end(&self) -> Option<u64> {
		self.offset.checked_add(self.length)
	}

	/// Whether the range lies inside a source of `length` bytes.
	pub fn fits_within(&self, length: u64) -> bool {
		self.checked_end().is_some_and(|end| end <= length)
	}

	/// Returns a copy moved forward by `offset` bytes.
	pub fn get_shifted_forward(&self, offset: u64) -> Self {
		Self {
			offset: self.offset + offset,
			length: self.length,
		}
	}

	pub fn as_range_usize(&self) -> Range<usize> {
		self.offset as usize..self.end() as usize
	}
}

impl fmt::Debug for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ByteRange[{},{}]", self.offset, self.length)
	}
}
