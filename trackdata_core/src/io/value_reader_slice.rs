//! This module provides the `ValueReaderSlice` struct for reading values from a borrowed byte slice.
//!
//! Each reader owns its own cursor, so many readers may decode different parts of one shared
//! buffer at the same time.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let data = &[0x01, 0x02, 0x03, 0x04];
//!
//!     let mut reader_le = ValueReaderSlice::new_le(data);
//!     assert_eq!(reader_le.read_u32()?, 0x04030201);
//!
//!     let mut reader_be = ValueReaderSlice::new_be(data);
//!     assert_eq!(reader_be.read_u32()?, 0x01020304);
//!
//!     Ok(())
//! }
//! ```

use super::{SeekRead, ValueReader};
use anyhow::{Result, bail};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::{io::Cursor, marker::PhantomData};

/// Reads values from a byte slice using the byte order `E`.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	#[must_use]
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl<'a> ValueReaderSlice<'a, BigEndian> {
	#[must_use]
	pub fn new_be(slice: &'a [u8]) -> ValueReaderSlice<'a, BigEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderSlice<'a, E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		if position > self.len {
			bail!("set position {position} outside length {}", self.len)
		}
		self.cursor.set_position(position);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn len() {
		let reader = ValueReaderSlice::new_le(&[0x80; 42]);
		assert_eq!(reader.len(), 42);
	}

	#[test]
	fn set_and_get_position() -> Result<()> {
		let blob = vec![0x01, 0x02, 0x03, 0x04];
		let mut reader = ValueReaderSlice::new_le(&blob);
		reader.set_position(2)?;
		assert_eq!(reader.position(), 2);
		assert_eq!(reader.remaining(), 2);
		assert_eq!(reader.read_u8()?, 0x03);

		reader.set_position(4)?;
		assert!(!reader.has_remaining());
		assert!(reader.set_position(5).is_err());
		Ok(())
	}

	#[test]
	fn independent_cursors_over_one_buffer() -> Result<()> {
		let buffer = vec![1, 0, 0, 0, 2, 0, 0, 0];
		let mut first = ValueReaderSlice::new_le(&buffer);
		let mut second = ValueReaderSlice::new_le(&buffer);
		second.set_position(4)?;
		assert_eq!(second.read_u32()?, 2);
		assert_eq!(first.read_u32()?, 1);
		Ok(())
	}
}
