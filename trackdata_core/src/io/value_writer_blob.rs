//! This module provides the `ValueWriterBlob` struct for writing values into an in-memory [`Blob`].
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_u32(1025)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![0x01, 0x04, 0x00, 0x00]);
//!     Ok(())
//! }
//! ```

use super::ValueWriter;
use crate::Blob;
use anyhow::Result;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

/// Writes values into a growable in-memory buffer using the byte order `E`.
pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Pre-allocates room for `capacity` bytes, e.g. the known encoded size of a tile.
	pub fn with_capacity(capacity: usize) -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::with_capacity(capacity)),
		}
	}

	/// Consumes the writer and returns everything written so far.
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl ValueWriterBlob<BigEndian> {
	pub fn new_be() -> ValueWriterBlob<BigEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn position_tracks_appends() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		assert!(writer.is_empty()?);
		writer.write_u8(3)?;
		writer.write_i32(-7)?;
		assert_eq!(writer.position()?, 5);
		assert_eq!(writer.into_blob().into_vec(), vec![3, 0xF9, 0xFF, 0xFF, 0xFF]);
		Ok(())
	}

	#[test]
	fn big_endian() -> Result<()> {
		let mut writer = ValueWriterBlob::new_be();
		writer.write_u32(1)?;
		assert_eq!(writer.into_blob().into_vec(), vec![0, 0, 0, 1]);
		Ok(())
	}

	#[test]
	fn with_capacity_starts_empty() -> Result<()> {
		let mut writer = ValueWriterBlob::<LittleEndian>::with_capacity(64);
		assert_eq!(writer.position()?, 0);
		writer.write_blob(&Blob::from(vec![1, 2, 3]))?;
		writer.write_slice(&[4])?;
		assert_eq!(writer.into_blob().into_vec(), vec![1, 2, 3, 4]);
		Ok(())
	}
}
