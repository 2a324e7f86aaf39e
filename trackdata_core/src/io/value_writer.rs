//! This module defines the `ValueWriter` trait, the byte sink tiles are serialized into.
//!
//! # Overview
//!
//! A `ValueWriter` appends primitive values (integers, floats, strings) to an underlying
//! [`std::io::Write`] using a fixed byte order, and reports the current write offset. Every
//! method returns an error when the destination refuses more bytes.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_i32(1000)?;
//!     writer.write_prefixed_string("exon")?;
//!     assert_eq!(writer.position()?, 12);
//!     Ok(())
//! }
//! ```

use crate::{Blob, ByteRange};
use anyhow::{Context, Result};
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values to various destinations with support for different byte orders.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position as an offset from the start.
	///
	/// # Errors
	///
	/// Returns an error if the position cannot be determined.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	fn write_i32(&mut self, value: i32) -> Result<()> {
		Ok(self.get_writer().write_i32::<E>(value)?)
	}

	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		Ok(self.get_writer().write_u64::<E>(value)?)
	}

	fn write_f32(&mut self, value: f32) -> Result<()> {
		Ok(self.get_writer().write_f32::<E>(value)?)
	}

	/// Writes every value of `values` in order, without a length prefix.
	fn write_i32_slice(&mut self, values: &[i32]) -> Result<()> {
		let writer = self.get_writer();
		for &value in values {
			writer.write_i32::<E>(value)?;
		}
		Ok(())
	}

	/// Writes every value of `values` in order, without a length prefix.
	fn write_f32_slice(&mut self, values: &[f32]) -> Result<()> {
		let writer = self.get_writer();
		for &value in values {
			writer.write_f32::<E>(value)?;
		}
		Ok(())
	}

	fn write_blob(&mut self, blob: &Blob) -> Result<()> {
		self.get_writer().write_all(blob.as_slice())?;
		Ok(())
	}

	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}

	/// Writes the raw UTF-8 bytes of `text`.
	fn write_string(&mut self, text: &str) -> Result<()> {
		self.get_writer().write_all(text.as_bytes())?;
		Ok(())
	}

	/// Writes `text` prefixed with its byte length as `u32`.
	///
	/// # Errors
	///
	/// Returns an error if the string is longer than `u32::MAX` bytes or writing fails.
	fn write_prefixed_string(&mut self, text: &str) -> Result<()> {
		let length = u32::try_from(text.len()).context("string is too long for a u32 length prefix")?;
		self.write_u32(length).context("Failed to write string length")?;
		self.write_string(text).context("Failed to write string bytes")
	}

	/// Writes a [`ByteRange`] as offset and length, both `u64`.
	fn write_range(&mut self, range: &ByteRange) -> Result<()> {
		self.write_u64(range.offset)?;
		self.write_u64(range.length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use byteorder::{BigEndian, LittleEndian};
	use std::io::Cursor;

	struct MockValueWriter {
		cursor: Cursor<Vec<u8>>,
	}

	impl MockValueWriter {
		fn new() -> Self {
			Self {
				cursor: Cursor::new(Vec::new()),
			}
		}

		fn into_inner(self) -> Vec<u8> {
			self.cursor.into_inner()
		}
	}

	impl<E: ByteOrder> ValueWriter<E> for MockValueWriter {
		fn get_writer(&mut self) -> &mut dyn Write {
			&mut self.cursor
		}

		fn position(&mut self) -> Result<u64> {
			Ok(self.cursor.position())
		}
	}

	/// A sink that accepts `capacity` bytes and then refuses everything.
	struct FullWriter {
		capacity: usize,
		written: usize,
	}

	impl Write for FullWriter {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			let free = self.capacity - self.written;
			if free == 0 {
				return Err(std::io::Error::new(std::io::ErrorKind::WriteZero, "buffer exhausted"));
			}
			let n = free.min(buf.len());
			self.written += n;
			Ok(n)
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	impl ValueWriter<LittleEndian> for FullWriter {
		fn get_writer(&mut self) -> &mut dyn Write {
			self
		}

		fn position(&mut self) -> Result<u64> {
			Ok(self.written as u64)
		}
	}

	#[test]
	fn write_i32_le_and_be() -> Result<()> {
		let mut writer = MockValueWriter::new();
		ValueWriter::<LittleEndian>::write_i32(&mut writer, 1000)?;
		assert_eq!(writer.into_inner(), vec![0xE8, 0x03, 0x00, 0x00]);

		let mut writer = MockValueWriter::new();
		ValueWriter::<BigEndian>::write_i32(&mut writer, -1)?;
		assert_eq!(writer.into_inner(), vec![0xFF, 0xFF, 0xFF, 0xFF]);
		Ok(())
	}

	#[test]
	fn write_f32() -> Result<()> {
		let mut writer = MockValueWriter::new();
		ValueWriter::<LittleEndian>::write_f32(&mut writer, 1.0)?;
		assert_eq!(writer.into_inner(), vec![0x00, 0x00, 0x80, 0x3F]);
		Ok(())
	}

	#[test]
	fn write_slices() -> Result<()> {
		let mut writer = MockValueWriter::new();
		ValueWriter::<LittleEndian>::write_i32_slice(&mut writer, &[1, 2])?;
		ValueWriter::<LittleEndian>::write_f32_slice(&mut writer, &[2.25])?;
		assert_eq!(
			writer.into_inner(),
			vec![1, 0, 0, 0, 2, 0, 0, 0, 0x00, 0x00, 0x10, 0x40]
		);
		Ok(())
	}

	#[test]
	fn write_prefixed_string() -> Result<()> {
		let mut writer = MockValueWriter::new();
		ValueWriter::<LittleEndian>::write_prefixed_string(&mut writer, "BRCA1")?;
		assert_eq!(writer.into_inner(), b"\x05\x00\x00\x00BRCA1");
		Ok(())
	}

	#[test]
	fn write_range() -> Result<()> {
		let mut writer = MockValueWriter::new();
		ValueWriter::<LittleEndian>::write_range(&mut writer, &ByteRange::new(1, 2))?;
		assert_eq!(
			writer.into_inner(),
			vec![1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]
		);
		Ok(())
	}

	#[test]
	fn exhausted_destination_is_an_error() {
		let mut writer = FullWriter {
			capacity: 6,
			written: 0,
		};
		ValueWriter::<LittleEndian>::write_u32(&mut writer, 7).unwrap();
		assert!(ValueWriter::<LittleEndian>::write_u32(&mut writer, 8).is_err());
		assert!(ValueWriter::<LittleEndian>::write_prefixed_string(&mut writer, "x").is_err());
	}
}
