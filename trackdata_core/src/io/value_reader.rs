//! This module defines the `ValueReader` trait, the byte source tiles are decoded from.
//!
//! # Overview
//!
//! A `ValueReader` reads primitive values with a fixed byte order from an in-memory source and
//! keeps track of its position, so decoders can check how many bytes remain before they
//! allocate. Reading past the end is an error, never a zero-filled value.

use crate::{Blob, ByteRange};
use anyhow::{Context, Result, ensure};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from various sources with support for different byte orders.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position within the readable data.
	///
	/// # Errors
	/// Returns an error if the position lies outside of the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Fails unless at least `count` more bytes can be read.
	///
	/// # Errors
	/// Returns an error naming the missing byte count.
	fn ensure_remaining(&mut self, count: u64) -> Result<()> {
		let remaining = self.remaining();
		ensure!(
			remaining >= count,
			"expected {count} more bytes at position {}, but only {remaining} remain",
			self.position()
		);
		Ok(())
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	fn read_i32(&mut self) -> Result<i32> {
		Ok(self.get_reader().read_i32::<E>()?)
	}

	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}

	fn read_u64(&mut self) -> Result<u64> {
		Ok(self.get_reader().read_u64::<E>()?)
	}

	fn read_f32(&mut self) -> Result<f32> {
		Ok(self.get_reader().read_f32::<E>()?)
	}

	/// Reads `count` consecutive `i32` values.
	///
	/// # Errors
	/// Returns an error, before allocating, if fewer than `count * 4` bytes remain.
	fn read_i32_vec(&mut self, count: usize) -> Result<Vec<i32>> {
		self.ensure_remaining(count as u64 * 4)?;
		let mut values = vec![0i32; count];
		self.get_reader().read_i32_into::<E>(&mut values)?;
		Ok(values)
	}

	/// Reads `count` consecutive `f32` values.
	///
	/// # Errors
	/// Returns an error, before allocating, if fewer than `count * 4` bytes remain.
	fn read_f32_vec(&mut self, count: usize) -> Result<Vec<f32>> {
		self.ensure_remaining(count as u64 * 4)?;
		let mut values = vec![0f32; count];
		self.get_reader().read_f32_into::<E>(&mut values)?;
		Ok(values)
	}

	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		self.ensure_remaining(length)?;
		let mut blob = Blob::new_sized(length as usize);
		self.get_reader().read_exact(blob.as_mut_slice())?;
		Ok(blob)
	}

	/// Reads a UTF-8 string of `length` bytes.
	///
	/// # Errors
	/// Returns an error if reading fails or if the bytes are not valid UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		let blob = self.read_blob(length)?;
		Ok(String::from_utf8(blob.into_vec())?)
	}

	/// Reads a [`ByteRange`] written by `ValueWriter::write_range`.
	fn read_range(&mut self) -> Result<ByteRange> {
		let offset = self.read_u64()?;
		let length = self.read_u64()?;
		Ok(ByteRange::new(offset, length))
	}

	/// Reads a string written by `ValueWriter::write_prefixed_string`.
	fn read_prefixed_string(&mut self) -> Result<String> {
		let length = self.read_u32().context("Failed to read string length")?;
		self
			.read_string(u64::from(length))
			.context("Failed to read string bytes")
	}
}
