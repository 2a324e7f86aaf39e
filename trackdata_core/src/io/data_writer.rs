//! This module defines the `DataWriterTrait`, an append-only byte sink for encoded tile records.
//!
//! Every append returns the [`ByteRange`] the record landed at, which callers keep in their
//! index to read the record back later.

use crate::{Blob, ByteRange};
use anyhow::Result;

pub trait DataWriterTrait: Send {
	/// Appends `blob` and returns where it was written.
	fn append(&mut self, blob: &Blob) -> Result<ByteRange>;

	/// Overwrites the first `blob.len()` bytes, e.g. to finalize a header, without moving the
	/// append position.
	fn write_start(&mut self, blob: &Blob) -> Result<()>;

	/// Current write position, i.e. the offset of the next append.
	fn get_position(&mut self) -> Result<u64>;

	/// Flushes buffered bytes to the destination.
	fn flush(&mut self) -> Result<()> {
		Ok(())
	}
}
