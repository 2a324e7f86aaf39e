//! This module provides the [`Blob`] struct, an owned byte buffer holding encoded tile records.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::{Blob, ByteRange};
//!
//! let blob = Blob::from(vec![0, 1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(blob.len(), 8);
//! assert_eq!(blob.read_range(&ByteRange::new(2, 3)).unwrap().as_slice(), &[2, 3, 4]);
//! ```

use super::ByteRange;
use anyhow::{Context, Result, ensure};
use std::fmt::Debug;
use std::path::Path;

/// An owned sequence of bytes, e.g. one encoded (and possibly compressed) tile.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Creates a zero-filled `Blob` of `length` bytes.
	#[must_use]
	pub fn new_sized(length: usize) -> Blob {
		Blob(vec![0u8; length])
	}

	/// Returns a copy of the bytes covered by `range`.
	///
	/// # Errors
	///
	/// Returns an error if the range reaches past the end of the blob.
	pub fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		ensure!(
			range.fits_within(self.len()),
			"{range:?} reaches outside of blob with length {}",
			self.len()
		);
		Ok(Blob::from(&self.0[range.as_range_usize()]))
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		&mut self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Length in bytes.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Space-separated hex dump, used in log output of corrupt records.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self.0.iter().map(|byte| format!("{byte:02x}")).collect::<Vec<_>>().join(" ")
	}

	/// Writes the bytes to `path`, replacing an existing file.
	pub fn save_to_file(&self, path: &Path) -> Result<()> {
		std::fs::write(path, &self.0).with_context(|| format!("failed to write blob to {path:?}"))
	}

	/// Reads a whole file into a `Blob`.
	pub fn load_from_file(path: &Path) -> Result<Self> {
		let data = std::fs::read(path).with_context(|| format!("failed to read blob from {path:?}"))?;
		Ok(Blob::from(data))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		const PREVIEW: usize = 16;
		let preview = Blob::from(&self.0[..self.0.len().min(PREVIEW)]).as_hex();
		if self.0.len() > PREVIEW {
			write!(f, "Blob({}): {preview} ...", self.0.len())
		} else {
			write!(f, "Blob({}): {preview}", self.0.len())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::NamedTempFile;

	#[test]
	fn read_range_inside() -> Result<()> {
		let blob = Blob::from(vec![10, 20, 30, 40, 50]);
		assert_eq!(blob.read_range(&ByteRange::new(1, 3))?.into_vec(), vec![20, 30, 40]);
		assert!(blob.read_range(&ByteRange::new(5, 0))?.is_empty());
		Ok(())
	}

	#[test]
	fn read_range_outside() {
		let blob = Blob::from(vec![10, 20, 30]);
		let error = blob.read_range(&ByteRange::new(2, 2)).unwrap_err();
		assert!(error.to_string().contains("reaches outside of blob with length 3"));
	}

	#[test]
	fn debug_preview() {
		assert_eq!(format!("{:?}", Blob::from(&[0xde, 0xad])), "Blob(2): de ad");
		let long = Blob::new_sized(20);
		assert!(format!("{long:?}").ends_with(" ..."));
		assert!(format!("{long:?}").starts_with("Blob(20): 00 00"));
	}

	#[test]
	fn save_and_load() -> Result<()> {
		let file = NamedTempFile::new("blob.bin")?;
		let blob = Blob::from(vec![1, 2, 3, 4]);
		blob.save_to_file(file.path())?;
		assert_eq!(Blob::load_from_file(file.path())?, blob);
		Ok(())
	}
}
