//! This module provides functionality for reading tile records from files.
//!
//! # Overview
//!
//! `DataReaderFile` reads byte ranges with positioned reads (`pread` on unix, `seek_read` on
//! windows). No file cursor is shared between calls, so concurrent `read_range` calls on one
//! reader never interfere with each other.
//!
//! # Examples
//!
//! ```rust,no_run
//! use trackdata_core::{io::{DataReaderFile, DataReaderTrait}, ByteRange};
//! use anyhow::Result;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let reader = DataReaderFile::open(Path::new("/data/signal.tiles"))?;
//!     let record = reader.read_range(&ByteRange::new(0, 64)).await?;
//!     assert_eq!(record.len(), 64);
//!     Ok(())
//! }
//! ```

use super::DataReaderTrait;
use crate::{Blob, ByteRange};
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::{fs::File, path::Path};

/// Reads byte ranges from a file on the local filesystem.
#[derive(Debug)]
pub struct DataReaderFile {
	name: String,
	file: File,
	size: u64,
}

impl DataReaderFile {
	/// Opens the file at `path`.
	///
	/// # Errors
	///
	/// Returns an error if `path` does not exist, is not absolute, or is not a regular file.
	pub fn open(path: &Path) -> Result<Box<DataReaderFile>> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_absolute(), "path {path:?} must be absolute");
		ensure!(path.is_file(), "path {path:?} must be a file");

		let path = path.canonicalize()?;
		let file = File::open(&path).with_context(|| format!("failed to open {path:?}"))?;
		let size = file.metadata()?.len();
		log::debug!("opened {path:?} with {size} bytes");

		Ok(Box::new(DataReaderFile {
			name: path.to_string_lossy().into_owned(),
			file,
			size,
		}))
	}

	pub fn size(&self) -> u64 {
		self.size
	}

	fn read_at(&self, buffer: &mut [u8], offset: u64) -> std::io::Result<()> {
		#[cfg(unix)]
		{
			use std::os::unix::fs::FileExt;
			self.file.read_exact_at(buffer, offset)
		}
		#[cfg(windows)]
		{
			use std::os::windows::fs::FileExt;
			let mut filled = 0;
			while filled < buffer.len() {
				let n = self.file.seek_read(&mut buffer[filled..], offset + filled as u64)?;
				if n == 0 {
					return Err(std::io::ErrorKind::UnexpectedEof.into());
				}
				filled += n;
			}
			Ok(())
		}
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		ensure!(
			range.fits_within(self.size),
			"{range:?} reaches outside of file '{}' with {} bytes",
			self.name,
			self.size
		);
		let mut blob = Blob::new_sized(range.length as usize);
		self.read_at(blob.as_mut_slice(), range.offset).with_context(|| {
			format!(
				"failed to read {} bytes at offset {} in file '{}'",
				range.length, range.offset, self.name
			)
		})?;
		Ok(blob)
	}

	async fn read_all(&self) -> Result<Blob> {
		self.read_range(&ByteRange::new(0, self.size)).await
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::NamedTempFile;
	use std::sync::Arc;

	fn temp_file(content: &[u8]) -> Result<NamedTempFile> {
		let file = NamedTempFile::new("testfile.bin")?;
		std::fs::write(file.path(), content)?;
		Ok(file)
	}

	#[tokio::test]
	async fn open() -> Result<()> {
		let file = temp_file(b"Hello, world!")?;
		let reader = DataReaderFile::open(file.path())?;
		assert_eq!(reader.size(), 13);
		assert!(reader.get_name().ends_with("testfile.bin"));

		let missing = NamedTempFile::new("nonexistent.bin")?;
		assert!(DataReaderFile::open(missing.path()).is_err());
		assert!(DataReaderFile::open(Path::new("relative.bin")).is_err());
		Ok(())
	}

	#[tokio::test]
	async fn read_range() -> Result<()> {
		let file = temp_file(b"Hello, world!")?;
		let reader = DataReaderFile::open(file.path())?;
		let blob = reader.read_range(&ByteRange::new(4, 6)).await?;
		assert_eq!(blob.as_slice(), b"o, wor");
		assert_eq!(reader.read_all().await?.as_slice(), b"Hello, world!");
		assert!(reader.read_range(&ByteRange::new(10, 4)).await.is_err());
		assert!(reader.read_range(&ByteRange::new(u64::MAX, 2)).await.is_err());
		Ok(())
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_positioned_reads() -> Result<()> {
		let content: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
		let file = temp_file(&content)?;
		let reader: Arc<DataReaderFile> = Arc::from(DataReaderFile::open(file.path())?);

		let handles = (0..64u64)
			.map(|i| {
				let reader = reader.clone();
				tokio::spawn(async move {
					let range = ByteRange::new(i * 61, 32);
					let blob = reader.read_range(&range).await?;
					anyhow::Ok((range, blob))
				})
			})
			.collect::<Vec<_>>();

		for handle in handles {
			let (range, blob) = handle.await??;
			assert_eq!(blob.as_slice(), &content[range.as_range_usize()]);
		}
		Ok(())
	}
}
