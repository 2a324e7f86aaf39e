//! This module provides `DataWriterFile`, which appends tile records to a file.

use super::DataWriterTrait;
use crate::{Blob, ByteRange};
use anyhow::{Context, Result, ensure};
use std::{
	fs::File,
	io::{BufWriter, Seek, SeekFrom, Write},
	path::Path,
};

/// Appends records to a newly created file.
pub struct DataWriterFile {
	writer: BufWriter<File>,
	position: u64,
}

impl DataWriterFile {
	/// Creates (or truncates) the file at `path`.
	///
	/// # Errors
	///
	/// Returns an error if `path` is not absolute or the file cannot be created.
	pub fn from_path(path: &Path) -> Result<DataWriterFile> {
		ensure!(path.is_absolute(), "path {path:?} must be absolute");
		let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;

		Ok(DataWriterFile {
			writer: BufWriter::new(file),
			position: 0,
		})
	}
}

impl DataWriterTrait for DataWriterFile {
	fn append(&mut self, blob: &Blob) -> Result<ByteRange> {
		let range = ByteRange::new(self.position, blob.len());
		self.writer.write_all(blob.as_slice())?;
		self.position += blob.len();
		Ok(range)
	}

	fn write_start(&mut self, blob: &Blob) -> Result<()> {
		ensure!(
			blob.len() <= self.position,
			"cannot overwrite {} bytes of a file holding {} bytes",
			blob.len(),
			self.position
		);
		self.writer.rewind()?;
		self.writer.write_all(blob.as_slice())?;
		self.writer.seek(SeekFrom::Start(self.position))?;
		Ok(())
	}

	fn get_position(&mut self) -> Result<u64> {
		Ok(self.position)
	}

	fn flush(&mut self) -> Result<()> {
		Ok(self.writer.flush()?)
	}
}

impl Drop for DataWriterFile {
	fn drop(&mut self) {
		if let Err(error) = self.writer.flush() {
			log::error!("failed to flush tile file: {error}");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::NamedTempFile;

	#[test]
	fn append_and_flush() -> Result<()> {
		let file = NamedTempFile::new("records.bin")?;
		let mut writer = DataWriterFile::from_path(file.path())?;

		assert_eq!(writer.append(&Blob::from(vec![1, 2, 3, 4]))?, ByteRange::new(0, 4));
		assert_eq!(writer.append(&Blob::from(vec![5, 6]))?, ByteRange::new(4, 2));
		assert_eq!(writer.get_position()?, 6);
		writer.flush()?;

		assert_eq!(std::fs::read(file.path())?, vec![1, 2, 3, 4, 5, 6]);
		Ok(())
	}

	#[test]
	fn write_start_then_append() -> Result<()> {
		let file = NamedTempFile::new("header.bin")?;
		let mut writer = DataWriterFile::from_path(file.path())?;

		writer.append(&Blob::from(vec![0, 0, 0]))?;
		writer.append(&Blob::from(vec![4, 5]))?;
		writer.write_start(&Blob::from(vec![1, 2, 3]))?;
		assert_eq!(writer.append(&Blob::from(vec![6]))?, ByteRange::new(5, 1));
		drop(writer);

		assert_eq!(std::fs::read(file.path())?, vec![1, 2, 3, 4, 5, 6]);
		Ok(())
	}

	#[test]
	fn relative_path_is_rejected() {
		assert!(DataWriterFile::from_path(Path::new("records.bin")).is_err());
	}
}
