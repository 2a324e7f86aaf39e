//! In-memory implementation of [`DataWriterTrait`].
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::{io::{DataWriterBlob, DataWriterTrait}, Blob, ByteRange};
//! use anyhow::{Result, ensure};
//!
//! fn main() -> Result<()> {
//!     let mut writer = DataWriterBlob::new();
//!     assert_eq!(writer.append(&Blob::from(vec![1, 2, 3]))?, ByteRange::new(0, 3));
//!     assert_eq!(writer.append(&Blob::from(vec![4, 5]))?, ByteRange::new(3, 2));
//!     assert_eq!(writer.into_blob().into_vec(), vec![1, 2, 3, 4, 5]);
//!     Ok(())
//! }
//! ```

use super::DataWriterTrait;
use crate::{Blob, ByteRange};
use anyhow::{Result, ensure};

#[derive(Debug, Default)]
pub struct DataWriterBlob {
	data: Vec<u8>,
}

impl DataWriterBlob {
	pub fn new() -> DataWriterBlob {
		DataWriterBlob::default()
	}

	pub fn into_blob(self) -> Blob {
		Blob::from(self.data)
	}
}

impl DataWriterTrait for DataWriterBlob {
	fn append(&mut self, blob: &Blob) -> Result<ByteRange> {
		let offset = self.data.len() as u64;
		self.data.extend_from_slice(blob.as_slice());
		Ok(ByteRange::new(offset, blob.len()))
	}

	fn write_start(&mut self, blob: &Blob) -> Result<()> {
		let length = blob.as_slice().len();
		ensure!(
			length <= self.data.len(),
			"cannot overwrite {length} bytes of a writer holding {} bytes",
			self.data.len()
		);
		self.data[..length].copy_from_slice(blob.as_slice());
		Ok(())
	}

	fn get_position(&mut self) -> Result<u64> {
		Ok(self.data.len() as u64)
	}
}
