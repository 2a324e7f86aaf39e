//! In-memory implementation of [`DataReaderTrait`].

use super::DataReaderTrait;
use crate::{Blob, ByteRange};
use anyhow::Result;
use async_trait::async_trait;

/// Serves byte ranges from a buffer held in memory.
#[derive(Debug)]
pub struct DataReaderBlob {
	blob: Blob,
}

impl DataReaderBlob {
	pub fn len(&self) -> u64 {
		self.blob.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blob.is_empty()
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderBlob {
	async fn read_range(&self, range: &ByteRange) -> Result<Blob> {
		self.blob.read_range(range)
	}

	async fn read_all(&self) -> Result<Blob> {
		Ok(self.blob.clone())
	}

	fn get_name(&self) -> &str {
		"memory"
	}
}

impl From<Blob> for DataReaderBlob {
	fn from(blob: Blob) -> Self {
		DataReaderBlob { blob }
	}
}

impl From<Vec<u8>> for DataReaderBlob {
	fn from(value: Vec<u8>) -> Self {
		DataReaderBlob { blob: Blob::from(value) }
	}
}
