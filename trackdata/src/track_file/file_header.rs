//! The fixed-size header at the start of every track file.
//!
//! ```text
//! 12 bytes  magic "trackdata_v1"
//!  u8       compression (0 none, 1 gzip, 2 brotli)
//!  3 bytes  reserved, zero
//!  u32      tile width
//!  u64 x 2  metadata range (offset, length)
//!  u64 x 2  tile index range (offset, length)
//! ```
//!
//! All integers are little-endian.

use anyhow::{Result, bail, ensure};
use trackdata_core::{
	Blob, ByteRange,
	compression::TileCompression,
	io::{DataReader, ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
};

pub const HEADER_LENGTH: u64 = 52;
const MAGIC: &[u8; 12] = b"trackdata_v1";

#[derive(Debug, PartialEq)]
pub struct FileHeader {
	pub compression: TileCompression,
	pub tile_width: u32,
	pub meta_range: ByteRange,
	pub index_range: ByteRange,
}

impl FileHeader {
	pub fn new(compression: TileCompression, tile_width: u32) -> Result<FileHeader> {
		ensure!(tile_width > 0, "tile width must be positive");
		Ok(FileHeader {
			compression,
			tile_width,
			meta_range: ByteRange::empty(),
			index_range: ByteRange::empty(),
		})
	}

	pub async fn from_reader(reader: &DataReader) -> Result<FileHeader> {
		let blob = reader.read_range(&ByteRange::new(0, HEADER_LENGTH)).await?;
		FileHeader::from_blob(&blob)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_slice(MAGIC)?;
		writer.write_u8(match self.compression {
			TileCompression::Uncompressed => 0,
			TileCompression::Gzip => 1,
			TileCompression::Brotli => 2,
		})?;
		writer.write_slice(&[0; 3])?;
		writer.write_u32(self.tile_width)?;
		writer.write_range(&self.meta_range)?;
		writer.write_range(&self.index_range)?;

		if writer.position()? != HEADER_LENGTH {
			bail!(
				"header should be {HEADER_LENGTH} bytes long, but is {} bytes long",
				writer.position()?
			);
		}
		Ok(writer.into_blob())
	}

	pub fn from_blob(blob: &Blob) -> Result<FileHeader> {
		if blob.len() != HEADER_LENGTH {
			bail!("not a track file: a header is {HEADER_LENGTH} bytes long, got {}", blob.len());
		}

		let mut reader = ValueReaderSlice::new_le(blob.as_slice());
		if reader.read_blob(MAGIC.len() as u64)?.as_slice() != MAGIC {
			bail!("not a track file: missing magic word \"trackdata_v1\"");
		}

		let compression = match reader.read_u8()? {
			0 => TileCompression::Uncompressed,
			1 => TileCompression::Gzip,
			2 => TileCompression::Brotli,
			value => bail!("unknown compression value: {value}"),
		};
		reader.read_blob(3)?;
		let tile_width = reader.read_u32()?;
		ensure!(tile_width > 0, "tile width must be positive");

		Ok(FileHeader {
			compression,
			tile_width,
			meta_range: reader.read_range()?,
			index_range: reader.read_range()?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TileCompression::Uncompressed, 1, 0, 0)]
	#[case(TileCompression::Gzip, 100_000, 52, 1234)]
	#[case(TileCompression::Brotli, u32::MAX, 314159265358979323, 846264338327950288)]
	fn conversion(#[case] compression: TileCompression, #[case] tile_width: u32, #[case] a: u64, #[case] b: u64) {
		let mut header = FileHeader::new(compression, tile_width).unwrap();
		header.meta_range = ByteRange::new(a, b);
		header.index_range = ByteRange::new(b, a);

		let blob = header.to_blob().unwrap();
		assert_eq!(blob.len(), HEADER_LENGTH);
		assert_eq!(FileHeader::from_blob(&blob).unwrap(), header);
	}

	#[test]
	fn invalid_headers() {
		let valid = FileHeader::new(TileCompression::Gzip, 10).unwrap().to_blob().unwrap().into_vec();

		let error = FileHeader::from_blob(&Blob::from(&valid[..40])).unwrap_err();
		assert_eq!(error.to_string(), "not a track file: a header is 52 bytes long, got 40");

		let mut wrong_magic = valid.clone();
		wrong_magic[0] = b'X';
		assert!(FileHeader::from_blob(&Blob::from(wrong_magic)).is_err());

		let mut wrong_compression = valid.clone();
		wrong_compression[12] = 9;
		let error = FileHeader::from_blob(&Blob::from(wrong_compression)).unwrap_err();
		assert_eq!(error.to_string(), "unknown compression value: 9");

		assert!(FileHeader::new(TileCompression::Gzip, 0).is_err());
	}
}
