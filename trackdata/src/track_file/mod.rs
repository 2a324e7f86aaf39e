//! Track files: many tiles of one dataset in a single file.
//!
//! ```text
//! header (52 bytes) | dataset (YAML) | tile records ... | tile index
//! ```
//!
//! The dataset, each tile record and the index are compressed with the compression named in
//! the header.
//!
//! # Examples
//!
//! ```rust
//! use trackdata::{Dataset, TrackFileReader, TrackFileWriter};
//! use trackdata_core::{compression::TileCompression, io::{DataReaderBlob, DataWriterBlob}, tile::TileBuilder};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let dataset = Dataset::new("ds1", "example", "hg38").with_tracks(&["signal"]);
//!     let mut builder = TileBuilder::new(0, 1);
//!     builder.push(0, 50, &[1.5])?;
//!
//!     let mut data = DataWriterBlob::new();
//!     let mut writer = TrackFileWriter::new(&mut data, &dataset, TileCompression::Gzip, 1000)?;
//!     writer.write_tile("chr1", &builder.build()?)?;
//!     writer.finish()?;
//!
//!     let reader = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(data.into_blob())), 1 << 20).await?;
//!     let tiles = reader.query("chr1", 10, 20).await?;
//!     assert_eq!(tiles[0].1.value(0, 0)?, 1.5);
//!     Ok(())
//! }
//! ```

mod file_header;
mod reader;
mod tile_index;
mod writer;

pub use file_header::*;
pub use reader::TrackFileReader;
pub use tile_index::*;
pub use writer::TrackFileWriter;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Dataset;
	use anyhow::Result;
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;
	use trackdata_core::{
		Blob, ByteRange,
		compression::TileCompression,
		io::{DataReaderBlob, DataWriterBlob, DataWriterFile},
		tile::{Tile, TileBuilder},
	};

	fn dataset() -> Dataset {
		Dataset::new("ds1", "Liver", "hg38").with_tracks(&["plus", "minus"])
	}

	fn tile(tile_start: i32, records: &[(i32, i32)]) -> Tile {
		let mut builder = TileBuilder::new(tile_start, 2);
		for &(start, end) in records {
			builder.push(start, end, &[start as f32, -(end as f32)]).unwrap();
		}
		builder.build().unwrap()
	}

	fn write(compression: TileCompression) -> Result<Blob> {
		let mut data = DataWriterBlob::new();
		let mut writer = TrackFileWriter::new(&mut data, &dataset(), compression, 1000)?;
		writer.write_tile("chr1", &tile(0, &[(0, 100), (100, 200)]))?;
		writer.write_tile("chr1", &tile(1000, &[(1010, 1020), (1500, 4000)]))?;
		writer.write_tile("chr2", &tile(0, &[(5, 6)]))?;
		assert_eq!(writer.tile_count(), 3);
		writer.finish()?;
		Ok(data.into_blob())
	}

	#[tokio::test]
	async fn roundtrip_in_memory() -> Result<()> {
		for compression in [TileCompression::Uncompressed, TileCompression::Gzip, TileCompression::Brotli] {
			let blob = write(compression)?;
			let reader = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(blob)), 1 << 20).await?;

			assert_eq!(reader.compression(), compression);
			assert_eq!(reader.tile_width(), 1000);
			assert_eq!(reader.dataset(), &dataset());
			assert_eq!(reader.index().chromosomes(), vec!["chr1", "chr2"]);

			let entry = reader.index().iter().nth(1).unwrap();
			assert_eq!(entry.max_end, 4000);
			assert_eq!(*reader.get_tile(entry).await?, tile(1000, &[(1010, 1020), (1500, 4000)]));
		}
		Ok(())
	}

	#[tokio::test]
	async fn query_finds_long_intervals() -> Result<()> {
		let reader = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(write(TileCompression::Gzip)?)), 1 << 20).await?;

		let found = reader.query("chr1", 3000, 3100).await?;
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].0.tile_start, 1000);
		assert_eq!(found[0].1.value(1, 1)?, -4000.0);

		assert_eq!(reader.query("chr1", 0, 2000).await?.len(), 2);
		assert!(reader.query("chrM", 0, 2000).await?.is_empty());
		Ok(())
	}

	#[tokio::test]
	async fn roundtrip_on_disk() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("signal.tracks");

		let mut file = DataWriterFile::from_path(&path)?;
		let mut writer = TrackFileWriter::new(&mut file, &dataset(), TileCompression::Brotli, 1000)?;
		writer.write_tile("chr1", &tile(0, &[(0, 100), (100, 200)]))?;
		writer.finish()?;
		drop(file);

		let reader = TrackFileReader::open_path(&path, 1 << 20).await?;
		let found = reader.query("chr1", 150, 160).await?;
		assert_eq!(found[0].1.end().to_vec(), vec![100, 200]);
		Ok(())
	}

	#[test]
	fn tracks_must_match_readsets() -> Result<()> {
		let mut data = DataWriterBlob::new();
		let mut writer = TrackFileWriter::new(&mut data, &Dataset::new("a", "b", "c"), TileCompression::Gzip, 10)?;
		let error = writer.write_tile("chr1", &tile(0, &[(0, 1)])).unwrap_err();
		assert_eq!(
			error.to_string(),
			"tile at chr1:0 has 2 tracks, but the dataset has 0 readsets"
		);
		Ok(())
	}

	#[tokio::test]
	async fn unfinished_and_foreign_files_are_rejected() -> Result<()> {
		let mut data = DataWriterBlob::new();
		let mut writer = TrackFileWriter::new(&mut data, &dataset(), TileCompression::Gzip, 1000)?;
		writer.write_tile("chr1", &tile(0, &[(0, 100)]))?;
		drop(writer);
		let error = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(data.into_blob())), 1024)
			.await
			.unwrap_err();
		assert!(format!("{error:#}").contains("no tile index"));

		let foreign = Blob::from(vec![0u8; 100]);
		assert!(TrackFileReader::open_reader(Box::new(DataReaderBlob::from(foreign)), 1024).await.is_err());
		Ok(())
	}

	#[tokio::test]
	async fn overflowing_ranges_are_errors() -> Result<()> {
		let mut header = FileHeader::new(TileCompression::Uncompressed, 1000)?;
		header.meta_range = ByteRange::new(u64::MAX, 2);
		header.index_range = ByteRange::new(HEADER_LENGTH, 1);
		let mut bytes = header.to_blob()?.into_vec();
		bytes.push(0);
		let error = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(bytes)), 1024)
			.await
			.unwrap_err();
		assert!(format!("{error:#}").contains("reaches outside of blob"));

		let reader = TrackFileReader::open_reader(Box::new(DataReaderBlob::from(write(TileCompression::Gzip)?)), 1024).await?;
		let entry = IndexEntry::new("chr1", &tile(0, &[(0, 100)]), ByteRange::new(u64::MAX - 1, 5));
		assert!(reader.get_tile(&entry).await.is_err());
		Ok(())
	}
}
