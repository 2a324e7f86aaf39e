use super::{FileHeader, IndexEntry, TileIndex};
use crate::{Dataset, TileFileReader};
use anyhow::{Context, Result, ensure};
use log::debug;
use std::{path::Path, sync::Arc};
use trackdata_core::{
	compression::TileCompression,
	io::{DataReader, DataReaderFile},
	tile::Tile,
};

/// Reads track files written by [`TrackFileWriter`](crate::TrackFileWriter).
///
/// Opening loads the header, the dataset and the whole tile index. Tiles are loaded on demand
/// and cached.
#[derive(Debug)]
pub struct TrackFileReader {
	header: FileHeader,
	dataset: Dataset,
	index: TileIndex,
	tiles: TileFileReader,
}

impl TrackFileReader {
	pub async fn open_path(path: &Path, cache_size: usize) -> Result<TrackFileReader> {
		TrackFileReader::open_reader(DataReaderFile::open(path)?, cache_size).await
	}

	pub async fn open_reader(reader: DataReader, cache_size: usize) -> Result<TrackFileReader> {
		let name = reader.get_name().to_string();
		Self::open(reader, cache_size)
			.await
			.with_context(|| format!("failed to open track file {name}"))
	}

	async fn open(reader: DataReader, cache_size: usize) -> Result<TrackFileReader> {
		let header = FileHeader::from_reader(&reader).await.context("failed reading the header")?;
		ensure!(
			header.index_range.length > 0,
			"the file has no tile index, it was probably not written completely"
		);

		let tiles = TileFileReader::new(reader, header.compression, cache_size);

		let meta = tiles.read_blob(&header.meta_range).await.context("failed reading the dataset")?;
		let dataset: Dataset = serde_yaml_ng::from_slice(meta.as_slice()).context("failed parsing the dataset")?;

		let index = TileIndex::from_blob(&tiles.read_blob(&header.index_range).await?)
			.context("failed reading the tile index")?;
		debug!(
			"opened {} with {} tiles of dataset {:?}",
			tiles.get_name(),
			index.len(),
			dataset.id()
		);

		Ok(TrackFileReader {
			header,
			dataset,
			index,
			tiles,
		})
	}

	pub fn get_name(&self) -> &str {
		self.tiles.get_name()
	}

	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	pub fn index(&self) -> &TileIndex {
		&self.index
	}

	pub fn compression(&self) -> TileCompression {
		self.header.compression
	}

	pub fn tile_width(&self) -> u32 {
		self.header.tile_width
	}

	pub async fn get_tile(&self, entry: &IndexEntry) -> Result<Arc<Tile>> {
		self
			.tiles
			.get_tile(&entry.range)
			.await
			.with_context(|| format!("failed to load tile {}:{}", entry.chrom, entry.tile_start))
	}

	/// Loads all tiles of `chrom` that may hold records overlapping `start..end`, in file order.
	pub async fn query(&self, chrom: &str, start: i32, end: i32) -> Result<Vec<(IndexEntry, Arc<Tile>)>> {
		let entries: Vec<IndexEntry> = self
			.index
			.query(chrom, start, end, self.header.tile_width)
			.cloned()
			.collect();
		let ranges: Vec<_> = entries.iter().map(|e| e.range).collect();
		let tiles = self.tiles.get_tiles(&ranges).await?;
		Ok(entries.into_iter().zip(tiles).collect())
	}
}
