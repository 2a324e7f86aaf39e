use super::{FileHeader, IndexEntry, TileIndex};
use crate::{Dataset, TileFileWriter};
use anyhow::{Context, Result, ensure};
use log::{debug, trace};
use trackdata_core::{
	Blob, ByteRange,
	compression::TileCompression,
	io::DataWriterTrait,
	tile::Tile,
};

/// Writes a complete track file: header, dataset metadata, tiles and the tile index.
///
/// The header is written as a placeholder first and rewritten by [`TrackFileWriter::finish`],
/// once the position of the index is known. A file that was never finished has an empty
/// index range and cannot be opened.
pub struct TrackFileWriter<'a> {
	header: FileHeader,
	index: TileIndex,
	track_count: usize,
	tiles: TileFileWriter<'a>,
}

impl<'a> TrackFileWriter<'a> {
	pub fn new(
		writer: &'a mut dyn DataWriterTrait,
		dataset: &Dataset,
		compression: TileCompression,
		tile_width: u32,
	) -> Result<TrackFileWriter<'a>> {
		let mut header = FileHeader::new(compression, tile_width)?;
		let mut tiles = TileFileWriter::new(writer, compression);

		ensure!(tiles.get_position()? == 0, "track files must be written from the start");
		trace!("write header");
		tiles.write_raw(&header.to_blob()?)?;

		trace!("write meta");
		let meta = serde_yaml_ng::to_string(dataset).context("failed to serialize dataset")?;
		header.meta_range = tiles.write_blob(Blob::from(meta.into_bytes()))?;

		Ok(TrackFileWriter {
			header,
			index: TileIndex::new_empty(),
			track_count: dataset.readsets().len(),
			tiles,
		})
	}

	/// Appends a tile of chromosome `chrom` and records it in the index.
	///
	/// # Errors
	///
	/// Fails if the tile does not hold one track per readset of the dataset.
	pub fn write_tile(&mut self, chrom: &str, tile: &Tile) -> Result<ByteRange> {
		ensure!(
			tile.track_count() == self.track_count,
			"tile at {chrom}:{} has {} tracks, but the dataset has {} readsets",
			tile.tile_start(),
			tile.track_count(),
			self.track_count
		);
		let range = self.tiles.write_tile(tile)?;
		self.index.add(IndexEntry::new(chrom, tile, range));
		Ok(range)
	}

	pub fn tile_count(&self) -> usize {
		self.index.len()
	}

	/// Writes the index and the final header.
	pub fn finish(mut self) -> Result<()> {
		debug!("write index with {} tiles", self.index.len());
		self.header.index_range = self.tiles.write_blob(self.index.to_blob()?)?;

		trace!("update header");
		self.tiles.write_start(&self.header.to_blob()?)?;
		self.tiles.flush()
	}
}
