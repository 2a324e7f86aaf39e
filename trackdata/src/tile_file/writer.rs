use anyhow::{Context, Result};
use log::trace;
use trackdata_core::{
	Blob, ByteRange,
	compression::{TileCompression, compress},
	io::DataWriterTrait,
	tile::Tile,
};

/// Encodes, compresses and appends tiles to a [`DataWriterTrait`].
pub struct TileFileWriter<'a> {
	writer: &'a mut dyn DataWriterTrait,
	compression: TileCompression,
}

impl<'a> TileFileWriter<'a> {
	pub fn new(writer: &'a mut dyn DataWriterTrait, compression: TileCompression) -> TileFileWriter<'a> {
		TileFileWriter { writer, compression }
	}

	pub fn compression(&self) -> TileCompression {
		self.compression
	}

	/// Appends one tile record and returns the byte range it occupies.
	pub fn write_tile(&mut self, tile: &Tile) -> Result<ByteRange> {
		let blob = tile.to_blob()?;
		let size = blob.len();
		let range = self.write_blob(blob)?;
		trace!(
			"wrote {} tile with {} positions, {size} bytes encoded, {} bytes stored at {range:?}",
			tile.tile_type(),
			tile.size(),
			range.length
		);
		Ok(range)
	}

	/// Compresses and appends a blob that is not a tile, e.g. metadata or an index.
	pub fn write_blob(&mut self, blob: Blob) -> Result<ByteRange> {
		let compressed = compress(blob, self.compression)?;
		self.writer.append(&compressed)
	}

	/// Appends `blob` as is.
	pub fn write_raw(&mut self, blob: &Blob) -> Result<ByteRange> {
		self.writer.append(blob)
	}

	pub fn write_start(&mut self, blob: &Blob) -> Result<()> {
		self.writer.write_start(blob)
	}

	pub fn get_position(&mut self) -> Result<u64> {
		self.writer.get_position()
	}

	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush().context("failed to flush tile records")
	}
}
