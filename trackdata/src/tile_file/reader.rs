use crate::TileCache;
use anyhow::{Context, Result};
use futures::{future::try_join_all, lock::Mutex};
use log::{debug, trace};
use std::{fmt::Debug, sync::Arc};
use trackdata_core::{
	Blob, ByteRange,
	compression::{TileCompression, decompress},
	io::DataReader,
	tile::Tile,
};

/// Loads tile records by byte range and keeps decoded tiles in a [`TileCache`].
///
/// All methods take `&self`; the underlying reader uses positioned reads, so concurrent
/// requests do not interfere. A failed read or decode is never cached.
pub struct TileFileReader {
	reader: DataReader,
	compression: TileCompression,
	cache: Mutex<TileCache>,
}

impl TileFileReader {
	pub fn new(reader: DataReader, compression: TileCompression, cache_size: usize) -> TileFileReader {
		TileFileReader {
			reader,
			compression,
			cache: Mutex::new(TileCache::with_maximum_size(cache_size)),
		}
	}

	pub fn get_name(&self) -> &str {
		self.reader.get_name()
	}

	pub fn compression(&self) -> TileCompression {
		self.compression
	}

	/// Returns the tile stored at `range`.
	///
	/// # Errors
	///
	/// Fails if the range cannot be read or decompressed, or if the record does not decode;
	/// a [`TileError`](trackdata_core::tile::TileError) stays reachable through
	/// `downcast_ref`.
	pub async fn get_tile(&self, range: &ByteRange) -> Result<Arc<Tile>> {
		if let Some(tile) = self.cache.lock().await.get(range) {
			trace!("cache hit for tile {range:?}");
			return Ok(tile);
		}

		let blob = self.read_blob(range).await?;
		let tile = Tile::from_blob(&blob)
			.with_context(|| format!("failed to decode tile {range:?} in {}", self.get_name()))?;

		Ok(self.cache.lock().await.add(*range, Arc::new(tile)))
	}

	/// Returns the tiles at `ranges`, in the same order, loading them concurrently.
	pub async fn get_tiles(&self, ranges: &[ByteRange]) -> Result<Vec<Arc<Tile>>> {
		debug!("loading {} tiles from {}", ranges.len(), self.get_name());
		try_join_all(ranges.iter().map(|range| self.get_tile(range))).await
	}

	/// Reads and decompresses a record that is not a tile, e.g. metadata or an index.
	pub async fn read_blob(&self, range: &ByteRange) -> Result<Blob> {
		let blob = self
			.reader
			.read_range(range)
			.await
			.with_context(|| format!("failed to read {range:?} from {}", self.get_name()))?;
		decompress(blob, self.compression).with_context(|| format!("failed to read {range:?} from {}", self.get_name()))
	}

	pub async fn cached_tiles(&self) -> usize {
		self.cache.lock().await.len()
	}
}

impl Debug for TileFileReader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileFileReader")
			.field("name", &self.get_name())
			.field("compression", &self.compression)
			.finish()
	}
}
