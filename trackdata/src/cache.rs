//! This module provides `TileCache`, which keeps decoded tiles up to a total footprint in bytes.
//!
//! Each entry is weighted by [`Tile::heap_size`], so a cache of a few fixed-step tiles holds
//! far more positions than one of bed tiles. When an insert would exceed the limit, every entry
//! accessed no later than the median access is evicted, followed by the oldest entries until
//! the new tile fits.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use trackdata::TileCache;
//! use trackdata_core::{ByteRange, tile::{FixedStepTile, Tile}};
//!
//! let mut cache = TileCache::with_maximum_size(1_000_000);
//! let tile = Arc::new(Tile::FixedStep(FixedStepTile::new(0, 10, 4, vec![vec![1.0; 4]]).unwrap()));
//! cache.add(ByteRange::new(0, 42), tile.clone());
//! assert_eq!(cache.get(&ByteRange::new(0, 42)), Some(tile));
//! ```

use log::trace;
use std::{collections::HashMap, fmt::Debug, sync::Arc};
use trackdata_core::{ByteRange, tile::Tile};

struct Entry {
	tile: Arc<Tile>,
	size: usize,
	last_access: u64,
}

pub struct TileCache {
	entries: HashMap<ByteRange, Entry>,
	maximum_size: usize,
	current_size: usize,
	last_access: u64,
}

impl TileCache {
	/// Creates an empty cache that holds at most `maximum_size` bytes of tiles.
	pub fn with_maximum_size(maximum_size: usize) -> Self {
		Self {
			entries: HashMap::new(),
			maximum_size,
			current_size: 0,
			last_access: 0,
		}
	}

	/// Returns the tile stored for `key` and marks it as recently used.
	pub fn get(&mut self, key: &ByteRange) -> Option<Arc<Tile>> {
		let entry = self.entries.get_mut(key)?;
		self.last_access += 1;
		entry.last_access = self.last_access;
		Some(entry.tile.clone())
	}

	/// Stores `tile` under `key` and returns the cached tile.
	///
	/// If `key` is already present the existing tile is kept. A tile larger than the whole
	/// cache is returned without being stored.
	pub fn add(&mut self, key: ByteRange, tile: Arc<Tile>) -> Arc<Tile> {
		if let Some(existing) = self.get(&key) {
			return existing;
		}

		let size = Self::footprint(&tile);
		if size > self.maximum_size {
			trace!("tile {key:?} with {size} bytes exceeds the cache size, not caching");
			return tile;
		}
		if self.current_size + size > self.maximum_size {
			self.cleanup();
		}
		while self.current_size + size > self.maximum_size {
			self.evict_oldest();
		}

		self.last_access += 1;
		self.current_size += size;
		self.entries.insert(
			key,
			Entry {
				tile: tile.clone(),
				size,
				last_access: self.last_access,
			},
		);
		tile
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Footprint of all cached tiles, in bytes.
	pub fn size(&self) -> usize {
		self.current_size
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.current_size = 0;
	}

	fn footprint(tile: &Tile) -> usize {
		size_of::<Tile>() + tile.heap_size()
	}

	/// Removes every entry accessed no later than the median access.
	fn cleanup(&mut self) {
		let mut accesses: Vec<u64> = self.entries.values().map(|e| e.last_access).collect();
		if accesses.is_empty() {
			return;
		}
		accesses.sort_unstable();
		let median = accesses[accesses.len() / 2];

		let before = self.entries.len();
		self.entries.retain(|_, e| e.last_access > median);
		self.current_size = self.entries.values().map(|e| e.size).sum();
		trace!(
			"cache cleanup evicted {} tiles, {} bytes remain",
			before - self.entries.len(),
			self.current_size
		);
	}

	fn evict_oldest(&mut self) {
		let oldest = self.entries.iter().min_by_key(|(_, e)| e.last_access).map(|(k, _)| *k);
		match oldest.and_then(|key| self.entries.remove(&key)) {
			Some(entry) => self.current_size -= entry.size,
			None => self.current_size = 0,
		}
	}
}

impl Debug for TileCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileCache")
			.field("length", &self.entries.len())
			.field("size", &self.current_size)
			.field("maximum_size", &self.maximum_size)
			.finish()
	}
}
