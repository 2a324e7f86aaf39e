//! Tiles: fixed-size chunks of precomputed genomic signal or feature data.
//!
//! # Overview
//!
//! A [`Tile`] covers one genomic sub-region and stores, for each of its `size` positions, an
//! interval (start, end), one `f32` sample per track and, for annotated features, a name.
//! Four encodings exist (see [`TileType`]); [`Tile`] hides them behind one set of accessors so
//! summarizers and renderers never need to know which one backs a tile.
//!
//! Tiles are immutable once built. They are created by [`Tile::read_from`] / [`Tile::from_blob`]
//! when loading, or by [`TileBuilder`] when indexing raw signal.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::tile::{FixedStepTile, Tile};
//!
//! let tile = Tile::FixedStep(FixedStepTile::new(1000, 50, 4, vec![vec![0.5, 1.0, 1.5, 2.0]]).unwrap());
//! assert_eq!(tile.start_position(2).unwrap(), 1100);
//! assert_eq!(tile.end_position(2).unwrap(), 1150);
//! assert_eq!(tile.value(0, 3).unwrap(), 2.0);
//!
//! let decoded = Tile::from_blob(&tile.to_blob().unwrap()).unwrap();
//! assert_eq!(decoded, tile);
//! ```

mod builder;
mod codec;
mod error;
mod fixed_step;
mod interval;
mod tile_type;
mod track_data;

pub use builder::*;
pub use codec::{MAX_TILE_SIZE, MAX_TRACK_COUNT};
pub use error::TileError;
pub use fixed_step::*;
pub use interval::*;
pub use tile_type::*;
pub use track_data::*;

use error::check_index;
use std::borrow::Cow;

/// One tile in one of the four interval encodings.
#[derive(Clone, Debug, PartialEq)]
pub enum Tile {
	FixedStep(FixedStepTile),
	VariableStep(IntervalTile),
	Bed(IntervalTile),
	BedWithName(NamedIntervalTile),
}

impl Tile {
	pub fn tile_type(&self) -> TileType {
		match self {
			Tile::FixedStep(_) => TileType::FixedStep,
			Tile::VariableStep(_) => TileType::VariableStep,
			Tile::Bed(_) => TileType::Bed,
			Tile::BedWithName(_) => TileType::BedWithName,
		}
	}

	/// Genomic coordinate at which the tile begins.
	pub fn tile_start(&self) -> i32 {
		match self {
			Tile::FixedStep(t) => t.tile_start(),
			Tile::VariableStep(t) | Tile::Bed(t) => t.tile_start(),
			Tile::BedWithName(t) => t.intervals().tile_start(),
		}
	}

	/// Number of positions (intervals) in the tile.
	pub fn size(&self) -> usize {
		match self {
			Tile::FixedStep(t) => t.size(),
			Tile::VariableStep(t) | Tile::Bed(t) => t.size(),
			Tile::BedWithName(t) => t.intervals().size(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.size() == 0
	}

	fn track_data(&self) -> &TrackData {
		match self {
			Tile::FixedStep(t) => t.data(),
			Tile::VariableStep(t) | Tile::Bed(t) => t.data(),
			Tile::BedWithName(t) => t.intervals().data(),
		}
	}

	pub fn track_count(&self) -> usize {
		self.track_data().track_count()
	}

	/// All start coordinates.
	///
	/// Fixed-step tiles do not store positions, so the sequence is computed on each call and
	/// returned owned. The other variants lend their stored array.
	pub fn start(&self) -> Cow<'_, [i32]> {
		match self {
			Tile::FixedStep(t) => Cow::Owned((0..t.size()).map(|i| t.start_at(i)).collect()),
			Tile::VariableStep(t) | Tile::Bed(t) => Cow::Borrowed(t.start()),
			Tile::BedWithName(t) => Cow::Borrowed(t.intervals().start()),
		}
	}

	/// All end coordinates, parallel to [`Tile::start`].
	pub fn end(&self) -> Cow<'_, [i32]> {
		match self {
			Tile::FixedStep(t) => Cow::Owned((0..t.size()).map(|i| t.end_at(i)).collect()),
			Tile::VariableStep(t) | Tile::Bed(t) => Cow::Borrowed(t.end()),
			Tile::BedWithName(t) => Cow::Borrowed(t.intervals().end()),
		}
	}

	/// Sample values of one track.
	///
	/// # Errors
	///
	/// Returns [`TileError::TrackOutOfBounds`] if `track >= track_count()`.
	pub fn data(&self, track: usize) -> Result<&[f32], TileError> {
		self.track_data().get(track)
	}

	/// Names of all intervals; `None` for every variant except bed-with-name.
	pub fn names(&self) -> Option<&[String]> {
		match self {
			Tile::BedWithName(t) => Some(t.names()),
			Tile::FixedStep(_) | Tile::VariableStep(_) | Tile::Bed(_) => None,
		}
	}

	pub fn start_position(&self, index: usize) -> Result<i32, TileError> {
		check_index(index, self.size())?;
		Ok(match self {
			Tile::FixedStep(t) => t.start_at(index),
			Tile::VariableStep(t) | Tile::Bed(t) => t.start()[index],
			Tile::BedWithName(t) => t.intervals().start()[index],
		})
	}

	pub fn end_position(&self, index: usize) -> Result<i32, TileError> {
		check_index(index, self.size())?;
		Ok(match self {
			Tile::FixedStep(t) => t.end_at(index),
			Tile::VariableStep(t) | Tile::Bed(t) => t.end()[index],
			Tile::BedWithName(t) => t.intervals().end()[index],
		})
	}

	/// Name of interval `index`, or `Ok(None)` for variants without names.
	pub fn name(&self, index: usize) -> Result<Option<&str>, TileError> {
		check_index(index, self.size())?;
		Ok(self.names().map(|names| names[index].as_str()))
	}

	/// Sample of `track` at position `index`.
	///
	/// # Errors
	///
	/// Returns [`TileError::TrackOutOfBounds`] or [`TileError::IndexOutOfBounds`]; never a
	/// default value.
	pub fn value(&self, track: usize, index: usize) -> Result<f32, TileError> {
		self.track_data().value(track, index, self.size())
	}

	/// Iterates over `(start, end)` of every position.
	pub fn intervals(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
		let (start, end) = (self.start(), self.end());
		(0..self.size()).map(move |i| (start[i], end[i]))
	}

	/// Approximate number of heap bytes held by the tile.
	pub fn heap_size(&self) -> usize {
		match self {
			Tile::FixedStep(t) => t.heap_size(),
			Tile::VariableStep(t) | Tile::Bed(t) => t.heap_size(),
			Tile::BedWithName(t) => t.heap_size(),
		}
	}
}
