use thiserror::Error;

/// Everything that can go wrong when building, accessing, encoding or decoding a tile.
///
/// Bounds errors are caller mistakes and are never clamped. `CorruptData` is only produced
/// while decoding, and no partially decoded tile is returned alongside it.
#[derive(Debug, Error)]
pub enum TileError {
	#[error("position {index} is out of bounds for a tile with {size} positions")]
	IndexOutOfBounds { index: usize, size: usize },

	#[error("track {track} is out of bounds for a tile with {track_count} tracks")]
	TrackOutOfBounds { track: usize, track_count: usize },

	#[error("invalid tile: {0}")]
	InvalidTile(String),

	#[error("failed to serialize tile: {0:#}")]
	Serialization(anyhow::Error),

	#[error("corrupt tile data: {0}")]
	CorruptData(String),
}

impl TileError {
	pub fn is_bounds_error(&self) -> bool {
		matches!(
			self,
			TileError::IndexOutOfBounds { .. } | TileError::TrackOutOfBounds { .. }
		)
	}

	pub fn is_corrupt_data(&self) -> bool {
		matches!(self, TileError::CorruptData(_))
	}

	/// Decoded values that fail validation mean the input was corrupt.
	pub(crate) fn into_corrupt(self) -> TileError {
		match self {
			TileError::InvalidTile(message) => TileError::CorruptData(message),
			other => other,
		}
	}
}

pub(crate) fn check_index(index: usize, size: usize) -> Result<(), TileError> {
	if index < size {
		Ok(())
	} else {
		Err(TileError::IndexOutOfBounds { index, size })
	}
}
