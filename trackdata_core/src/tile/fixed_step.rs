use super::{TileError, TrackData};

/// Equal-width, contiguous intervals starting at `tile_start`.
///
/// Only `tile_start`, `step` and `size` are stored. Position `i` covers
/// `tile_start + i * step .. tile_start + (i + 1) * step`, so no position arrays are ever
/// allocated for this variant.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedStepTile {
	tile_start: i32,
	step: i32,
	size: usize,
	data: TrackData,
}

impl FixedStepTile {
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] if `step` is not positive, if the last end position
	/// does not fit into an `i32`, or if a track does not hold `size` values.
	pub fn new(tile_start: i32, step: i32, size: usize, tracks: Vec<Vec<f32>>) -> Result<FixedStepTile, TileError> {
		if step <= 0 {
			return Err(TileError::InvalidTile(format!("step must be positive, got {step}")));
		}
		if u32::try_from(size).is_err() {
			return Err(TileError::InvalidTile(format!("size {size} does not fit into u32")));
		}
		let last_end = i64::from(tile_start) + size as i64 * i64::from(step);
		if last_end > i64::from(i32::MAX) {
			return Err(TileError::InvalidTile(format!(
				"fixed-step tile starting at {tile_start} with {size} steps of {step} ends beyond the coordinate range"
			)));
		}
		Ok(FixedStepTile {
			tile_start,
			step,
			size,
			data: TrackData::new(tracks, size)?,
		})
	}

	pub fn tile_start(&self) -> i32 {
		self.tile_start
	}

	pub fn step(&self) -> i32 {
		self.step
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn data(&self) -> &TrackData {
		&self.data
	}

	/// Start of position `index`. The caller checks `index < size`, which together with the
	/// range check in `new` keeps the arithmetic inside `i32`.
	pub(crate) fn start_at(&self, index: usize) -> i32 {
		(i64::from(self.tile_start) + index as i64 * i64::from(self.step)) as i32
	}

	pub(crate) fn end_at(&self, index: usize) -> i32 {
		self.start_at(index) + self.step
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.data.heap_size()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positions_are_derived() {
		let tile = FixedStepTile::new(1000, 50, 4, vec![vec![0.0; 4]]).unwrap();
		assert_eq!(tile.start_at(0), 1000);
		assert_eq!(tile.start_at(2), 1100);
		assert_eq!(tile.end_at(2), 1150);
		assert_eq!(tile.end_at(3), 1200);
	}

	#[test]
	fn invalid_step() {
		assert!(FixedStepTile::new(0, 0, 1, vec![]).is_err());
		assert!(FixedStepTile::new(0, -5, 1, vec![]).is_err());
	}

	#[test]
	fn coordinate_overflow() {
		assert!(FixedStepTile::new(i32::MAX - 100, 10, 10, vec![]).is_ok());
		let error = FixedStepTile::new(i32::MAX - 100, 10, 11, vec![]).unwrap_err();
		assert!(error.to_string().contains("ends beyond the coordinate range"));
	}

	#[test]
	fn track_length_mismatch() {
		assert!(FixedStepTile::new(0, 10, 3, vec![vec![1.0, 2.0]]).is_err());
	}
}
