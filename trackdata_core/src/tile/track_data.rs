use super::{TileError, error::check_index};

/// Per-track sample values of one tile, stored track-major.
///
/// Every track holds exactly one `f32` per tile position. Missing samples are usually `NaN`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackData {
	tracks: Vec<Vec<f32>>,
}

impl TrackData {
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] if a track does not have `size` values.
	pub fn new(tracks: Vec<Vec<f32>>, size: usize) -> Result<TrackData, TileError> {
		if let Some((track, values)) = tracks.iter().enumerate().find(|(_, v)| v.len() != size) {
			return Err(TileError::InvalidTile(format!(
				"track {track} has {} values, expected {size}",
				values.len()
			)));
		}
		Ok(TrackData { tracks })
	}

	pub fn track_count(&self) -> usize {
		self.tracks.len()
	}

	/// Values of one track.
	pub fn get(&self, track: usize) -> Result<&[f32], TileError> {
		self
			.tracks
			.get(track)
			.map(Vec::as_slice)
			.ok_or(TileError::TrackOutOfBounds {
				track,
				track_count: self.tracks.len(),
			})
	}

	pub(crate) fn value(&self, track: usize, index: usize, size: usize) -> Result<f32, TileError> {
		let values = self.get(track)?;
		check_index(index, size)?;
		Ok(values[index])
	}

	pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
		self.tracks.iter().map(Vec::as_slice)
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.tracks.capacity() * size_of::<Vec<f32>>()
			+ self.tracks.iter().map(|t| t.capacity() * size_of::<f32>()).sum::<usize>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_checks_track_lengths() {
		assert!(TrackData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2).is_ok());
		let error = TrackData::new(vec![vec![1.0, 2.0], vec![3.0]], 2).unwrap_err();
		assert_eq!(error.to_string(), "invalid tile: track 1 has 1 values, expected 2");
	}

	#[test]
	fn get_and_value() {
		let data = TrackData::new(vec![vec![1.5, 2.25, 0.0]], 3).unwrap();
		assert_eq!(data.track_count(), 1);
		assert_eq!(data.get(0).unwrap(), &[1.5, 2.25, 0.0]);
		assert_eq!(data.value(0, 1, 3).unwrap(), 2.25);
		assert!(matches!(
			data.get(1),
			Err(TileError::TrackOutOfBounds { track: 1, track_count: 1 })
		));
		assert!(matches!(
			data.value(0, 3, 3),
			Err(TileError::IndexOutOfBounds { index: 3, size: 3 })
		));
	}

	#[test]
	fn no_tracks() {
		let data = TrackData::new(vec![], 10).unwrap();
		assert_eq!(data.track_count(), 0);
		assert_eq!(data.iter().count(), 0);
	}
}
