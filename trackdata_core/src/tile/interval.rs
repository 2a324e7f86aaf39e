use super::{TileError, TrackData};
use itertools::Itertools;

/// Intervals with explicit start and end coordinates, used by the variable-step and bed variants.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTile {
	tile_start: i32,
	start: Vec<i32>,
	end: Vec<i32>,
	data: TrackData,
}

impl IntervalTile {
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] if `start`, `end` and the tracks differ in length,
	/// if an interval ends before it starts, or if starts or ends decrease.
	pub fn new(tile_start: i32, start: Vec<i32>, end: Vec<i32>, tracks: Vec<Vec<f32>>) -> Result<IntervalTile, TileError> {
		let size = start.len();
		if end.len() != size {
			return Err(TileError::InvalidTile(format!(
				"{size} start positions but {} end positions",
				end.len()
			)));
		}
		if u32::try_from(size).is_err() {
			return Err(TileError::InvalidTile(format!("size {size} does not fit into u32")));
		}
		if let Some(index) = (0..size).find(|&i| end[i] < start[i]) {
			return Err(TileError::InvalidTile(format!(
				"interval {index} ends at {} before it starts at {}",
				end[index], start[index]
			)));
		}
		check_non_decreasing("start", &start)?;
		check_non_decreasing("end", &end)?;

		Ok(IntervalTile {
			tile_start,
			data: TrackData::new(tracks, size)?,
			start,
			end,
		})
	}

	pub fn tile_start(&self) -> i32 {
		self.tile_start
	}

	pub fn size(&self) -> usize {
		self.start.len()
	}

	pub fn start(&self) -> &[i32] {
		&self.start
	}

	pub fn end(&self) -> &[i32] {
		&self.end
	}

	pub fn data(&self) -> &TrackData {
		&self.data
	}

	pub(crate) fn heap_size(&self) -> usize {
		(self.start.capacity() + self.end.capacity()) * size_of::<i32>() + self.data.heap_size()
	}
}

fn check_non_decreasing(what: &str, positions: &[i32]) -> Result<(), TileError> {
	match positions.iter().tuple_windows().position(|(a, b)| b < a) {
		None => Ok(()),
		Some(index) => Err(TileError::InvalidTile(format!(
			"{what} positions decrease at index {}: {} after {}",
			index + 1,
			positions[index + 1],
			positions[index]
		))),
	}
}

/// Bed intervals that carry one name per interval, e.g. gene or exon records.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedIntervalTile {
	intervals: IntervalTile,
	names: Vec<String>,
}

impl NamedIntervalTile {
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] unless there is exactly one name per interval.
	pub fn new(intervals: IntervalTile, names: Vec<String>) -> Result<NamedIntervalTile, TileError> {
		if names.len() != intervals.size() {
			return Err(TileError::InvalidTile(format!(
				"{} names for {} intervals",
				names.len(),
				intervals.size()
			)));
		}
		Ok(NamedIntervalTile { intervals, names })
	}

	pub fn intervals(&self) -> &IntervalTile {
		&self.intervals
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.intervals.heap_size()
			+ self.names.capacity() * size_of::<String>()
			+ self.names.iter().map(String::capacity).sum::<usize>()
	}
}
