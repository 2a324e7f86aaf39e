use super::{FixedStepTile, IntervalTile, NamedIntervalTile, Tile, TileError, TileType};
use itertools::Itertools;

/// Collects interval records for one tile and picks the most compact encoding for them.
///
/// Records must be pushed in order: starts and ends may not decrease.
///
/// # Examples
///
/// ```rust
/// use trackdata_core::tile::{TileBuilder, TileType};
///
/// let mut builder = TileBuilder::new(1000, 1);
/// builder.push(1000, 1050, &[0.5]).unwrap();
/// builder.push(1050, 1100, &[1.0]).unwrap();
/// assert_eq!(builder.preferred_type(), TileType::FixedStep);
///
/// let tile = builder.build().unwrap();
/// assert_eq!(tile.end_position(1).unwrap(), 1100);
/// ```
#[derive(Clone, Debug)]
pub struct TileBuilder {
	tile_start: i32,
	track_count: usize,
	start: Vec<i32>,
	end: Vec<i32>,
	names: Vec<Option<String>>,
	tracks: Vec<Vec<f32>>,
}

impl TileBuilder {
	pub fn new(tile_start: i32, track_count: usize) -> TileBuilder {
		TileBuilder {
			tile_start,
			track_count,
			start: Vec::new(),
			end: Vec::new(),
			names: Vec::new(),
			tracks: vec![Vec::new(); track_count],
		}
	}

	pub fn tile_start(&self) -> i32 {
		self.tile_start
	}

	pub fn track_count(&self) -> usize {
		self.track_count
	}

	pub fn len(&self) -> usize {
		self.start.len()
	}

	pub fn is_empty(&self) -> bool {
		self.start.is_empty()
	}

	/// Adds an unnamed interval with one value per track.
	///
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] if the record is out of order, ends before it starts,
	/// or does not carry exactly one value per track. The builder is unchanged on error.
	pub fn push(&mut self, start: i32, end: i32, values: &[f32]) -> Result<(), TileError> {
		self.push_record(start, end, None, values)
	}

	/// Adds a named interval, e.g. a gene or exon record.
	pub fn push_named(&mut self, start: i32, end: i32, name: impl Into<String>, values: &[f32]) -> Result<(), TileError> {
		self.push_record(start, end, Some(name.into()), values)
	}

	fn push_record(&mut self, start: i32, end: i32, name: Option<String>, values: &[f32]) -> Result<(), TileError> {
		if values.len() != self.track_count {
			return Err(TileError::InvalidTile(format!(
				"record has {} values, expected {}",
				values.len(),
				self.track_count
			)));
		}
		if end < start {
			return Err(TileError::InvalidTile(format!(
				"record ends at {end} before it starts at {start}"
			)));
		}
		if let (Some(&last_start), Some(&last_end)) = (self.start.last(), self.end.last()) {
			if start < last_start || end < last_end {
				return Err(TileError::InvalidTile(format!(
					"record {start}-{end} is out of order after {last_start}-{last_end}"
				)));
			}
		}

		self.start.push(start);
		self.end.push(end);
		self.names.push(name);
		for (track, &value) in self.tracks.iter_mut().zip(values) {
			track.push(value);
		}
		Ok(())
	}

	fn has_names(&self) -> bool {
		self.names.iter().any(Option::is_some)
	}

	fn common_width(&self) -> Option<i64> {
		self
			.start
			.iter()
			.zip(&self.end)
			.map(|(&s, &e)| i64::from(e) - i64::from(s))
			.all_equal_value()
			.ok()
	}

	fn is_fixed_step(&self) -> bool {
		match self.common_width() {
			Some(width) if width > 0 => {
				self.start.first() == Some(&self.tile_start)
					&& self.start.iter().skip(1).zip(&self.end).all(|(next, previous)| next == previous)
			}
			_ => false,
		}
	}

	/// Whether no record starts before the previous one ends, as in a bedGraph signal.
	fn is_disjoint(&self) -> bool {
		self.start.iter().skip(1).zip(&self.end).all(|(next, previous)| next >= previous)
	}

	/// Most compact encoding that represents every pushed record exactly.
	///
	/// Unnamed records that are not fixed-step prefer [`TileType::VariableStep`] when they do
	/// not overlap, whatever their widths, and [`TileType::Bed`] when they do. An empty builder
	/// prefers [`TileType::Bed`].
	pub fn preferred_type(&self) -> TileType {
		if self.has_names() {
			TileType::BedWithName
		} else if self.is_fixed_step() {
			TileType::FixedStep
		} else if !self.is_empty() && self.is_disjoint() {
			TileType::VariableStep
		} else {
			TileType::Bed
		}
	}

	/// Builds the tile in its [`TileBuilder::preferred_type`].
	pub fn build(self) -> Result<Tile, TileError> {
		let tile_type = self.preferred_type();
		self.build_as(tile_type)
	}

	/// Builds the tile in the requested encoding.
	///
	/// # Errors
	///
	/// Returns [`TileError::InvalidTile`] if the records cannot be represented: fixed-step
	/// requires equal-width contiguous records starting at the tile start, and only
	/// bed-with-name keeps names. Records without a name get an empty one in bed-with-name.
	pub fn build_as(self, tile_type: TileType) -> Result<Tile, TileError> {
		if self.has_names() && !tile_type.has_names() {
			return Err(TileError::InvalidTile(format!("{tile_type} tiles cannot store names")));
		}

		match tile_type {
			TileType::FixedStep => {
				if !self.is_fixed_step() {
					return Err(TileError::InvalidTile(
						"records are not equal-width and contiguous from the tile start".into(),
					));
				}
				let width = i64::from(self.end[0]) - i64::from(self.start[0]);
				let step = i32::try_from(width)
					.map_err(|_| TileError::InvalidTile(format!("step {width} does not fit into i32")))?;
				let size = self.len();
				Ok(Tile::FixedStep(FixedStepTile::new(self.tile_start, step, size, self.tracks)?))
			}
			TileType::VariableStep => Ok(Tile::VariableStep(IntervalTile::new(
				self.tile_start,
				self.start,
				self.end,
				self.tracks,
			)?)),
			TileType::Bed => Ok(Tile::Bed(IntervalTile::new(
				self.tile_start,
				self.start,
				self.end,
				self.tracks,
			)?)),
			TileType::BedWithName => {
				let names = self.names.into_iter().map(Option::unwrap_or_default).collect();
				let intervals = IntervalTile::new(self.tile_start, self.start, self.end, self.tracks)?;
				Ok(Tile::BedWithName(NamedIntervalTile::new(intervals, names)?))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn builder(records: &[(i32, i32)]) -> TileBuilder {
		let mut builder = TileBuilder::new(100, 1);
		for (i, &(start, end)) in records.iter().enumerate() {
			builder.push(start, end, &[i as f32]).unwrap();
		}
		builder
	}

	#[rstest]
	#[case(&[(100, 150), (150, 200), (200, 250)], TileType::FixedStep)]
	#[case(&[(110, 160), (160, 210)], TileType::VariableStep)]
	#[case(&[(100, 140), (150, 190), (210, 250)], TileType::VariableStep)]
	#[case(&[(100, 140), (150, 200), (210, 260)], TileType::VariableStep)]
	#[case(&[(100, 100), (100, 100)], TileType::VariableStep)]
	#[case(&[(100, 200), (150, 250)], TileType::Bed)]
	#[case(&[], TileType::Bed)]
	fn preferred_type(#[case] records: &[(i32, i32)], #[case] expected: TileType) {
		let builder = builder(records);
		assert_eq!(builder.preferred_type(), expected);
		let tile = builder.build().unwrap();
		assert_eq!(tile.tile_type(), expected);
		assert_eq!(tile.intervals().collect::<Vec<_>>(), records.to_vec());
	}

	#[test]
	fn names_select_bed_with_name() {
		let mut builder = TileBuilder::new(5000, 2);
		builder.push_named(5010, 5100, "exon1", &[1.0, 2.0]).unwrap();
		builder.push(5200, 5400, &[3.0, 4.0]).unwrap();
		assert_eq!(builder.preferred_type(), TileType::BedWithName);

		let tile = builder.build().unwrap();
		assert_eq!(tile.name(0).unwrap(), Some("exon1"));
		assert_eq!(tile.name(1).unwrap(), Some(""));
		assert_eq!(tile.data(1).unwrap(), &[2.0, 4.0]);
	}

	#[test]
	fn rejected_records_leave_builder_unchanged() {
		let mut builder = TileBuilder::new(0, 2);
		builder.push(10, 20, &[1.0, 2.0]).unwrap();

		let error = builder.push(30, 40, &[1.0]).unwrap_err();
		assert_eq!(error.to_string(), "invalid tile: record has 1 values, expected 2");
		let error = builder.push(5, 30, &[1.0, 2.0]).unwrap_err();
		assert_eq!(error.to_string(), "invalid tile: record 5-30 is out of order after 10-20");
		assert!(builder.push(50, 40, &[1.0, 2.0]).is_err());
		assert!(builder.push(15, 18, &[1.0, 2.0]).is_err());

		assert_eq!(builder.len(), 1);
		assert_eq!(builder.build().unwrap().data(0).unwrap(), &[1.0]);
	}

	#[test]
	fn build_as_forces_encoding() {
		let records = [(100, 150), (150, 200)];
		for tile_type in [TileType::VariableStep, TileType::Bed, TileType::BedWithName] {
			let tile = builder(&records).build_as(tile_type).unwrap();
			assert_eq!(tile.tile_type(), tile_type);
			assert_eq!(tile.intervals().collect::<Vec<_>>(), records.to_vec());
		}
	}

	#[test]
	fn variable_step_with_varying_widths() {
		let mut builder = TileBuilder::new(100, 1);
		builder.push(100, 140, &[1.5]).unwrap();
		builder.push(150, 200, &[2.25]).unwrap();
		builder.push(210, 260, &[0.0]).unwrap();
		assert_eq!(builder.preferred_type(), TileType::VariableStep);

		let tile = builder.clone().build_as(TileType::VariableStep).unwrap();
		assert_eq!(tile.tile_type(), TileType::VariableStep);
		assert_eq!(tile.value(0, 1).unwrap(), 2.25);
		assert_eq!(tile.end_position(2).unwrap(), 260);
		assert_eq!(builder.build().unwrap(), tile);
	}

	#[test]
	fn overlapping_records_build_as_variable_step() {
		let tile = builder(&[(100, 200), (150, 250)]).build_as(TileType::VariableStep).unwrap();
		assert_eq!(tile.intervals().collect::<Vec<_>>(), vec![(100, 200), (150, 250)]);
	}

	#[test]
	fn build_as_rejects_unrepresentable_records() {
		assert!(builder(&[(100, 140), (150, 190)]).build_as(TileType::FixedStep).is_err());
		assert!(builder(&[(110, 160)]).build_as(TileType::FixedStep).is_err());

		let mut named = TileBuilder::new(0, 0);
		named.push_named(0, 10, "a", &[]).unwrap();
		let error = named.build_as(TileType::Bed).unwrap_err();
		assert_eq!(error.to_string(), "invalid tile: bed tiles cannot store names");
	}
}
