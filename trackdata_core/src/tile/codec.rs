//! Binary encoding of a single tile.
//!
//! All values are little-endian:
//!
//! ```text
//! u8   tile type tag (0 fixedStep, 1 variableStep, 2 bed, 3 bedWithName)
//! i32  tile start
//! u32  size
//! i32  step                                   fixedStep only
//! i32  start[size], i32 end[size]             all other types
//! u32  track count
//! f32  values[track count][size]              track-major
//! (u32 length, UTF-8 bytes)[size]             bedWithName only
//! ```

use super::{FixedStepTile, IntervalTile, NamedIntervalTile, Tile, TileError, TileType};
use crate::{
	Blob,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
};
use byteorder::LittleEndian;

/// Decoding refuses track counts above this, so a corrupt header cannot trigger huge allocations.
pub const MAX_TRACK_COUNT: u32 = 1 << 16;

/// Largest number of positions in one tile. Fixed-step tiles synthesize their positions, so
/// without this limit a few corrupt bytes could describe billions of them.
pub const MAX_TILE_SIZE: u32 = 1 << 24;

impl Tile {
	/// Serializes the complete tile into `writer`.
	///
	/// # Errors
	///
	/// Returns [`TileError::Serialization`] if the writer does not accept all bytes.
	pub fn write_to<W>(&self, writer: &mut W) -> Result<(), TileError>
	where
		W: ValueWriter<LittleEndian> + ?Sized,
	{
		self.write_fields(writer).map_err(TileError::Serialization)
	}

	fn write_fields<W>(&self, writer: &mut W) -> anyhow::Result<()>
	where
		W: ValueWriter<LittleEndian> + ?Sized,
	{
		anyhow::ensure!(
			self.size() <= MAX_TILE_SIZE as usize,
			"tile size {} exceeds the maximum of {MAX_TILE_SIZE}",
			self.size()
		);
		writer.write_u8(self.tile_type().tag())?;
		writer.write_i32(self.tile_start())?;
		writer.write_u32(self.size() as u32)?;

		match self {
			Tile::FixedStep(t) => writer.write_i32(t.step())?,
			Tile::VariableStep(t) | Tile::Bed(t) => write_positions(writer, t)?,
			Tile::BedWithName(t) => write_positions(writer, t.intervals())?,
		}

		let data = self.track_data();
		writer.write_u32(data.track_count() as u32)?;
		for values in data.iter() {
			writer.write_f32_slice(values)?;
		}

		if let Some(names) = self.names() {
			for name in names {
				writer.write_prefixed_string(name)?;
			}
		}
		Ok(())
	}

	/// Number of bytes [`Tile::write_to`] produces.
	pub fn encoded_len(&self) -> usize {
		let geometry = match self.tile_type() {
			TileType::FixedStep => 4,
			_ => self.size() * 8,
		};
		let values = self.track_count() * self.size() * 4;
		let names = self
			.names()
			.map_or(0, |names| names.iter().map(|n| 4 + n.len()).sum());
		1 + 4 + 4 + geometry + 4 + values + names
	}

	/// Encodes the tile into a new [`Blob`].
	pub fn to_blob(&self) -> Result<Blob, TileError> {
		let mut writer = ValueWriterBlob::<LittleEndian>::with_capacity(self.encoded_len());
		self.write_to(&mut writer)?;
		Ok(writer.into_blob())
	}

	/// Decodes one tile starting at the reader's current position.
	///
	/// The reader is left directly behind the tile, so several tiles can be read in sequence.
	///
	/// # Errors
	///
	/// Returns [`TileError::CorruptData`] for an unknown tag, a truncated buffer, or decoded
	/// values that violate a tile invariant. No partial tile is ever returned.
	pub fn read_from<'a, R>(reader: &mut R) -> Result<Tile, TileError>
	where
		R: ValueReader<'a, LittleEndian> + ?Sized,
	{
		let tag = reader.read_u8().map_err(corrupt("missing tile type"))?;
		let tile_type = TileType::from_tag(tag)?;
		let tile_start = reader.read_i32().map_err(corrupt("truncated tile start"))?;
		let size = reader.read_u32().map_err(corrupt("truncated tile size"))?;
		if size > MAX_TILE_SIZE {
			return Err(TileError::CorruptData(format!(
				"tile size {size} exceeds the maximum of {MAX_TILE_SIZE}"
			)));
		}
		let size = size as usize;

		let tile = match tile_type {
			TileType::FixedStep => {
				let step = reader.read_i32().map_err(corrupt("truncated step"))?;
				let tracks = read_tracks(reader, size)?;
				Tile::FixedStep(FixedStepTile::new(tile_start, step, size, tracks).map_err(TileError::into_corrupt)?)
			}
			TileType::VariableStep => Tile::VariableStep(read_intervals(reader, tile_start, size)?),
			TileType::Bed => Tile::Bed(read_intervals(reader, tile_start, size)?),
			TileType::BedWithName => {
				let intervals = read_intervals(reader, tile_start, size)?;
				let names = (0..size)
					.map(|_| reader.read_prefixed_string())
					.collect::<anyhow::Result<Vec<String>>>()
					.map_err(corrupt("truncated names"))?;
				Tile::BedWithName(NamedIntervalTile::new(intervals, names).map_err(TileError::into_corrupt)?)
			}
		};
		Ok(tile)
	}

	/// Decodes a buffer that holds exactly one tile.
	///
	/// # Errors
	///
	/// Same as [`Tile::read_from`]; trailing bytes after the tile are corrupt data as well.
	pub fn from_blob(blob: &Blob) -> Result<Tile, TileError> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());
		let tile = Tile::read_from(&mut reader)?;
		if reader.has_remaining() {
			return Err(TileError::CorruptData(format!(
				"{} trailing bytes after {} tile",
				reader.remaining(),
				tile.tile_type()
			)));
		}
		Ok(tile)
	}
}

fn corrupt(what: &'static str) -> impl FnOnce(anyhow::Error) -> TileError {
	move |error| TileError::CorruptData(format!("{what}: {error:#}"))
}

fn write_positions<W>(writer: &mut W, intervals: &IntervalTile) -> anyhow::Result<()>
where
	W: ValueWriter<LittleEndian> + ?Sized,
{
	writer.write_i32_slice(intervals.start())?;
	writer.write_i32_slice(intervals.end())
}

fn read_intervals<'a, R>(reader: &mut R, tile_start: i32, size: usize) -> Result<IntervalTile, TileError>
where
	R: ValueReader<'a, LittleEndian> + ?Sized,
{
	let start = reader.read_i32_vec(size).map_err(corrupt("truncated start positions"))?;
	let end = reader.read_i32_vec(size).map_err(corrupt("truncated end positions"))?;
	let tracks = read_tracks(reader, size)?;
	IntervalTile::new(tile_start, start, end, tracks).map_err(TileError::into_corrupt)
}

fn read_tracks<'a, R>(reader: &mut R, size: usize) -> Result<Vec<Vec<f32>>, TileError>
where
	R: ValueReader<'a, LittleEndian> + ?Sized,
{
	let track_count = reader.read_u32().map_err(corrupt("truncated track count"))?;
	if track_count > MAX_TRACK_COUNT {
		return Err(TileError::CorruptData(format!(
			"track count {track_count} exceeds the maximum of {MAX_TRACK_COUNT}"
		)));
	}
	reader
		.ensure_remaining(u64::from(track_count) * size as u64 * 4)
		.map_err(corrupt("truncated values"))?;
	(0..track_count)
		.map(|_| reader.read_f32_vec(size))
		.collect::<anyhow::Result<Vec<_>>>()
		.map_err(corrupt("truncated values"))
}
