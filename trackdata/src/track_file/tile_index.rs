//! The flat index that maps chromosome regions to tile records.
//!
//! Entries keep the order tiles were written in. Every record of a tile starts inside
//! `tile_start..tile_start + tile_width`, but may end further right; `max_end` stores the
//! largest end so overlap queries do not miss long intervals.

use anyhow::{Context, Result, ensure};
use byteorder::LittleEndian;
use itertools::Itertools;
use trackdata_core::{
	Blob, ByteRange,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
	tile::Tile,
};

#[derive(Clone, Debug, PartialEq)]
pub struct IndexEntry {
	pub chrom: String,
	pub tile_start: i32,
	pub max_end: i32,
	pub range: ByteRange,
}

impl IndexEntry {
	pub fn new(chrom: &str, tile: &Tile, range: ByteRange) -> IndexEntry {
		let max_end = tile.end().iter().copied().max().unwrap_or(tile.tile_start());
		IndexEntry {
			chrom: chrom.to_string(),
			tile_start: tile.tile_start(),
			max_end,
			range,
		}
	}

	/// Whether this tile may hold records overlapping `start..end`.
	pub fn overlaps(&self, start: i32, end: i32, tile_width: u32) -> bool {
		let window_end = i64::from(self.tile_start) + i64::from(tile_width);
		i64::from(start) < window_end.max(i64::from(self.max_end)) && self.tile_start < end
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileIndex {
	entries: Vec<IndexEntry>,
}

impl TileIndex {
	pub fn new_empty() -> TileIndex {
		TileIndex::default()
	}

	pub fn add(&mut self, entry: IndexEntry) {
		self.entries.push(entry);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
		self.entries.iter()
	}

	/// Chromosome names in the order they first appear.
	pub fn chromosomes(&self) -> Vec<&str> {
		self.entries.iter().map(|e| e.chrom.as_str()).unique().collect()
	}

	/// Entries of `chrom` whose records may overlap `start..end`.
	pub fn query<'a>(&'a self, chrom: &'a str, start: i32, end: i32, tile_width: u32) -> impl Iterator<Item = &'a IndexEntry> {
		self
			.entries
			.iter()
			.filter(move |e| e.chrom == chrom && e.overlaps(start, end, tile_width))
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_u32(u32::try_from(self.entries.len()).context("too many index entries")?)?;
		for entry in &self.entries {
			writer.write_prefixed_string(&entry.chrom)?;
			writer.write_i32(entry.tile_start)?;
			writer.write_i32(entry.max_end)?;
			writer.write_range(&entry.range)?;
		}
		Ok(writer.into_blob())
	}

	pub fn from_blob(blob: &Blob) -> Result<TileIndex> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());
		let count = reader.read_u32().context("failed to read index length")?;
		// every entry takes at least 28 bytes
		reader.ensure_remaining(u64::from(count) * 28)?;

		let entries = (0..count)
			.map(|i| read_entry(&mut reader).with_context(|| format!("failed to read index entry {i}")))
			.collect::<Result<Vec<_>>>()?;
		ensure!(!reader.has_remaining(), "unexpected bytes after the tile index");

		Ok(TileIndex { entries })
	}
}

fn read_entry<'a>(reader: &mut impl ValueReader<'a, LittleEndian>) -> Result<IndexEntry> {
	Ok(IndexEntry {
		chrom: reader.read_prefixed_string()?,
		tile_start: reader.read_i32()?,
		max_end: reader.read_i32()?,
		range: reader.read_range()?,
	})
}
