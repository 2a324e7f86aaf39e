//! bedGraph and BED-like text, the input of `encode` and the output of `decode`.
//!
//! Each data line is `chrom start end [name] value...`, separated by tabs or spaces. The name
//! column is present when the fourth column is not a number. Empty lines, comments (`#`) and
//! `track` / `browser` lines are skipped; the `name=` of a `track` line is kept.
//!
//! Records must be sorted: grouped by chromosome and by start within a chromosome.

use anyhow::{Context, Result, anyhow, bail, ensure};
use std::io::{BufRead, Write};
use trackdata_core::tile::{Tile, TileBuilder, TileType};

#[derive(Clone, Debug, PartialEq)]
pub struct BedRecord {
	pub chrom: String,
	pub start: i32,
	pub end: i32,
	pub name: Option<String>,
	pub values: Vec<f32>,
}

/// Everything read from one text input.
#[derive(Debug, Default, PartialEq)]
pub struct TextInput {
	pub track_name: Option<String>,
	pub records: Vec<BedRecord>,
}

impl TextInput {
	/// Number of value columns, which is the same for every record.
	pub fn track_count(&self) -> usize {
		self.records.first().map_or(0, |r| r.values.len())
	}
}

pub fn parse_value(text: &str) -> Result<f32> {
	match text {
		"." | "NA" => Ok(f32::NAN),
		_ => text.parse::<f32>().map_err(|_| anyhow!("invalid value {text:?}")),
	}
}

/// Parses one data line. Returns `None` for lines that hold no record.
pub fn parse_line(line: &str) -> Result<Option<BedRecord>> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') || line.starts_with("track") || line.starts_with("browser") {
		return Ok(None);
	}

	let columns: Vec<&str> = line.split_whitespace().collect();
	ensure!(
		columns.len() >= 3,
		"expected at least 3 columns (chrom, start, end), found {}",
		columns.len()
	);

	let start = columns[1]
		.parse::<i32>()
		.with_context(|| format!("invalid start {:?}", columns[1]))?;
	let end = columns[2]
		.parse::<i32>()
		.with_context(|| format!("invalid end {:?}", columns[2]))?;
	ensure!(end >= start, "interval ends at {end} before it starts at {start}");

	let mut rest = &columns[3..];
	let mut name = None;
	if let Some(first) = rest.first() {
		if parse_value(first).is_err() {
			name = Some((*first).to_string());
			rest = &rest[1..];
		}
	}

	Ok(Some(BedRecord {
		chrom: columns[0].to_string(),
		start,
		end,
		name,
		values: rest.iter().map(|v| parse_value(v)).collect::<Result<_>>()?,
	}))
}

fn parse_track_name(line: &str) -> Option<String> {
	let rest = line.trim().strip_prefix("track")?;
	let value = rest.split("name=").nth(1)?;
	let name = match value.strip_prefix('"') {
		Some(quoted) => quoted.split('"').next()?,
		None => value.split_whitespace().next()?,
	};
	Some(name.to_string())
}

/// Reads all records, checking that every record has the same number of values.
pub fn read_text(reader: impl BufRead) -> Result<TextInput> {
	let mut input = TextInput::default();
	for (number, line) in reader.lines().enumerate() {
		let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
		if input.track_name.is_none() {
			input.track_name = parse_track_name(&line);
		}
		let Some(record) = parse_line(&line).with_context(|| format!("line {}: {line:?}", number + 1))? else {
			continue;
		};
		if let Some(first) = input.records.first() {
			ensure!(
				record.values.len() == first.values.len(),
				"line {}: expected {} values, found {}",
				number + 1,
				first.values.len(),
				record.values.len()
			);
		}
		input.records.push(record);
	}
	Ok(input)
}

/// Groups sorted records into tiles of `tile_width` bases.
///
/// A record belongs to the tile that contains its start. With `tile_type`, every tile is built
/// in that encoding, otherwise each tile picks its most compact one.
pub fn build_tiles(
	records: &[BedRecord],
	track_count: usize,
	tile_width: u32,
	tile_type: Option<TileType>,
) -> Result<Vec<(String, Tile)>> {
	ensure!(tile_width > 0, "tile width must be positive");
	let width = i64::from(tile_width);

	let mut tiles: Vec<(String, Tile)> = Vec::new();
	let mut current: Option<(String, TileBuilder)> = None;
	let mut finished_chroms: Vec<String> = Vec::new();

	let finish = |chrom: String, builder: TileBuilder, tiles: &mut Vec<(String, Tile)>| -> Result<()> {
		let tile_start = builder.tile_start();
		let tile = match tile_type {
			Some(tile_type) => builder.build_as(tile_type),
			None => builder.build(),
		}
		.with_context(|| format!("failed to build tile {chrom}:{tile_start}"))?;
		tiles.push((chrom, tile));
		Ok(())
	};

	for record in records {
		let tile_start = (i64::from(record.start).div_euclid(width) * width) as i32;

		let same_tile = matches!(&current, Some((chrom, builder)) if *chrom == record.chrom && builder.tile_start() == tile_start);
		if !same_tile {
			if let Some((chrom, builder)) = current.take() {
				if chrom != record.chrom {
					finished_chroms.push(chrom.clone());
				} else if builder.tile_start() > tile_start {
					bail!("records of {chrom} are not sorted: {} follows position {}", record.start, builder.tile_start());
				}
				finish(chrom, builder, &mut tiles)?;
			}
			if finished_chroms.contains(&record.chrom) {
				bail!("records of {} are not grouped by chromosome", record.chrom);
			}
			current = Some((record.chrom.clone(), TileBuilder::new(tile_start, track_count)));
		}

		if let Some((chrom, builder)) = current.as_mut() {
			let result = match &record.name {
				Some(name) => builder.push_named(record.start, record.end, name.as_str(), &record.values),
				None => builder.push(record.start, record.end, &record.values),
			};
			result.with_context(|| format!("invalid record at {chrom}:{}-{}", record.start, record.end))?;
		}
	}

	if let Some((chrom, builder)) = current {
		finish(chrom, builder, &mut tiles)?;
	}
	Ok(tiles)
}

/// Writes the records of `tile` as tab-separated lines.
pub fn write_tile(writer: &mut impl Write, chrom: &str, tile: &Tile) -> Result<()> {
	write_records(writer, chrom, tile, |_, _| true)
}

/// Writes only the records of `tile` that overlap `start..end`.
///
/// Zero-width records count as overlapping when they lie inside the region.
pub fn write_tile_region(writer: &mut impl Write, chrom: &str, tile: &Tile, start: i32, end: i32) -> Result<()> {
	write_records(writer, chrom, tile, |s, e| s < end && (e > start || s >= start))
}

fn write_records(writer: &mut impl Write, chrom: &str, tile: &Tile, keep: impl Fn(i32, i32) -> bool) -> Result<()> {
	for (index, (start, end)) in tile.intervals().enumerate() {
		if !keep(start, end) {
			continue;
		}
		write!(writer, "{chrom}\t{start}\t{end}")?;
		match tile.name(index)? {
			Some(name) if !name.is_empty() => write!(writer, "\t{name}")?,
			_ => {}
		}
		for track in 0..tile.track_count() {
			write!(writer, "\t{}", tile.value(track, index)?)?;
		}
		writeln!(writer)?;
	}
	Ok(())
}
