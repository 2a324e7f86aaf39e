//! The `TileCompression` enum: the algorithm a tile record is compressed with.
//!
//! # Examples
//!
//! ```
//! use trackdata_core::compression::TileCompression;
//!
//! let mut filename = String::from("chr1.tile.gz");
//! assert_eq!(TileCompression::from_filename(&mut filename), TileCompression::Gzip);
//! assert_eq!(filename, "chr1.tile");
//! ```

use anyhow::{Result, bail};
#[cfg(feature = "cli")]
use clap::ValueEnum;
use enumset::EnumSetType;
use std::fmt::Display;

/// Enum representing possible compression algorithms.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Debug, EnumSetType, Default, PartialOrd, Ord)]
pub enum TileCompression {
	#[cfg_attr(feature = "cli", value(name = "none", alias = "raw"))]
	Uncompressed,
	#[default]
	#[cfg_attr(feature = "cli", value(alias = "gz"))]
	Gzip,
	#[cfg_attr(feature = "cli", value(alias = "br"))]
	Brotli,
}

impl TileCompression {
	pub fn as_str(&self) -> &'static str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Gzip => "gzip",
			TileCompression::Brotli => "brotli",
		}
	}

	/// File extension, including the dot, or `""` for uncompressed data.
	pub fn extension(&self) -> &'static str {
		match self {
			TileCompression::Uncompressed => "",
			TileCompression::Gzip => ".gz",
			TileCompression::Brotli => ".br",
		}
	}

	/// Determines the compression from the extension of `filename` and strips that extension.
	pub fn from_filename(filename: &mut String) -> TileCompression {
		let compression = if filename.ends_with(".gz") {
			TileCompression::Gzip
		} else if filename.ends_with(".br") {
			TileCompression::Brotli
		} else {
			return TileCompression::Uncompressed;
		};
		filename.truncate(filename.len() - 3);
		compression
	}

	/// Parses names like `gzip`, `gz`, `brotli`, `br`, `none` or `raw`.
	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"br" | "brotli" => TileCompression::Brotli,
			"gz" | "gzip" => TileCompression::Gzip,
			"none" | "raw" => TileCompression::Uncompressed,
			_ => bail!("Unknown tile compression {value:?}. Expected brotli, gzip or none"),
		})
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
