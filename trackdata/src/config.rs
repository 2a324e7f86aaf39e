//! YAML configuration for reading and writing track files.
//!
//! ```yaml
//! cache_size: 67108864   # bytes of decoded tiles kept in memory
//! compression: brotli    # none, gzip or brotli
//! tile_width: 100000     # genomic width of one tile
//! ```
//!
//! Every field is optional; command line arguments override values from the file.

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};
use trackdata_core::compression::TileCompression;

pub const DEFAULT_CACHE_SIZE: usize = 64 * 1024 * 1024;
pub const DEFAULT_TILE_WIDTH: u32 = 100_000;

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Upper bound for the footprint of cached tiles, in bytes.
	#[serde()]
	pub cache_size: Option<usize>,

	/// Compression of tile records in newly written files.
	#[serde()]
	pub compression: Option<String>,

	/// Genomic width covered by one tile when encoding.
	#[serde()]
	pub tile_width: Option<u32>,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open config file {path:?}"))?;
		Config::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse config file {path:?}"))
	}

	pub fn cache_size(&self) -> usize {
		self.cache_size.unwrap_or(DEFAULT_CACHE_SIZE)
	}

	pub fn compression(&self) -> Result<TileCompression> {
		self
			.compression
			.as_deref()
			.map_or(Ok(TileCompression::default()), TileCompression::parse_str)
	}

	pub fn tile_width(&self) -> Result<u32> {
		let width = self.tile_width.unwrap_or(DEFAULT_TILE_WIDTH);
		ensure!(width > 0, "tile_width must be positive");
		Ok(width)
	}

	pub fn override_optional_cache_size(&mut self, cache_size: Option<usize>) {
		if cache_size.is_some() {
			self.cache_size = cache_size;
		}
	}

	pub fn override_optional_compression(&mut self, compression: Option<TileCompression>) {
		if let Some(compression) = compression {
			self.compression = Some(compression.as_str().to_string());
		}
	}

	pub fn override_optional_tile_width(&mut self, tile_width: Option<u32>) {
		if tile_width.is_some() {
			self.tile_width = tile_width;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{NamedTempFile, prelude::*};

	#[test]
	fn defaults() -> Result<()> {
		let config = Config::default();
		assert_eq!(config.cache_size(), DEFAULT_CACHE_SIZE);
		assert_eq!(config.compression()?, TileCompression::Gzip);
		assert_eq!(config.tile_width()?, DEFAULT_TILE_WIDTH);
		Ok(())
	}

	#[test]
	fn from_string() -> Result<()> {
		let config = Config::from_string("cache_size: 1024\ncompression: br\ntile_width: 500\n")?;
		assert_eq!(config.cache_size(), 1024);
		assert_eq!(config.compression()?, TileCompression::Brotli);
		assert_eq!(config.tile_width()?, 500);
		Ok(())
	}

	#[test]
	fn rejects_unknown_fields() {
		let error = Config::from_string("cache: 1\n").unwrap_err();
		assert!(error.to_string().contains("unknown field"));
	}

	#[test]
	fn invalid_values() -> Result<()> {
		assert!(Config::from_string("compression: lzma\n")?.compression().is_err());
		assert!(Config::from_string("tile_width: 0\n")?.tile_width().is_err());
		Ok(())
	}

	#[test]
	fn overrides() -> Result<()> {
		let mut config = Config::from_string("cache_size: 1024\ncompression: none\n")?;
		config.override_optional_cache_size(None);
		config.override_optional_compression(Some(TileCompression::Brotli));
		config.override_optional_tile_width(Some(20));
		assert_eq!(config.cache_size(), 1024);
		assert_eq!(config.compression()?, TileCompression::Brotli);
		assert_eq!(config.tile_width()?, 20);
		Ok(())
	}

	#[test]
	fn from_path() -> Result<()> {
		let file = NamedTempFile::new("trackdata.yaml")?;
		file.write_str("compression: gzip\n")?;
		assert_eq!(Config::from_path(file.path())?.compression()?, TileCompression::Gzip);
		assert!(Config::from_path(&file.path().with_extension("missing")).is_err());
		Ok(())
	}
}
