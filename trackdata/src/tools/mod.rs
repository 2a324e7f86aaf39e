pub mod decode;
pub mod encode;
pub mod probe;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use trackdata::Config;

/// Resolves `filename` against the current directory.
pub fn absolute_path(filename: &str) -> Result<PathBuf> {
	let path = Path::new(filename);
	if path.is_absolute() {
		Ok(path.to_path_buf())
	} else {
		Ok(std::env::current_dir()
			.context("failed to determine the current directory")?
			.join(path))
	}
}

/// Loads the configuration file if one was given.
pub fn load_config(filename: Option<&str>) -> Result<Config> {
	match filename {
		Some(filename) => Config::from_path(&absolute_path(filename)?),
		None => Ok(Config::default()),
	}
}
