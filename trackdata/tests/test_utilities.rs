#![allow(unused)]

use assert_cmd::{Command, cargo};
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "trackdata.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "trackdata";

/// Helper to create a Command for the trackdata binary.
pub fn trackdata_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// Helper to get a temp output file path.
pub fn get_temp_output(filename: &str) -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join(filename);
	(dir, path)
}

/// Writes `content` next to the temp output and returns its path.
pub fn write_input(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
	let path = dir.path().join(filename);
	std::fs::write(&path, content).expect("failed to write input file");
	path
}

/// Encodes `input` into `output` and asserts success.
pub fn encode(input: &Path, output: &Path, extra_args: &[&str]) {
	trackdata_cmd()
		.arg("encode")
		.args(extra_args)
		.args([input.to_str().unwrap(), output.to_str().unwrap()])
		.assert()
		.success();
}
