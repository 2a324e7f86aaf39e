//! Identity of the data a track file was computed from.
//!
//! A [`Dataset`] groups the [`Readset`]s (one per track) that share a reference genome. Track
//! files store the dataset as YAML next to the tile index, so `probe` can describe a file
//! without decoding any tile.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
	id: String,
	name: String,
	genome_id: String,
	#[serde(default)]
	readsets: Vec<Readset>,
}

impl Dataset {
	pub fn new(id: impl Into<String>, name: impl Into<String>, genome_id: impl Into<String>) -> Dataset {
		Dataset {
			id: id.into(),
			name: name.into(),
			genome_id: genome_id.into(),
			readsets: Vec::new(),
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn genome_id(&self) -> &str {
		&self.genome_id
	}

	pub fn readsets(&self) -> &[Readset] {
		&self.readsets
	}

	pub fn set_readsets(&mut self, readsets: Vec<Readset>) {
		self.readsets = readsets;
	}

	/// Adds one readset per track name, with ids `{dataset id}.{index}`.
	pub fn with_tracks<S: AsRef<str>>(mut self, track_names: &[S]) -> Dataset {
		self.readsets = track_names
			.iter()
			.enumerate()
			.map(|(index, name)| Readset::new(format!("{}.{index}", self.id), name.as_ref(), &self.id))
			.collect();
		self
	}
}

/// One sample within a [`Dataset`]; a track file holds one track per readset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Readset {
	id: String,
	name: String,
	dataset_id: String,
}

impl Readset {
	pub fn new(id: impl Into<String>, name: impl Into<String>, dataset_id: impl Into<String>) -> Readset {
		Readset {
			id: id.into(),
			name: name.into(),
			dataset_id: dataset_id.into(),
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn dataset_id(&self) -> &str {
		&self.dataset_id
	}
}
