use super::TileError;
#[cfg(feature = "cli")]
use clap::ValueEnum;
use std::fmt::Display;

/// The interval encoding of a tile. The discriminant is the tag byte written on disk.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileType {
	/// Equal-width, contiguous intervals; positions are not stored.
	#[cfg_attr(feature = "cli", value(name = "fixedStep"))]
	FixedStep = 0,
	/// Explicit intervals without names.
	#[cfg_attr(feature = "cli", value(name = "variableStep"))]
	VariableStep = 1,
	/// Explicit start/end pairs.
	#[cfg_attr(feature = "cli", value(name = "bed"))]
	Bed = 2,
	/// Explicit start/end pairs with a name per interval.
	#[cfg_attr(feature = "cli", value(name = "bedWithName"))]
	BedWithName = 3,
}

impl TileType {
	pub const ALL: [TileType; 4] = [
		TileType::FixedStep,
		TileType::VariableStep,
		TileType::Bed,
		TileType::BedWithName,
	];

	pub fn tag(self) -> u8 {
		self as u8
	}

	/// # Errors
	///
	/// Returns [`TileError::CorruptData`] for an unknown tag.
	pub fn from_tag(tag: u8) -> Result<TileType, TileError> {
		Ok(match tag {
			0 => TileType::FixedStep,
			1 => TileType::VariableStep,
			2 => TileType::Bed,
			3 => TileType::BedWithName,
			_ => return Err(TileError::CorruptData(format!("unknown tile type tag {tag}"))),
		})
	}

	pub fn as_str(self) -> &'static str {
		match self {
			TileType::FixedStep => "fixedStep",
			TileType::VariableStep => "variableStep",
			TileType::Bed => "bed",
			TileType::BedWithName => "bedWithName",
		}
	}

	pub fn has_names(self) -> bool {
		self == TileType::BedWithName
	}

	pub fn stores_positions(self) -> bool {
		self != TileType::FixedStep
	}
}

impl Display for TileType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
