use super::{absolute_path, load_config};
use anyhow::{Context, Result, ensure};
use log::info;
use trackdata::{Dataset, TrackFileWriter, text};
use trackdata_core::{
	Blob,
	compression::{TileCompression, decompress},
	io::DataWriterFile,
	tile::TileType,
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// bedGraph or BED-like text file, may be compressed (*.gz, *.br)
	#[arg()]
	input_file: String,

	/// track file to create
	#[arg()]
	output_file: String,

	/// YAML configuration file
	#[arg(long, value_name = "FILE")]
	config: Option<String>,

	/// compression of the tile records
	#[arg(long, short, value_enum, display_order = 1)]
	compress: Option<TileCompression>,

	/// genomic width covered by one tile
	#[arg(long, value_name = "int", display_order = 1)]
	tile_width: Option<u32>,

	/// store every tile in this encoding instead of the most compact one
	#[arg(long, value_enum, display_order = 1)]
	tile_type: Option<TileType>,

	/// id of the dataset
	#[arg(long, default_value = "dataset", display_order = 2)]
	dataset_id: String,

	/// name of the dataset, defaults to the name of the `track` line
	#[arg(long, display_order = 2)]
	name: Option<String>,

	/// genome assembly the coordinates refer to
	#[arg(long, default_value = "unknown", display_order = 2)]
	genome: String,

	/// comma separated track names, one per value column
	#[arg(long, value_delimiter = ',', display_order = 2)]
	track_names: Vec<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("encode {:?} to {:?}", arguments.input_file, arguments.output_file);

	let mut config = load_config(arguments.config.as_deref())?;
	config.override_optional_compression(arguments.compress);
	config.override_optional_tile_width(arguments.tile_width);

	let mut input_name = arguments.input_file.clone();
	let input_compression = TileCompression::from_filename(&mut input_name);
	let blob = Blob::load_from_file(&absolute_path(&arguments.input_file)?)?;
	let blob = decompress(blob, input_compression)?;
	let input = text::read_text(blob.as_slice()).with_context(|| format!("failed to parse {:?}", arguments.input_file))?;

	let track_count = input.track_count();
	let track_names = track_names(arguments, input.track_name.as_deref(), track_count)?;
	let dataset_name = arguments.name.clone().or(input.track_name.clone()).unwrap_or_default();
	let dataset = Dataset::new(&arguments.dataset_id, dataset_name, &arguments.genome).with_tracks(&track_names);

	let tiles = text::build_tiles(&input.records, track_count, config.tile_width()?, arguments.tile_type)?;
	info!(
		"read {} records with {track_count} tracks into {} tiles",
		input.records.len(),
		tiles.len()
	);

	let mut file = DataWriterFile::from_path(&absolute_path(&arguments.output_file)?)?;
	let mut writer = TrackFileWriter::new(&mut file, &dataset, config.compression()?, config.tile_width()?)?;
	for (chrom, tile) in &tiles {
		writer.write_tile(chrom, tile)?;
	}
	writer.finish()?;

	eprintln!("finished encoding {} tiles", tiles.len());
	Ok(())
}

fn track_names(arguments: &Subcommand, track_name: Option<&str>, track_count: usize) -> Result<Vec<String>> {
	if !arguments.track_names.is_empty() {
		ensure!(
			arguments.track_names.len() == track_count,
			"got {} track names for {track_count} value columns",
			arguments.track_names.len()
		);
		return Ok(arguments.track_names.clone());
	}
	Ok(match (track_name, track_count) {
		(Some(name), 1) => vec![name.to_string()],
		_ => (0..track_count).map(|i| format!("track{i}")).collect(),
	})
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use anyhow::Result;
	use assert_fs::{TempDir, prelude::*};

	#[test]
	fn encode_bedgraph() -> Result<()> {
		let dir = TempDir::new()?;
		let input = dir.child("signal.bedgraph");
		input.write_str("track name=signal\nchr1\t0\t10\t1\nchr1\t10\t20\t2\n")?;
		let output = dir.child("signal.tracks");

		run_command(vec![
			"trackdata",
			"encode",
			input.path().to_str().unwrap(),
			output.path().to_str().unwrap(),
			"--compress",
			"brotli",
		])?;
		output.assert(predicates::path::is_file());
		Ok(())
	}

	#[test]
	fn wrong_track_name_count() -> Result<()> {
		let dir = TempDir::new()?;
		let input = dir.child("signal.bedgraph");
		input.write_str("chr1\t0\t10\t1\t2\n")?;

		let error = run_command(vec![
			"trackdata",
			"encode",
			input.path().to_str().unwrap(),
			dir.child("out.tracks").path().to_str().unwrap(),
			"--track-names",
			"a,b,c",
		])
		.unwrap_err();
		assert_eq!(error.to_string(), "got 3 track names for 2 value columns");
		Ok(())
	}
}
