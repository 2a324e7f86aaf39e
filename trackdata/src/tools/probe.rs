use super::{absolute_path, load_config};
use anyhow::Result;
use clap::ArgAction::Count;
use itertools::Itertools;
use std::collections::BTreeMap;
use trackdata::TrackFileReader;
use trackdata_core::tile::TileType;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// track file you want to probe
	#[arg(required = true)]
	input_file: String,

	/// YAML configuration file
	#[arg(long, value_name = "FILE")]
	config: Option<String>,

	/// deep scan
	/// -d decodes every tile and counts tile types and positions
	#[arg(long, short, action = Count, verbatim_doc_comment)]
	deep: u8,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe {:?}", arguments.input_file);

	let config = load_config(arguments.config.as_deref())?;
	let reader = TrackFileReader::open_path(&absolute_path(&arguments.input_file)?, config.cache_size()).await?;

	let dataset = reader.dataset();
	println!("dataset: {} ({:?})", dataset.id(), dataset.name());
	println!("genome: {}", dataset.genome_id());
	println!("readsets: {}", dataset.readsets().iter().map(|r| r.name()).join(", "));
	println!("compression: {}", reader.compression());
	println!("tile width: {}", reader.tile_width());

	let counts = reader.index().iter().counts_by(|entry| entry.chrom.as_str());
	println!("tiles: {}", reader.index().len());
	for chrom in reader.index().chromosomes() {
		println!("  {chrom}: {}", counts.get(chrom).copied().unwrap_or(0));
	}

	if arguments.deep > 0 {
		let mut types: BTreeMap<TileType, usize> = BTreeMap::new();
		let mut positions = 0usize;
		for entry in reader.index().iter() {
			let tile = reader.get_tile(entry).await?;
			*types.entry(tile.tile_type()).or_default() += 1;
			positions += tile.size();
		}
		println!("positions: {positions}");
		for (tile_type, count) in types {
			println!("  {tile_type}: {count}");
		}
	}

	Ok(())
}
