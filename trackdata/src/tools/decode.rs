use super::{absolute_path, load_config};
use anyhow::{Context, Result, bail};
use std::{
	fs::File,
	io::{BufWriter, Write},
};
use trackdata::{TrackFileReader, text};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// track file to decode
	#[arg()]
	input_file: String,

	/// text file to write, prints to stdout if omitted
	#[arg()]
	output_file: Option<String>,

	/// YAML configuration file
	#[arg(long, value_name = "FILE")]
	config: Option<String>,

	/// only decode tiles overlapping a region, e.g. "chr1" or "chr1:10000-20000"
	#[arg(long, short, value_name = "chrom[:start-end]")]
	region: Option<String>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let config = load_config(arguments.config.as_deref())?;
	let reader = TrackFileReader::open_path(&absolute_path(&arguments.input_file)?, config.cache_size()).await?;

	let mut output: Box<dyn Write> = match &arguments.output_file {
		Some(filename) => {
			let path = absolute_path(filename)?;
			Box::new(BufWriter::new(
				File::create(&path).with_context(|| format!("failed to create {path:?}"))?,
			))
		}
		None => Box::new(BufWriter::new(std::io::stdout().lock())),
	};

	if let Some(region) = &arguments.region {
		let (chrom, start, end) = parse_region(region)?;
		for (entry, tile) in reader.query(&chrom, start, end).await? {
			text::write_tile_region(&mut output, &entry.chrom, &tile, start, end)?;
		}
	} else {
		for entry in reader.index().iter() {
			let tile = reader.get_tile(entry).await?;
			text::write_tile(&mut output, &entry.chrom, &tile)?;
		}
	}
	output.flush()?;
	Ok(())
}

/// Parses `chrom` or `chrom:start-end`.
fn parse_region(region: &str) -> Result<(String, i32, i32)> {
	let Some((chrom, range)) = region.rsplit_once(':') else {
		return Ok((region.to_string(), i32::MIN, i32::MAX));
	};
	let Some((start, end)) = range.split_once('-') else {
		bail!("region {region:?} must look like chrom:start-end");
	};
	let start = start.replace(',', "").parse::<i32>().with_context(|| format!("invalid start in region {region:?}"))?;
	let end = end.replace(',', "").parse::<i32>().with_context(|| format!("invalid end in region {region:?}"))?;
	if end <= start {
		bail!("region {region:?} is empty");
	}
	Ok((chrom.to_string(), start, end))
}
