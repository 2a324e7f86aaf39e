//! Compression of encoded tile records.
//!
//! Tile records are usually stored compressed. [`TileCompression`] names the algorithm, and
//! [`compress`] / [`decompress`] apply it to a [`Blob`].
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::{compression::*, Blob};
//!
//! let data = Blob::from(vec![7u8; 1000]);
//! let packed = compress(data.clone(), TileCompression::Gzip).unwrap();
//! assert!(packed.len() < data.len());
//! assert_eq!(decompress(packed, TileCompression::Gzip).unwrap(), data);
//! ```

mod tile_compression;
pub use tile_compression::*;

use crate::Blob;
use anyhow::{Context, Result};
use brotli::{BrotliCompress, BrotliDecompress, enc::BrotliEncoderParams};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::{Cursor, Read};

/// Compresses `data` with the given algorithm.
pub fn compress(data: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(data),
		TileCompression::Gzip => compress_gzip(&data),
		TileCompression::Brotli => compress_brotli(&data),
	}
}

/// Reverses [`compress`].
///
/// # Errors
///
/// Returns an error if `data` is not a valid stream of the given algorithm.
pub fn decompress(data: Blob, compression: TileCompression) -> Result<Blob> {
	match compression {
		TileCompression::Uncompressed => Ok(data),
		TileCompression::Gzip => decompress_gzip(&data),
		TileCompression::Brotli => decompress_brotli(&data),
	}
	.with_context(|| format!("failed to decompress {compression} data"))
}

pub fn compress_gzip(data: &Blob) -> Result<Blob> {
	let mut result: Vec<u8> = Vec::new();
	GzEncoder::new(data.as_slice(), flate2::Compression::default()).read_to_end(&mut result)?;
	Ok(Blob::from(result))
}

pub fn decompress_gzip(data: &Blob) -> Result<Blob> {
	let mut result: Vec<u8> = Vec::new();
	GzDecoder::new(data.as_slice()).read_to_end(&mut result)?;
	Ok(Blob::from(result))
}

pub fn compress_brotli(data: &Blob) -> Result<Blob> {
	let params = BrotliEncoderParams {
		quality: 9,
		lgwin: 19,
		size_hint: data.len() as usize,
		..Default::default()
	};
	let mut input = Cursor::new(data.as_slice());
	let mut output: Vec<u8> = Vec::new();
	BrotliCompress(&mut input, &mut output, &params)?;
	Ok(Blob::from(output))
}

pub fn decompress_brotli(data: &Blob) -> Result<Blob> {
	let mut input = Cursor::new(data.as_slice());
	let mut output: Vec<u8> = Vec::new();
	BrotliDecompress(&mut input, &mut output)?;
	Ok(Blob::from(output))
}
