//! Core types for tiled genomic track data: tiles and their binary encoding, compression, and
//! byte-level readers and writers.

pub mod compression;

pub mod io;

pub mod tile;

pub mod types;
pub use types::*;
