//! Reading and writing individual tile records by byte range.
//!
//! A record is an encoded [`Tile`](trackdata_core::tile::Tile), compressed with the file's
//! [`TileCompression`](trackdata_core::compression::TileCompression). Locating records is left
//! to the caller, usually through a [`TileIndex`](crate::TileIndex).

mod reader;
mod writer;

pub use reader::TileFileReader;
pub use writer::TileFileWriter;
