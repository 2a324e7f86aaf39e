//! Track files built from [`trackdata_core`] tiles: a byte-range based tile reader with a
//! footprint-bounded cache, the track file container, dataset metadata, configuration and the
//! text formats used by the command line tool.

pub mod cache;
pub use cache::TileCache;

pub mod config;
pub use config::Config;

pub mod dataset;
pub use dataset::*;

pub mod text;

mod tile_file;
pub use tile_file::*;

mod track_file;
pub use track_file::*;
