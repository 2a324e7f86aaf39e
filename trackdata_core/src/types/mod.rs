//! Byte containers and ranges shared by the tile codec and the data readers/writers.

mod blob;
pub use blob::*;

mod byte_range;
pub use byte_range::*;
