//! This module defines the `DataReaderTrait`, the positioned byte source tile records are loaded from.
//!
//! # Overview
//!
//! Implementations read an arbitrary [`ByteRange`] without moving a shared cursor, so one
//! reader can serve many concurrent tile requests through `&self`.
//!
//! # Examples
//!
//! ```rust
//! use trackdata_core::{io::{DataReader, DataReaderBlob}, Blob, ByteRange};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let reader: DataReader = Box::new(DataReaderBlob::from(vec![1, 2, 3, 4, 5]));
//!     let partial = reader.read_range(&ByteRange::new(1, 3)).await?;
//!     assert_eq!(partial.as_slice(), &[2, 3, 4]);
//!     Ok(())
//! }
//! ```

use crate::{Blob, ByteRange};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Type alias for a boxed dynamic implementation of the `DataReaderTrait`.
pub type DataReader = Box<dyn DataReaderTrait>;

/// A source of bytes that supports concurrent positioned reads.
#[async_trait]
pub trait DataReaderTrait: Debug + Send + Sync {
	/// Reads exactly the bytes covered by `range`.
	///
	/// # Errors
	///
	/// Returns an error if the range is not fully inside the source.
	async fn read_range(&self, range: &ByteRange) -> Result<Blob>;

	/// Reads the whole source.
	async fn read_all(&self) -> Result<Blob>;

	/// Name of the source, e.g. the file path, used in log and error messages.
	fn get_name(&self) -> &str;
}
