//! # vole-idx
//!
//! Byte-layout decoding for ubyte dataset files (the IDX format that
//! MNIST-style distributions use): a fixed-size header followed by
//! back-to-back fixed-size records.
//!
//! This crate only handles layout. Header contents are skipped, never
//! interpreted, and records come back as borrowed byte spans for the caller
//! to turn into numbers:
//!
//! ```ignore
//! let format = RecordFormat::idx3_images(784);
//! let images = records(&bytes, format, TailPolicy::Truncate)?;
//! ```

pub mod decode;
pub mod error;
pub mod format;

pub use decode::{build_idx1_bytes, build_idx3_bytes, records, TailPolicy};
pub use error::IdxError;
pub use format::{RecordFormat, IDX1_MAGIC, IDX3_MAGIC};
