//! # vole-data
//!
//! Acquisition, decoding, and batching for ubyte image datasets
//! (MNIST-style distributions).
//!
//! This crate provides:
//! - [`Dataset`] — the four batched collections (train/validation x
//!   images/labels), built atomically from local files or raw bytes
//! - [`Batcher`] / [`BatchPlan`] — drop-remainder batching with one shared
//!   shuffle order per split
//! - [`PixelRange`] — linear pixel normalization into a chosen range
//! - [`OneHotEncoder`] — table-driven one-hot label encoding
//! - [`Source`] / [`StagedFiles`] — compressed-file acquisition and scoped
//!   decompression scratch
//! - [`Variant`] — recognized distributions (MNIST, Fashion-MNIST) and
//!   their canonical constants

pub mod batch;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod onehot;
pub mod scale;
pub mod stage;
pub mod variant;

pub use batch::{BatchPlan, Batcher};
pub use dataset::{Batch, Dataset, LoadOptions, RawSplits, Record};
pub use error::{DataError, Result};
pub use fetch::{fetch_missing, DirSource, Source};
pub use onehot::OneHotEncoder;
pub use scale::PixelRange;
pub use stage::StagedFiles;
pub use variant::{Split, Variant, VariantFiles};
