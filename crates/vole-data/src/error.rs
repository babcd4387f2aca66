use std::io;
use std::path::PathBuf;

use vole_idx::IdxError;

/// All errors that can occur while acquiring, decoding, and batching a
/// dataset.
///
/// A single enum across the crate keeps propagation simple: any failure
/// aborts dataset construction and surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A source failed to produce a compressed input file.
    #[error("failed to acquire {name}: {source}")]
    Acquisition { name: String, source: io::Error },

    /// Neither the plain nor the `.gz` form of a required file exists.
    #[error("dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A file's byte layout could not be partitioned into records.
    #[error("malformed file {name}: {source}")]
    Malformed { name: String, source: IdxError },

    /// A label byte outside `[0, classes)`.
    #[error("label {label} out of range for {classes} classes")]
    InvalidLabel { label: u8, classes: usize },

    /// Batch size must be positive.
    #[error("batch size must be positive")]
    InvalidBatchSize,

    /// Pixel range bounds in the wrong order.
    #[error("invalid pixel range: min {min} must be less than max {max}")]
    InvalidRange { min: f32, max: f32 },

    /// Class count must be positive.
    #[error("number of classes must be positive")]
    ZeroClasses,

    /// A batch plan applied to a collection it was not drawn for.
    #[error("batch plan covers {expected} records, got {got}")]
    PlanMismatch { expected: usize, got: usize },

    /// Image and label files of one split disagree on record count.
    #[error("count mismatch: {images} images vs {labels} labels")]
    CountMismatch { images: usize, labels: usize },

    /// Underlying file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;
