// Record decoding — header skip + fixed-size partitioning

use log::warn;

use crate::error::IdxError;
use crate::format::{RecordFormat, IDX1_MAGIC, IDX3_MAGIC};

/// What to do when the payload is not a whole number of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Drop the trailing partial record (logged, never silent).
    #[default]
    Truncate,
    /// Fail with [`IdxError::TrailingBytes`].
    Strict,
}

/// Split a decompressed ubyte file into per-record byte spans.
///
/// Skips `format.header_len` bytes and cuts the rest into
/// `format.record_len`-sized spans borrowed from `bytes`. Every returned
/// span has exactly `record_len` bytes; a ragged tail is handled per
/// `tail`. Fails with [`IdxError::TooShort`] when the file cannot even hold
/// its header.
pub fn records(
    bytes: &[u8],
    format: RecordFormat,
    tail: TailPolicy,
) -> Result<Vec<&[u8]>, IdxError> {
    if format.record_len == 0 {
        return Err(IdxError::ZeroRecordLen);
    }
    if bytes.len() < format.header_len {
        return Err(IdxError::TooShort {
            len: bytes.len(),
            header_len: format.header_len,
        });
    }

    let payload = &bytes[format.header_len..];
    let chunks = payload.chunks_exact(format.record_len);
    let remainder = chunks.remainder().len();
    if remainder != 0 {
        match tail {
            TailPolicy::Strict => {
                return Err(IdxError::TrailingBytes {
                    remainder,
                    record_len: format.record_len,
                })
            }
            TailPolicy::Truncate => {
                warn!(
                    "dropping {remainder} trailing bytes that do not fill a {}-byte record",
                    format.record_len
                );
            }
        }
    }

    Ok(chunks.collect())
}

// Builder helpers

/// Assemble well-formed IDX3 image bytes (big-endian header + pixel payload).
pub fn build_idx3_bytes(images: &[&[u8]], rows: u32, cols: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + images.len() * (rows * cols) as usize);
    for word in [IDX3_MAGIC, images.len() as u32, rows, cols] {
        buf.extend_from_slice(&word.to_be_bytes());
    }
    for img in images {
        buf.extend_from_slice(img);
    }
    buf
}

/// Assemble well-formed IDX1 label bytes.
pub fn build_idx1_bytes(labels: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + labels.len());
    for word in [IDX1_MAGIC, labels.len() as u32] {
        buf.extend_from_slice(&word.to_be_bytes());
    }
    buf.extend_from_slice(labels);
    buf
}
