// Record formats — header and record sizes as configuration, not literals

/// Magic number of an IDX3 image file.
pub const IDX3_MAGIC: u32 = 2051;
/// Magic number of an IDX1 label file.
pub const IDX1_MAGIC: u32 = 2049;

/// Byte layout of one ubyte-encoded dataset file: a fixed-size header
/// followed by back-to-back fixed-size records.
///
/// The decoder skips `header_len` bytes without reading them; record counts
/// come from the payload itself, not from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    /// Bytes to skip before the first record.
    pub header_len: usize,
    /// Bytes per record; must be non-zero to decode.
    pub record_len: usize,
}

impl RecordFormat {
    /// IDX3 image files: 16-byte header (magic, count, rows, cols), then
    /// `pixel_count` bytes per image.
    pub const fn idx3_images(pixel_count: usize) -> Self {
        Self {
            header_len: 16,
            record_len: pixel_count,
        }
    }

    /// IDX1 label files: 8-byte header (magic, count), then one byte per label.
    pub const fn idx1_labels() -> Self {
        Self {
            header_len: 8,
            record_len: 1,
        }
    }
}
