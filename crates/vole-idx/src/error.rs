/// All errors that can occur while partitioning a ubyte file into records.
#[derive(Debug, thiserror::Error)]
pub enum IdxError {
    /// The file is shorter than its own header.
    #[error("file too short: {len} bytes, header alone needs {header_len}")]
    TooShort { len: usize, header_len: usize },

    /// The payload is not a whole number of records (strict tail policy).
    #[error("{remainder} trailing bytes do not form a whole {record_len}-byte record")]
    TrailingBytes { remainder: usize, record_len: usize },

    /// A format with zero-length records cannot partition anything.
    #[error("record length must be non-zero")]
    ZeroRecordLen,
}
