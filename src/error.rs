use thiserror::Error;

/// Errors produced by the codecs, the selector, and the archive container.
///
/// Codecs fail fast: the first problem encountered aborts the operation and
/// is reported verbatim to the caller. No retries are attempted anywhere in
/// the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A codec was handed a zero-length input buffer.
    #[error("input is empty")]
    EmptyInput,

    /// An LZW stream contained a code that is neither a known dictionary
    /// entry nor the next code to be assigned.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// An algorithm tag or name was not one of Huffman, LZW, or RLE.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// An archive was packed with fewer than 2 or more than 5 files.
    #[error("archive requires between 2 and 5 entries, got {0}")]
    InvalidEntryCount(usize),

    /// A serialized codec block or archive blob was malformed.
    #[error("invalid block: {0}")]
    InvalidBlock(String),

    /// An output sink failed while writing a decompressed file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compression operations.
pub type Result<T> = std::result::Result<T, Error>;
