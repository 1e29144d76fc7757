//! Collaborator seams: status reporting, output routing, and compression
//! statistics.
//!
//! The core never renders progress or touches destination paths itself. It
//! pushes human-readable status strings into a [`StatusSink`] and hands
//! decompressed files to an [`OutputSink`]; a front-end decides what to do
//! with them. [`CompressionStats`] carries the numbers an external audit
//! log needs.

use crate::codec::Algorithm;
use crate::error::Result;

/// Receives human-readable progress strings from pack/unpack operations.
pub trait StatusSink {
    /// Called once per reportable milestone with a plain status message.
    fn status(&mut self, message: &str);
}

/// A sink that discards all status messages.
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&mut self, _message: &str) {}
}

/// Any `FnMut(&str)` closure can serve as a status sink.
impl<F: FnMut(&str)> StatusSink for F {
    fn status(&mut self, message: &str) {
        self(message)
    }
}

/// Receives decompressed files during archive extraction. Destination
/// resolution and actual writing are entirely the implementor's concern.
pub trait OutputSink {
    /// Accept one decompressed file.
    fn write(&mut self, filename: &str, data: &[u8]) -> Result<()>;
}

/// Size accounting for one compression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Input length in bytes.
    pub original_len: usize,
    /// Serialized block length in bytes.
    pub compressed_len: usize,
}

impl CompressionStats {
    /// Space saved as a percentage of the original size, rounded to two
    /// decimals. Negative when the codec expanded the input; zero for an
    /// empty original.
    pub fn ratio_percent(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        let ratio = (1.0 - self.compressed_len as f64 / self.original_len as f64) * 100.0;
        (ratio * 100.0).round() / 100.0
    }
}

/// Compress `input` with `algorithm` and report the sizes alongside the
/// block, for callers that feed an audit log.
///
/// # Example
///
/// ```
/// use bale::codec::Algorithm;
/// use bale::report::compress_with_stats;
///
/// let input = vec![b'a'; 1000];
/// let (block, stats) = compress_with_stats(Algorithm::Rle, &input).unwrap();
/// assert_eq!(stats.original_len, 1000);
/// assert_eq!(stats.compressed_len, block.len());
/// assert!(stats.ratio_percent() > 99.0);
/// ```
pub fn compress_with_stats(
    algorithm: Algorithm,
    input: &[u8],
) -> Result<(Vec<u8>, CompressionStats)> {
    let block = algorithm.encode(input)?;
    let stats = CompressionStats {
        original_len: input.len(),
        compressed_len: block.len(),
    };
    Ok((block, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_rounding() {
        let stats = CompressionStats {
            original_len: 3,
            compressed_len: 2,
        };
        assert_eq!(stats.ratio_percent(), 33.33);
    }

    #[test]
    fn test_expansion_is_negative() {
        let stats = CompressionStats {
            original_len: 10,
            compressed_len: 25,
        };
        assert!(stats.ratio_percent() < 0.0);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |m: &str| seen.push(m.to_string());
            sink.status("first");
            sink.status("second");
        }
        assert_eq!(seen, vec!["first", "second"]);
    }

    #[test]
    fn test_stats_match_block() {
        let (block, stats) = compress_with_stats(Algorithm::Huffman, b"stats please").unwrap();
        assert_eq!(stats.compressed_len, block.len());
        assert_eq!(stats.original_len, 12);
    }
}
