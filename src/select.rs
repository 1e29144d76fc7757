//! Heuristic codec selection.
//!
//! Given a file's path, declared media type, and (for plain text) a sample
//! of its leading characters, picks the codec likely to compress it best.
//! The decision is a pure function of its arguments; the only I/O involved
//! is the caller reading the sample.

use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::codec::Algorithm;

/// Maximum number of leading characters of a text file the selector
/// inspects. Collaborators should read no more than this when producing
/// the sample.
pub const SAMPLE_LIMIT: usize = 5000;

/// Distinct-symbol count below which a text sample is considered run-heavy.
const LOW_DIVERSITY: usize = 10;

/// Distinct-symbol count above which a text sample is considered
/// high-entropy.
const HIGH_DIVERSITY: usize = 200;

/// Choose a compression algorithm for a file.
///
/// Decision table:
/// - text media type with a `.json`/`.xml`/`.csv` extension: LZW
/// - text media type with a `.txt` extension: by sample diversity —
///   fewer than 10 distinct symbols favors RLE, more than 200 favors
///   Huffman, anything between favors LZW
/// - any other text media type: Huffman
/// - `image/bmp` and `image/pbm`: RLE
/// - `application/json`: LZW
/// - `application/octet-stream` and anything unrecognized: Huffman
///
/// A missing sample counts as zero distinct symbols. Samples longer than
/// [`SAMPLE_LIMIT`] characters are truncated.
///
/// # Example
///
/// ```
/// use bale::codec::Algorithm;
/// use bale::select::select;
///
/// assert_eq!(select("data.json", "text/json", None), Algorithm::Lzw);
/// assert_eq!(select("notes.txt", "text/plain", Some("aaaaaaaaaa")), Algorithm::Rle);
/// ```
pub fn select(path: &str, media_type: &str, sample: Option<&str>) -> Algorithm {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let choice = if media_type.starts_with("text") {
        match extension.as_deref() {
            Some("json") | Some("xml") | Some("csv") => Algorithm::Lzw,
            Some("txt") => match distinct_symbols(sample.unwrap_or("")) {
                d if d < LOW_DIVERSITY => Algorithm::Rle,
                d if d > HIGH_DIVERSITY => Algorithm::Huffman,
                _ => Algorithm::Lzw,
            },
            _ => Algorithm::Huffman,
        }
    } else {
        match media_type {
            "image/bmp" | "image/pbm" => Algorithm::Rle,
            "application/json" => Algorithm::Lzw,
            _ => Algorithm::Huffman,
        }
    };
    debug!("selected {choice} for {path} ({media_type})");
    choice
}

fn distinct_symbols(sample: &str) -> usize {
    sample
        .chars()
        .take(SAMPLE_LIMIT)
        .collect::<HashSet<char>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_text_extensions() {
        assert_eq!(select("data.json", "text/json", None), Algorithm::Lzw);
        assert_eq!(select("feed.xml", "text/xml", None), Algorithm::Lzw);
        assert_eq!(select("table.csv", "text/csv", None), Algorithm::Lzw);
    }

    #[test]
    fn test_low_diversity_text() {
        assert_eq!(
            select("notes.txt", "text/plain", Some("aaaaaaaaaa")),
            Algorithm::Rle
        );
    }

    #[test]
    fn test_high_diversity_text() {
        let sample: String = (0..250u32)
            .map(|i| char::from_u32(0x100 + i).unwrap())
            .collect();
        assert_eq!(
            select("notes.txt", "text/plain", Some(&sample)),
            Algorithm::Huffman
        );
    }

    #[test]
    fn test_medium_diversity_text() {
        let sample = "the quick brown fox jumps over the lazy dog";
        assert_eq!(
            select("notes.txt", "text/plain", Some(sample)),
            Algorithm::Lzw
        );
    }

    #[test]
    fn test_missing_sample_counts_as_empty() {
        assert_eq!(select("notes.txt", "text/plain", None), Algorithm::Rle);
    }

    #[test]
    fn test_other_text() {
        assert_eq!(select("page.html", "text/html", None), Algorithm::Huffman);
    }

    #[test]
    fn test_bitmap_images() {
        assert_eq!(select("image.bmp", "image/bmp", None), Algorithm::Rle);
        assert_eq!(select("image.pbm", "image/pbm", None), Algorithm::Rle);
    }

    #[test]
    fn test_json_media_type() {
        assert_eq!(
            select("data.json", "application/json", None),
            Algorithm::Lzw
        );
    }

    #[test]
    fn test_binary_and_unknown_default_to_huffman() {
        assert_eq!(
            select("blob.bin", "application/octet-stream", None),
            Algorithm::Huffman
        );
        assert_eq!(select("mystery", "unknown", None), Algorithm::Huffman);
    }
}
