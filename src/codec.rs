//! Compression codec implementations.
//!
//! This module provides three interchangeable lossless codecs:
//! - Huffman prefix-code compression
//! - LZW adaptive-dictionary compression
//! - Run-length encoding
//!
//! All codecs operate directly on raw byte buffers and produce
//! self-contained versioned blocks, so any file content round-trips and no
//! temporary storage is involved. Dispatch goes through the closed
//! [`Algorithm`] enum rather than runtime name lookup.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod frequency;
pub mod huffman;
pub mod lzw;
pub mod rle;

/// The closed set of supported compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Huffman prefix-code compression.
    Huffman,
    /// LZW adaptive-dictionary compression.
    Lzw,
    /// Run-length encoding.
    Rle,
}

impl Algorithm {
    /// All algorithms, in wire-tag order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Huffman, Algorithm::Lzw, Algorithm::Rle];

    /// Compress `input` into this algorithm's serialized block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `input` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use bale::codec::Algorithm;
    ///
    /// let block = Algorithm::Lzw.encode(b"TOBEORNOTTOBE").unwrap();
    /// assert_eq!(Algorithm::Lzw.decode(&block).unwrap(), b"TOBEORNOTTOBE");
    /// ```
    pub fn encode(self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::Huffman => huffman::encode(input),
            Algorithm::Lzw => lzw::encode(input),
            Algorithm::Rle => rle::encode(input),
        }
    }

    /// Decompress a block produced by [`Algorithm::encode`] with the same
    /// algorithm.
    pub fn decode(self, block: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::Huffman => huffman::decode(block),
            Algorithm::Lzw => lzw::decode(block),
            Algorithm::Rle => rle::decode(block),
        }
    }

    /// The single-byte tag identifying this algorithm in an archive entry.
    pub fn tag(self) -> u8 {
        match self {
            Algorithm::Huffman => 0,
            Algorithm::Lzw => 1,
            Algorithm::Rle => 2,
        }
    }

    /// Resolve an archive entry tag back to its algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] for an unknown tag.
    pub fn from_tag(tag: u8) -> Result<Algorithm> {
        match tag {
            0 => Ok(Algorithm::Huffman),
            1 => Ok(Algorithm::Lzw),
            2 => Ok(Algorithm::Rle),
            other => Err(Error::UnsupportedAlgorithm(format!("tag {other}"))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Huffman => "Huffman",
            Algorithm::Lzw => "LZW",
            Algorithm::Rle => "RLE",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse a case-insensitive algorithm name.
    fn from_str(s: &str) -> Result<Algorithm> {
        match s.to_ascii_lowercase().as_str() {
            "huffman" => Ok(Algorithm::Huffman),
            "lzw" => Ok(Algorithm::Lzw),
            "rle" => Ok(Algorithm::Rle),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Cursor over a serialized block. All multi-byte integers are
/// little-endian; reads past the end report a truncated block.
pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    pub(crate) fn u8(&mut self) -> Result<u8> {
        let b = self
            .peek()
            .ok_or_else(|| Error::InvalidBlock("truncated block".to_string()))?;
        self.pos += 1;
        Ok(b)
    }

    pub(crate) fn u16_le(&mut self) -> Result<u16> {
        let bytes = self.bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn u32_le(&mut self) -> Result<u32> {
        let bytes = self.bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| Error::InvalidBlock("truncated block".to_string()))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Assert the whole block was consumed.
    pub(crate) fn finish(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidBlock(format!(
                "{} trailing bytes after block",
                self.buf.len() - self.pos
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_tag(algorithm.tag()).unwrap(), algorithm);
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            Algorithm::from_tag(7),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("huffman".parse::<Algorithm>().unwrap(), Algorithm::Huffman);
        assert_eq!("LZW".parse::<Algorithm>().unwrap(), Algorithm::Lzw);
        assert_eq!("Rle".parse::<Algorithm>().unwrap(), Algorithm::Rle);
        assert!("gzip".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Algorithm::Huffman.to_string(), "Huffman");
        assert_eq!(Algorithm::Lzw.to_string(), "LZW");
        assert_eq!(Algorithm::Rle.to_string(), "RLE");
    }

    #[test]
    fn test_dispatch_roundtrip() {
        let input = b"dispatch through the enum";
        for algorithm in Algorithm::ALL {
            let block = algorithm.encode(input).unwrap();
            assert_eq!(algorithm.decode(&block).unwrap(), input);
        }
    }

    #[test]
    fn test_reader_truncation() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        assert_eq!(reader.u16_le().unwrap(), 0x0201);
        assert!(matches!(reader.u32_le(), Err(Error::InvalidBlock(_))));
    }
}
