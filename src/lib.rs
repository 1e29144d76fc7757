//! Lossless multi-codec compression with a tagged archive container.
//!
//! Three interchangeable codecs (Huffman, LZW, RLE) operating on raw byte
//! buffers, a heuristic selector that picks a codec from a file's type and
//! content, and an archive format that bundles 2 to 5 independently
//! compressed files into one blob.

pub mod archive;
pub mod codec;
pub mod error;
pub mod report;
pub mod select;

pub use codec::Algorithm;
pub use error::{Error, Result};
