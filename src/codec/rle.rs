//! Run-length encoding.
//!
//! A run is a maximal sequence of consecutive identical bytes. The encoded
//! stream is the run's symbol followed by the ASCII decimal digits of its
//! count, with no separator between runs. Because a bare digit symbol would
//! be indistinguishable from the preceding count field, symbols that are
//! themselves ASCII digits (and the escape byte) are prefixed with `\`;
//! the decoder's greedy digit scan then never swallows the next run.

use crate::codec::ByteReader;
use crate::error::{Error, Result};

const BLOCK_VERSION: u8 = 1;
const ESCAPE: u8 = b'\\';

/// Compress `input` into a serialized RLE block.
///
/// Block layout (version 1): version `u8`, then the run stream.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `input` is empty.
///
/// # Example
///
/// ```
/// use bale::codec::rle;
///
/// let block = rle::encode(b"aaabbbccd").unwrap();
/// // Version byte, then the undelimited run stream.
/// assert_eq!(&block[1..], b"a3b3c2d1");
/// ```
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut block = vec![BLOCK_VERSION];
    let mut symbol = input[0];
    let mut count: u64 = 1;
    for &b in &input[1..] {
        if b == symbol {
            count += 1;
        } else {
            push_run(&mut block, symbol, count);
            symbol = b;
            count = 1;
        }
    }
    push_run(&mut block, symbol, count);
    Ok(block)
}

fn push_run(block: &mut Vec<u8>, symbol: u8, count: u64) {
    if symbol.is_ascii_digit() || symbol == ESCAPE {
        block.push(ESCAPE);
    }
    block.push(symbol);
    block.extend_from_slice(count.to_string().as_bytes());
}

/// Decompress a block produced by [`encode`].
///
/// Reads a symbol (honoring the escape prefix), then greedily consumes the
/// following decimal digits as its run length, until the stream ends.
///
/// # Errors
///
/// Returns [`Error::InvalidBlock`] for unversioned blocks, dangling
/// escapes, missing or unparseable counts, and zero-length runs.
pub fn decode(block: &[u8]) -> Result<Vec<u8>> {
    let mut reader = ByteReader::new(block);
    let version = reader.u8()?;
    if version != BLOCK_VERSION {
        return Err(Error::InvalidBlock(format!(
            "unknown rle block version {version}"
        )));
    }

    let mut output = Vec::new();
    while !reader.is_empty() {
        let mut symbol = reader.u8()?;
        if symbol == ESCAPE {
            symbol = reader
                .u8()
                .map_err(|_| Error::InvalidBlock("dangling escape".to_string()))?;
        }
        let mut digits = Vec::new();
        while let Some(d) = reader.peek() {
            if d.is_ascii_digit() {
                digits.push(reader.u8()?);
            } else {
                break;
            }
        }
        if digits.is_empty() {
            return Err(Error::InvalidBlock(format!(
                "run for symbol {symbol:#04x} has no count"
            )));
        }
        let count: u64 = std::str::from_utf8(&digits)
            .expect("digits are ascii")
            .parse()
            .map_err(|_| Error::InvalidBlock("run count out of range".to_string()))?;
        if count == 0 {
            return Err(Error::InvalidBlock("run count is zero".to_string()));
        }
        output.extend(std::iter::repeat(symbol).take(count as usize));
    }
    Ok(output)
}
