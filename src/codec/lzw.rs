//! LZW adaptive-dictionary compression.
//!
//! The dictionary is seeded with all 256 single-byte sequences and grows by
//! one entry per step, with codes assigned in strictly increasing order from
//! 256. Encoder and decoder rebuild the same dictionary step for step, so no
//! dictionary data is persisted — only the code sequence.
//!
//! No eviction or code-width cap is applied: the dictionary grows in
//! proportion to the input. That is acceptable for bounded local files;
//! callers feeding very large inputs should expect proportional memory use.

use std::collections::HashMap;

use crate::codec::ByteReader;
use crate::error::{Error, Result};

const BLOCK_VERSION: u8 = 1;
const FIRST_FREE_CODE: u32 = 256;

/// Compress `input` to its LZW code sequence.
///
/// For each input byte, the encoder extends its current phrase while the
/// extension is a known dictionary entry; otherwise it emits the code for
/// the current phrase, registers the extension under the next free code,
/// and restarts the phrase from the current byte.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `input` is empty.
pub fn encode_to_codes(input: &[u8]) -> Result<Vec<u32>> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut dict: HashMap<Vec<u8>, u32> = HashMap::new();
    for b in 0..=255u8 {
        dict.insert(vec![b], b as u32);
    }
    let mut next_code = FIRST_FREE_CODE;

    let mut codes = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    for &b in input {
        current.push(b);
        if !dict.contains_key(&current) {
            let extension = current.clone();
            current.pop();
            let code = dict.get(&current).copied().expect("phrase is in dictionary");
            codes.push(code);
            dict.insert(extension, next_code);
            next_code += 1;
            current.clear();
            current.push(b);
        }
    }
    // Flush the final phrase.
    let code = dict.get(&current).copied().expect("phrase is in dictionary");
    codes.push(code);
    Ok(codes)
}

/// Decompress an LZW code sequence back into the original bytes.
///
/// The decoder mirrors the encoder's dictionary growth. A code equal to the
/// next code to be assigned is the classic self-referential case and
/// resolves to the previous phrase plus its own first byte.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for an empty code sequence and
/// [`Error::CorruptStream`] when a code is neither a known dictionary entry
/// nor the next code to be assigned.
pub fn decode_from_codes(codes: &[u32]) -> Result<Vec<u8>> {
    let Some(&first) = codes.first() else {
        return Err(Error::EmptyInput);
    };
    if first >= FIRST_FREE_CODE {
        return Err(Error::CorruptStream(format!(
            "initial code {first} is not a single-byte entry"
        )));
    }
    let mut dict: Vec<Vec<u8>> = (0..=255u8).map(|b| vec![b]).collect();

    let mut previous = dict[first as usize].clone();
    let mut output = previous.clone();
    for &code in &codes[1..] {
        let entry = match (code as usize).cmp(&dict.len()) {
            std::cmp::Ordering::Less => dict[code as usize].clone(),
            std::cmp::Ordering::Equal => {
                // Self-referential: the phrase being defined by this very
                // step. It must be previous + previous[0].
                let mut phrase = previous.clone();
                phrase.push(previous[0]);
                phrase
            }
            std::cmp::Ordering::Greater => {
                return Err(Error::CorruptStream(format!(
                    "code {code} exceeds dictionary size {}",
                    dict.len()
                )));
            }
        };
        output.extend_from_slice(&entry);
        let mut new_entry = previous;
        new_entry.push(entry[0]);
        dict.push(new_entry);
        previous = entry;
    }
    Ok(output)
}

/// Compress `input` into a serialized LZW block.
///
/// Block layout (version 1): version `u8`, code count `u32` little-endian,
/// then each code as a `u32` little-endian. Widths are fixed so the format
/// stays auditable; the entropy left in the codes is the price of that.
///
/// # Example
///
/// ```
/// use bale::codec::lzw;
///
/// let block = lzw::encode(b"TOBEORNOTTOBE").unwrap();
/// assert_eq!(lzw::decode(&block).unwrap(), b"TOBEORNOTTOBE");
/// ```
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let codes = encode_to_codes(input)?;
    let count = u32::try_from(codes.len())
        .map_err(|_| Error::InvalidBlock("code count exceeds block limit".to_string()))?;
    let mut block = Vec::with_capacity(5 + codes.len() * 4);
    block.push(BLOCK_VERSION);
    block.extend_from_slice(&count.to_le_bytes());
    for code in codes {
        block.extend_from_slice(&code.to_le_bytes());
    }
    Ok(block)
}

/// Decompress a block produced by [`encode`].
///
/// # Errors
///
/// Returns [`Error::InvalidBlock`] for truncated or unversioned blocks and
/// [`Error::CorruptStream`] for invalid codes.
pub fn decode(block: &[u8]) -> Result<Vec<u8>> {
    let mut reader = ByteReader::new(block);
    let version = reader.u8()?;
    if version != BLOCK_VERSION {
        return Err(Error::InvalidBlock(format!(
            "unknown lzw block version {version}"
        )));
    }
    let count = reader.u32_le()? as usize;
    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        codes.push(reader.u32_le()?);
    }
    reader.finish()?;
    decode_from_codes(&codes)
}
