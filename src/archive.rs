//! Multi-file archive container.
//!
//! An archive bundles between 2 and 5 independently compressed files into
//! one blob, tagging each entry with its algorithm so unpacking can route
//! every payload to the right codec. Entry order is preserved across
//! pack/unpack.
//!
//! Blob layout (all integers little-endian): magic `b"DSZ1"`, entry count
//! `u8`, then per entry: filename length `u16`, filename UTF-8 bytes,
//! algorithm tag `u8`, payload length `u32`, payload bytes. Payloads are
//! the codecs' own versioned blocks.

use log::debug;

use crate::codec::{Algorithm, ByteReader};
use crate::error::{Error, Result};
use crate::report::{compress_with_stats, OutputSink, StatusSink};

const MAGIC: [u8; 4] = *b"DSZ1";

/// Minimum number of files in an archive.
pub const MIN_ENTRIES: usize = 2;
/// Maximum number of files in an archive.
pub const MAX_ENTRIES: usize = 5;

/// One file queued for packing.
#[derive(Debug, Clone, Copy)]
pub struct FileInput<'a> {
    /// Name stored in the archive (no path components expected).
    pub filename: &'a str,
    /// Uncompressed content.
    pub data: &'a [u8],
    /// Codec to compress this file with.
    pub algorithm: Algorithm,
}

/// One file recovered from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedFile {
    /// Name the file was stored under.
    pub filename: String,
    /// Decompressed content.
    pub data: Vec<u8>,
}

/// Compress each input independently and serialize the archive blob.
///
/// Inputs are processed in order and their order is preserved in the blob.
/// One status message is emitted per packed file.
///
/// # Errors
///
/// Returns [`Error::InvalidEntryCount`] when given fewer than
/// [`MIN_ENTRIES`] or more than [`MAX_ENTRIES`] files, and any codec error
/// verbatim. A failing entry aborts the whole pack.
pub fn pack(files: &[FileInput<'_>], status: &mut dyn StatusSink) -> Result<Vec<u8>> {
    if files.len() < MIN_ENTRIES || files.len() > MAX_ENTRIES {
        return Err(Error::InvalidEntryCount(files.len()));
    }
    debug!("packing {} files", files.len());

    let mut blob = Vec::new();
    blob.extend_from_slice(&MAGIC);
    blob.push(files.len() as u8);
    for file in files {
        let name_len = u16::try_from(file.filename.len())
            .map_err(|_| Error::InvalidBlock(format!("filename too long: {}", file.filename)))?;
        let (payload, stats) = compress_with_stats(file.algorithm, file.data)?;
        let payload_len = u32::try_from(payload.len())
            .map_err(|_| Error::InvalidBlock("payload exceeds entry limit".to_string()))?;

        blob.extend_from_slice(&name_len.to_le_bytes());
        blob.extend_from_slice(file.filename.as_bytes());
        blob.push(file.algorithm.tag());
        blob.extend_from_slice(&payload_len.to_le_bytes());
        blob.extend_from_slice(&payload);
        status.status(&format!(
            "compressed {} with {} ({} -> {} bytes)",
            file.filename, file.algorithm, stats.original_len, stats.compressed_len
        ));
    }
    Ok(blob)
}

/// Unpack an archive blob, routing each decompressed file to `out`.
///
/// Entries are decoded and delivered in their packed order. A single bad
/// entry aborts the whole unpack; files already handed to the sink are the
/// collaborator's to clean up.
///
/// # Errors
///
/// Returns [`Error::UnsupportedAlgorithm`] for an unknown entry tag,
/// [`Error::InvalidBlock`] for a malformed blob, and codec errors verbatim.
pub fn unpack_to(
    blob: &[u8],
    status: &mut dyn StatusSink,
    out: &mut dyn OutputSink,
) -> Result<()> {
    let mut reader = ByteReader::new(blob);
    if reader.bytes(4)? != MAGIC {
        return Err(Error::InvalidBlock("bad archive magic".to_string()));
    }
    let count = reader.u8()? as usize;
    if !(MIN_ENTRIES..=MAX_ENTRIES).contains(&count) {
        return Err(Error::InvalidEntryCount(count));
    }
    debug!("unpacking {count} entries");

    for _ in 0..count {
        let name_len = reader.u16_le()? as usize;
        let filename = std::str::from_utf8(reader.bytes(name_len)?)
            .map_err(|_| Error::InvalidBlock("filename is not valid utf-8".to_string()))?
            .to_string();
        let algorithm = Algorithm::from_tag(reader.u8()?)?;
        let payload_len = reader.u32_le()? as usize;
        let payload = reader.bytes(payload_len)?;
        let data = algorithm.decode(payload)?;
        out.write(&filename, &data)?;
        status.status(&format!("decompressed {filename} using {algorithm}"));
    }
    reader.finish()
}

/// Unpack an archive blob into memory, preserving entry order.
///
/// See [`unpack_to`] for the error contract.
pub fn unpack(blob: &[u8], status: &mut dyn StatusSink) -> Result<Vec<UnpackedFile>> {
    let mut collected = Collect(Vec::new());
    unpack_to(blob, status, &mut collected)?;
    Ok(collected.0)
}

struct Collect(Vec<UnpackedFile>);

impl OutputSink for Collect {
    fn write(&mut self, filename: &str, data: &[u8]) -> Result<()> {
        self.0.push(UnpackedFile {
            filename: filename.to_string(),
            data: data.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullSink;

    fn sample_files() -> Vec<FileInput<'static>> {
        vec![
            FileInput {
                filename: "notes.txt",
                data: b"aaaaaabbbbbbcccccc",
                algorithm: Algorithm::Rle,
            },
            FileInput {
                filename: "data.json",
                data: b"{\"key\": \"value\", \"key\": \"value\"}",
                algorithm: Algorithm::Lzw,
            },
            FileInput {
                filename: "report.bin",
                data: b"an arbitrary binary payload \x00\x01\x02",
                algorithm: Algorithm::Huffman,
            },
        ]
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let files = sample_files();
        let blob = pack(&files, &mut NullSink).unwrap();
        let unpacked = unpack(&blob, &mut NullSink).unwrap();
        assert_eq!(unpacked.len(), files.len());
        for (file, original) in unpacked.iter().zip(&files) {
            assert_eq!(file.filename, original.filename);
            assert_eq!(file.data, original.data);
        }
    }

    #[test]
    fn test_entry_count_bounds() {
        let files = sample_files();
        let err = pack(&files[..1], &mut NullSink);
        assert!(matches!(err, Err(Error::InvalidEntryCount(1))));

        let mut six = Vec::new();
        for _ in 0..2 {
            six.extend_from_slice(&files);
        }
        let err = pack(&six, &mut NullSink);
        assert!(matches!(err, Err(Error::InvalidEntryCount(6))));
    }

    #[test]
    fn test_unknown_algorithm_tag() {
        let files = sample_files();
        let mut blob = pack(&files[..2], &mut NullSink).unwrap();
        // First entry's tag sits after magic, count, name length, and name.
        let tag_offset = 4 + 1 + 2 + files[0].filename.len();
        blob[tag_offset] = 0xee;
        let err = unpack(&blob, &mut NullSink);
        assert!(matches!(err, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_bad_magic() {
        let files = sample_files();
        let mut blob = pack(&files[..2], &mut NullSink).unwrap();
        blob[0] = b'X';
        assert!(matches!(
            unpack(&blob, &mut NullSink),
            Err(Error::InvalidBlock(_))
        ));
    }

    #[test]
    fn test_truncated_blob() {
        let files = sample_files();
        let blob = pack(&files[..2], &mut NullSink).unwrap();
        let err = unpack(&blob[..blob.len() - 3], &mut NullSink);
        assert!(matches!(err, Err(Error::InvalidBlock(_))));
    }

    #[test]
    fn test_status_messages() {
        let files = sample_files();
        let mut messages = Vec::new();
        let blob = {
            let mut sink = |m: &str| messages.push(m.to_string());
            pack(&files, &mut sink).unwrap()
        };
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("notes.txt"));
        assert!(messages[0].contains("RLE"));

        messages.clear();
        {
            let mut sink = |m: &str| messages.push(m.to_string());
            unpack(&blob, &mut sink).unwrap();
        }
        assert_eq!(messages.len(), 3);
        assert!(messages[2].contains("report.bin"));
        assert!(messages[2].contains("Huffman"));
    }
}
