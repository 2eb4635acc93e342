//! Suffix array reader
//!
//! Loads a suffix array directory into memory and validates it before use.

use super::suffix_array::SuffixArray;
use super::types::*;
use crate::error::{Error, Result};
use crate::utils::{read_u32_le, read_u64_le};
use std::path::Path;

impl SuffixArray {
    /// Open a suffix array from a directory written by
    /// [`SuffixArrayWriter`](super::SuffixArrayWriter) or the corpus compiler
    pub fn open(dir: &Path) -> Result<Self> {
        let data = read_entries(&dir.join(CORPUS_FILE))?;
        let suffixes = read_entries(&dir.join(SUFFIX_FILE))?;

        let sa = Self::from_parts(data, suffixes)?;
        let stats = sa.stats();
        tracing::info!(
            dir = %dir.display(),
            sentences = stats.sentence_count,
            tokens = stats.token_count,
            "loaded suffix array"
        );
        Ok(sa)
    }
}

/// Read a header-prefixed file of u32 entries
fn read_entries(path: &Path) -> Result<Vec<u32>> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if bytes.len() < FileHeader::SIZE {
        return Err(Error::CorruptSuffixArray(format!("{}: file too small", name)));
    }

    let header = parse_header(&bytes)?;
    if header.magic != SA_MAGIC {
        return Err(Error::BadMagic(header.magic));
    }
    if header.version != SA_VERSION {
        return Err(Error::UnsupportedVersion(header.version));
    }

    let body = &bytes[FileHeader::SIZE..];
    if body.len() % 4 != 0 || (body.len() / 4) as u64 != header.count {
        return Err(Error::CorruptSuffixArray(format!(
            "{}: header declares {} entries, body holds {} bytes",
            name,
            header.count,
            body.len()
        )));
    }

    Ok(body
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

fn parse_header(bytes: &[u8]) -> Result<FileHeader> {
    let mut reader = bytes;
    Ok(FileHeader {
        magic: read_u32_le(&mut reader)?,
        version: read_u32_le(&mut reader)?,
        count: read_u64_le(&mut reader)?,
        flags: read_u32_le(&mut reader)?,
    })
}
