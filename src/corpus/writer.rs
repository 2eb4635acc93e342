//! Suffix array writer
//!
//! Writes a suffix array directory in the layout [`SuffixArray::open`] reads.

use super::suffix_array::SuffixArray;
use super::types::*;
use crate::error::Result;
use crate::utils::{write_u32_le, write_u64_le};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes suffix array files to a directory
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write all suffix array files to `dir`, creating it if needed
    ///
    /// Creates:
    /// - corpus.bin: Concatenated sentence tokens
    /// - sa.bin: The suffix array itself
    pub fn write(dir: &Path, sa: &SuffixArray) -> Result<()> {
        fs::create_dir_all(dir)?;
        Self::write_entries(&dir.join(CORPUS_FILE), sa.data())?;
        Self::write_entries(&dir.join(SUFFIX_FILE), sa.suffixes())?;
        tracing::debug!(
            dir = %dir.display(),
            tokens = sa.data().len(),
            "wrote suffix array"
        );
        Ok(())
    }

    /// Write a header followed by u32 entries
    fn write_entries(path: &Path, entries: &[u32]) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(path)?);

        let header = FileHeader::new(entries.len() as u64);
        write_u32_le(&mut file, header.magic)?;
        write_u32_le(&mut file, header.version)?;
        write_u64_le(&mut file, header.count)?;
        write_u32_le(&mut file, header.flags)?;

        // Using a buffer to reduce system call overhead
        let mut buffer = Vec::with_capacity(4 * 1024);
        for &entry in entries {
            buffer.extend_from_slice(&entry.to_le_bytes());
            if buffer.len() >= 4 * 1024 {
                file.write_all(&buffer)?;
                buffer.clear();
            }
        }
        if !buffer.is_empty() {
            file.write_all(&buffer)?;
        }

        file.flush()?;
        Ok(())
    }
}
