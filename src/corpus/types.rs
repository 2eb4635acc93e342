//! Types for the token corpus and its suffix array
//!
//! A corpus is the concatenation of all sentences, each followed by an
//! [`END_OF_LINE`] separator. Token ids at the top of the `u32` range are
//! reserved for separators and collocation markers.

/// Vocabulary item identifier
pub type Token = u32;

/// Offset into the concatenated corpus (global, not sentence-relative)
pub type Position = u32;

/// Separator written after every sentence in the concatenated corpus
pub const END_OF_LINE: Token = u32::MAX - 2;

/// Largest token id a corpus may contain
pub const MAX_TOKEN: Token = u32::MAX - 3;

/// Magic number for suffix array files
pub const SA_MAGIC: u32 = 0x41535843; // "CXSA" in little-endian

/// Current version of the suffix array format
pub const SA_VERSION: u32 = 1;

/// Name of the concatenated token file inside a suffix array directory
pub const CORPUS_FILE: &str = "corpus.bin";

/// Name of the sorted suffix file inside a suffix array directory
pub const SUFFIX_FILE: &str = "sa.bin";

/// Header shared by corpus.bin and sa.bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Number of u32 entries following the header
    pub count: u64,
    /// Flags (reserved for future use)
    pub flags: u32,
}

impl FileHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 8 + 4; // 20 bytes

    pub fn new(count: u64) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            count,
            flags: 0,
        }
    }
}

/// Sentence boundary in the concatenated corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceBoundary {
    /// First token of the sentence (inclusive)
    pub start: Position,
    /// Position of the END_OF_LINE separator (exclusive end of the sentence)
    pub end: Position,
}

impl SentenceBoundary {
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Summary of a loaded suffix array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixArrayStats {
    pub token_count: usize,
    pub sentence_count: usize,
    pub suffix_count: usize,
}
