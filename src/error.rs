//! Error type shared by the corpus loader, the precomputation build and the
//! index codec.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a suffix array, building the collocation
/// index or decoding a persisted index.
#[derive(Error, Debug)]
pub enum Error {
    /// A match or constraint computation referenced an offset outside the
    /// sentence or corpus it belongs to.
    #[error("position {position} (length {len}) lies outside {range_start}..{range_end}")]
    OutOfBounds {
        position: u64,
        len: u64,
        range_start: u64,
        range_end: u64,
    },

    /// A corpus token collides with the reserved marker range.
    #[error("token {0} is reserved and cannot appear in the corpus")]
    InvalidToken(u32),

    /// Suffix array files are inconsistent with each other.
    #[error("corrupt suffix array: {0}")]
    CorruptSuffixArray(String),

    /// Thresholds that cannot be honored.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input ended before a declared field or record was complete.
    #[error("truncated input while reading {0}")]
    Truncated(&'static str),

    /// Input continued after the last declared record.
    #[error("{0} trailing bytes after the last record")]
    TrailingBytes(usize),

    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    /// The writer used different nonterminal marker values than this build.
    #[error("nonterminal marker mismatch: expected {expected:#x}, found {found:#x}")]
    MarkerMismatch { expected: u32, found: u32 },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// Occurrence data does not divide into tuples of the template's arity.
    #[error("template {template} expects {expected} positions per record, found {found}")]
    ArityMismatch {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate template {0} in encoded index")]
    DuplicateTemplate(String),

    #[error("varint exceeds 32 bits")]
    VarintOverflow,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
