//! Token corpus and suffix array access
//!
//! The precomputation only needs a narrow view of the suffix array: pattern
//! counts, pattern locations and per-sentence tokens. That view is the
//! [`SuffixIndex`] trait, implemented here by [`SuffixArray`] and by test
//! doubles elsewhere.
//!
//! ## Architecture
//!
//! - `builder`: Sorts suffixes of a small in-memory corpus (tests, fixtures)
//! - `writer`: Persists a suffix array to a directory
//! - `reader`: Loads and validates a persisted suffix array
//! - `types`: Token, position and file header definitions
//!
//! ## File Format
//!
//! A suffix array directory holds two files:
//! - `corpus.bin`: Concatenated sentence tokens with END_OF_LINE separators
//! - `sa.bin`: The sorted suffix array (positions into corpus.bin)

pub mod builder;
pub mod reader;
pub mod suffix_array;
pub mod types;
pub mod writer;

use std::ops::Range;

// Re-exports for convenience
pub use builder::SuffixArrayBuilder;
pub use suffix_array::SuffixArray;
pub use types::{Position, SentenceBoundary, SuffixArrayStats, Token, END_OF_LINE, MAX_TOKEN};
pub use writer::SuffixArrayWriter;

/// Read-only capabilities the precomputation consumes from a suffix array.
pub trait SuffixIndex: Sync {
    /// Number of occurrences of a contiguous pattern in the corpus.
    fn count(&self, pattern: &[Token]) -> usize;

    /// Every start position of a contiguous pattern, ascending.
    fn locate(&self, pattern: &[Token]) -> Vec<Position>;

    fn num_sentences(&self) -> usize;

    /// Global position of the first token of `sentence`.
    fn sentence_start(&self, sentence: usize) -> Position;

    /// Tokens of `sentence`, without the separator.
    fn sentence(&self, sentence: usize) -> &[Token];

    /// Global token range covered by `sentence`.
    fn sentence_range(&self, sentence: usize) -> Range<Position> {
        let start = self.sentence_start(sentence);
        start..start + self.sentence(sentence).len() as Position
    }
}
