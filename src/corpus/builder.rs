//! Suffix array builder
//!
//! Builds a suffix array from a collection of sentences by:
//! 1. Concatenating all sentence tokens with END_OF_LINE separators
//! 2. Sorting all suffix positions using parallel sort
//!
//! This is a plain comparison sort meant for test corpora, fixtures and
//! benchmarks; production suffix arrays come from the corpus compiler and
//! are loaded with [`SuffixArray::open`].

use super::suffix_array::{compare_suffixes, SuffixArray};
use super::types::*;
use crate::error::{Error, Result};
use rayon::prelude::*;

/// Builder for constructing suffix arrays from sentences
#[derive(Debug, Default)]
pub struct SuffixArrayBuilder {
    /// Concatenated tokens
    data: Vec<Token>,
    /// Sentence boundaries in the concatenated tokens
    sentences: Vec<SentenceBoundary>,
}

impl SuffixArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sentence to the corpus
    ///
    /// Fails if a token falls in the reserved range or the corpus would
    /// outgrow the position type.
    pub fn add_sentence(&mut self, tokens: &[Token]) -> Result<()> {
        if let Some(&bad) = tokens.iter().find(|&&t| t > MAX_TOKEN) {
            return Err(Error::InvalidToken(bad));
        }
        if self.data.len() + tokens.len() + 1 > Position::MAX as usize {
            return Err(Error::OutOfBounds {
                position: self.data.len() as u64,
                len: tokens.len() as u64 + 1,
                range_start: 0,
                range_end: Position::MAX as u64,
            });
        }

        let start = self.data.len() as Position;
        self.data.extend_from_slice(tokens);
        let end = self.data.len() as Position;

        // Append separator between sentences
        self.data.push(END_OF_LINE);

        self.sentences.push(SentenceBoundary { start, end });
        Ok(())
    }

    /// Number of sentences added so far
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Sort all suffixes and produce the suffix array
    pub fn build(self) -> SuffixArray {
        let suffixes = build_suffix_array_parallel(&self.data);
        SuffixArray::from_sorted(self.data, suffixes, self.sentences)
    }
}

impl SuffixArray {
    /// Build a suffix array over `sentences` in memory
    pub fn from_sentences(sentences: &[Vec<Token>]) -> Result<Self> {
        let mut builder = SuffixArrayBuilder::new();
        for sentence in sentences {
            builder.add_sentence(sentence)?;
        }
        Ok(builder.build())
    }
}

/// Build suffix array using parallel sort
///
/// Time: O(n log n) comparisons, each bounded by the sentence length
/// Space: O(n) for the suffix array
fn build_suffix_array_parallel(data: &[Token]) -> Vec<Position> {
    let n = data.len();

    let mut sa: Vec<Position> = (0..n as Position).collect();

    // For large corpora, use parallel sort
    if n > 100_000 {
        sa.par_sort_unstable_by(|&a, &b| compare_suffixes(data, a as usize, b as usize));
    } else {
        sa.sort_unstable_by(|&a, &b| compare_suffixes(data, a as usize, b as usize));
    }

    sa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SuffixIndex;

    #[test]
    fn test_build_simple() {
        let mut builder = SuffixArrayBuilder::new();
        builder.add_sentence(&[5, 6, 5]).unwrap();
        let built = builder.build();

        assert_eq!(built.sentences().len(), 1);
        assert_eq!(built.data(), &[5, 6, 5, END_OF_LINE]);
    }

    #[test]
    fn test_suffix_array_correctness() {
        // Same shape as "banana": b=2, a=1, n=3
        let data = vec![2, 1, 3, 1, 3, 1, END_OF_LINE];
        let sa = build_suffix_array_parallel(&data);

        // The separator is the largest token, so shorter suffixes sort after
        // their extensions:
        // 1: anana$
        // 3: ana$
        // 5: a$
        // 0: banana$
        // 2: nana$
        // 4: na$
        // 6: $
        assert_eq!(sa, vec![1, 3, 5, 0, 2, 4, 6]);
    }

    #[test]
    fn test_identical_sentences_tie_break_by_position() {
        let data = vec![7, END_OF_LINE, 7, END_OF_LINE];
        let sa = build_suffix_array_parallel(&data);
        assert_eq!(sa, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_reserved_tokens_rejected() {
        let mut builder = SuffixArrayBuilder::new();
        let err = builder.add_sentence(&[1, END_OF_LINE]).unwrap_err();
        assert!(matches!(err, Error::InvalidToken(t) if t == END_OF_LINE));
        assert!(matches!(
            builder.add_sentence(&[u32::MAX]),
            Err(Error::InvalidToken(u32::MAX))
        ));
        assert_eq!(builder.sentence_count(), 0);
    }

    #[test]
    fn test_multiple_sentences() {
        let sa = SuffixArray::from_sentences(&[vec![1, 2], vec![], vec![3]]).unwrap();

        // 2 + 1 + 0 + 1 + 1 + 1 = 6
        assert_eq!(sa.data().len(), 6);
        assert_eq!(sa.num_sentences(), 3);
        assert_eq!(sa.sentences()[0], SentenceBoundary { start: 0, end: 2 });
        assert_eq!(sa.sentences()[1], SentenceBoundary { start: 3, end: 3 });
        assert_eq!(sa.sentences()[2], SentenceBoundary { start: 4, end: 5 });
        assert!(sa.sentence(1).is_empty());
    }
}
