//! In-memory suffix array with O(m log n) pattern search.

use super::SuffixIndex;
use super::types::*;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Suffix array over a concatenated, sentence-separated token corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixArray {
    /// Concatenated tokens, END_OF_LINE after every sentence
    data: Vec<Token>,
    /// Sorted suffix start positions into `data`
    suffixes: Vec<Position>,
    /// Sentence boundaries, in corpus order
    sentences: Vec<SentenceBoundary>,
}

impl SuffixArray {
    /// Assemble a suffix array from its persisted parts, validating that the
    /// suffixes are a sorted permutation of the corpus positions.
    pub fn from_parts(data: Vec<Token>, suffixes: Vec<Position>) -> Result<Self> {
        if data.len() > Position::MAX as usize {
            return Err(Error::CorruptSuffixArray(format!(
                "corpus of {} tokens exceeds the addressable range",
                data.len()
            )));
        }
        if suffixes.len() != data.len() {
            return Err(Error::CorruptSuffixArray(format!(
                "{} suffixes for {} corpus tokens",
                suffixes.len(),
                data.len()
            )));
        }
        if data.last().is_some_and(|&t| t != END_OF_LINE) {
            return Err(Error::CorruptSuffixArray(
                "corpus does not end with a sentence separator".to_string(),
            ));
        }
        if let Some(&bad) = data.iter().find(|&&t| t > MAX_TOKEN && t != END_OF_LINE) {
            return Err(Error::InvalidToken(bad));
        }
        if let Some(&bad) = suffixes.iter().find(|&&s| s as usize >= data.len()) {
            return Err(Error::OutOfBounds {
                position: bad as u64,
                len: 1,
                range_start: 0,
                range_end: data.len() as u64,
            });
        }

        // Strictly increasing under the suffix order implies a permutation
        for (i, pair) in suffixes.windows(2).enumerate() {
            if compare_suffixes(&data, pair[0] as usize, pair[1] as usize) != Ordering::Less {
                return Err(Error::CorruptSuffixArray(format!(
                    "suffixes out of order at rank {}",
                    i + 1
                )));
            }
        }

        let sentences = sentence_boundaries(&data);
        Ok(Self {
            data,
            suffixes,
            sentences,
        })
    }

    /// Build from parts already known to be consistent (builder output)
    pub(crate) fn from_sorted(
        data: Vec<Token>,
        suffixes: Vec<Position>,
        sentences: Vec<SentenceBoundary>,
    ) -> Self {
        Self {
            data,
            suffixes,
            sentences,
        }
    }

    /// Concatenated corpus tokens including separators
    pub fn data(&self) -> &[Token] {
        &self.data
    }

    /// Sorted suffix positions
    pub fn suffixes(&self) -> &[Position] {
        &self.suffixes
    }

    pub fn sentences(&self) -> &[SentenceBoundary] {
        &self.sentences
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Search for a pattern in the suffix array
    ///
    /// Returns the range [lo, hi) of ranks whose suffixes start with the
    /// pattern.
    pub fn search(&self, pattern: &[Token]) -> (usize, usize) {
        if pattern.is_empty() || self.suffixes.is_empty() {
            return (0, 0);
        }

        let lo = self.lower_bound(pattern);
        let hi = self.upper_bound(pattern, lo);
        (lo, hi)
    }

    /// First rank whose suffix is not smaller than the pattern
    fn lower_bound(&self, pattern: &[Token]) -> usize {
        let mut lo = 0;
        let mut hi = self.suffixes.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix_prefix(mid, pattern.len()) < pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// First rank at or after `start` whose suffix does not start with the pattern
    fn upper_bound(&self, pattern: &[Token], start: usize) -> usize {
        let mut lo = start;
        let mut hi = self.suffixes.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix_prefix(mid, pattern.len()) == pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Up to `len` tokens of the suffix at `rank`
    #[inline]
    fn suffix_prefix(&self, rank: usize, len: usize) -> &[Token] {
        let pos = self.suffixes[rank] as usize;
        let end = (pos + len).min(self.data.len());
        &self.data[pos..end]
    }

    /// Get statistics about this suffix array
    pub fn stats(&self) -> SuffixArrayStats {
        SuffixArrayStats {
            token_count: self.data.len() - self.sentences.len(),
            sentence_count: self.sentences.len(),
            suffix_count: self.suffixes.len(),
        }
    }
}

impl SuffixIndex for SuffixArray {
    fn count(&self, pattern: &[Token]) -> usize {
        let (lo, hi) = self.search(pattern);
        hi - lo
    }

    fn locate(&self, pattern: &[Token]) -> Vec<Position> {
        let (lo, hi) = self.search(pattern);
        let mut positions = self.suffixes[lo..hi].to_vec();
        positions.sort_unstable();
        positions
    }

    fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    fn sentence_start(&self, sentence: usize) -> Position {
        self.sentences[sentence].start
    }

    fn sentence(&self, sentence: usize) -> &[Token] {
        let boundary = self.sentences[sentence];
        &self.data[boundary.start as usize..boundary.end as usize]
    }
}

/// Compare two suffixes up to the end of their sentences
///
/// Suffixes equal through their END_OF_LINE separator are ordered by
/// position, so the order is total and deterministic.
#[inline]
pub(crate) fn compare_suffixes(data: &[Token], a: usize, b: usize) -> Ordering {
    let lhs = &data[a..];
    let rhs = &data[b..];

    for (x, y) in lhs.iter().zip(rhs) {
        match x.cmp(y) {
            Ordering::Equal if *x == END_OF_LINE => return a.cmp(&b),
            Ordering::Equal => {}
            other => return other,
        }
    }

    lhs.len().cmp(&rhs.len()).then(a.cmp(&b))
}

/// Recover sentence boundaries from END_OF_LINE separators
pub(crate) fn sentence_boundaries(data: &[Token]) -> Vec<SentenceBoundary> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &token) in data.iter().enumerate() {
        if token == END_OF_LINE {
            sentences.push(SentenceBoundary {
                start: start as Position,
                end: i as Position,
            });
            start = i + 1;
        }
    }

    sentences
}
