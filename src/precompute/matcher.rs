//! Placement of frequent pattern occurrences into sentences.

use super::frequent::FrequentPatterns;
use crate::corpus::{Position, SuffixIndex};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::ops::Range;

/// One occurrence of a frequent pattern inside a sentence.
///
/// Ordering is by start, then length, then rank: the order the assembler
/// walks a sentence in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    /// Global corpus position of the first token
    pub start: Position,
    /// Number of tokens
    pub len: u32,
    /// Rank of the pattern in the frequent ranking
    pub rank: u32,
}

impl Match {
    /// Exclusive end position
    #[inline]
    pub fn end(&self) -> u64 {
        self.start as u64 + self.len as u64
    }
}

/// Locate every frequent pattern and group the occurrences by sentence.
///
/// Returns one ordered match list per sentence. An occurrence that does not
/// fit entirely inside a sentence means the suffix array and its sentence
/// boundaries disagree, and aborts with [`Error::OutOfBounds`].
pub fn locate_matches<S: SuffixIndex + ?Sized>(
    sa: &S,
    frequent: &FrequentPatterns,
) -> Result<Vec<Vec<Match>>> {
    let num_sentences = sa.num_sentences();
    let ranges: Vec<Range<Position>> = (0..num_sentences).map(|s| sa.sentence_range(s)).collect();

    let located: Vec<Vec<(usize, Match)>> = (0..frequent.len() as u32)
        .into_par_iter()
        .map(|rank| {
            let pattern = frequent.pattern(rank);
            let len = pattern.len() as u32;
            sa.locate(pattern)
                .into_iter()
                .map(|start| {
                    let m = Match { start, len, rank };
                    sentence_of(&ranges, &m).map(|sentence| (sentence, m))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut per_sentence: Vec<Vec<Match>> = vec![Vec::new(); num_sentences];
    for (sentence, m) in located.into_iter().flatten() {
        per_sentence[sentence].push(m);
    }
    per_sentence.par_iter_mut().for_each(|matches| matches.sort_unstable());

    tracing::debug!(
        sentences = num_sentences,
        matches = per_sentence.iter().map(Vec::len).sum::<usize>(),
        "located frequent pattern matches"
    );

    Ok(per_sentence)
}

/// Index of the sentence containing the whole match
fn sentence_of(ranges: &[Range<Position>], m: &Match) -> Result<usize> {
    let idx = ranges.partition_point(|range| range.start <= m.start);
    let out_of_bounds = |range_start: Position, range_end: Position| Error::OutOfBounds {
        position: m.start as u64,
        len: m.len as u64,
        range_start: range_start as u64,
        range_end: range_end as u64,
    };

    if idx == 0 {
        let first = ranges.first().map_or(0, |r| r.start);
        return Err(out_of_bounds(0, first));
    }

    let range = &ranges[idx - 1];
    if m.end() > range.end as u64 {
        return Err(out_of_bounds(range.start, range.end));
    }

    Ok(idx - 1)
}
