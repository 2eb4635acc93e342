//! Frequent contiguous pattern mining.
//!
//! Ranks every contiguous pattern of length `1..=max_len` occurring at least
//! `min_frequency` times by descending frequency, ties broken by ascending
//! token order, and keeps the top `num_frequent`. The first
//! `num_super_frequent` entries of that ranking are super-frequent.
//!
//! A prefix occurs at least as often as any of its extensions and sorts
//! before them, so every prefix of a ranked pattern is ranked higher than the
//! pattern itself. The match locator depends on this.

use crate::corpus::{SuffixIndex, Token};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// A mined pattern with its corpus frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPattern {
    pub pattern: Vec<Token>,
    pub frequency: usize,
}

/// Frequency tier of a ranked pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    SuperFrequent,
    Frequent,
}

/// Ranked frequent patterns with O(1) tier lookup
#[derive(Debug, Clone, Default)]
pub struct FrequentPatterns {
    ranked: Vec<RankedPattern>,
    num_super_frequent: usize,
    ranks: FxHashMap<Vec<Token>, u32>,
}

impl FrequentPatterns {
    /// Mine the most frequent contiguous patterns of `sa`
    ///
    /// Candidates are generated level by level from sentence tokens. A
    /// length-k window is only counted if both of its length-(k-1)
    /// sub-windows met the frequency floor.
    pub fn find<S: SuffixIndex + ?Sized>(
        sa: &S,
        num_frequent: usize,
        num_super_frequent: usize,
        max_len: usize,
        min_frequency: usize,
    ) -> Self {
        let mut qualified: Vec<RankedPattern> = Vec::new();
        let mut previous: FxHashSet<&[Token]> = FxHashSet::default();

        for len in 1..=max_len {
            let mut candidates: FxHashSet<&[Token]> = FxHashSet::default();
            for sentence_id in 0..sa.num_sentences() {
                for window in sa.sentence(sentence_id).windows(len) {
                    if len == 1
                        || (previous.contains(&window[..len - 1])
                            && previous.contains(&window[1..]))
                    {
                        candidates.insert(window);
                    }
                }
            }
            if candidates.is_empty() {
                break;
            }

            let candidates: Vec<&[Token]> = candidates.into_iter().collect();
            let counted: Vec<(&[Token], usize)> = candidates
                .par_iter()
                .map(|&pattern| (pattern, sa.count(pattern)))
                .filter(|&(_, frequency)| frequency >= min_frequency)
                .collect();

            tracing::debug!(
                len,
                candidates = candidates.len(),
                qualified = counted.len(),
                "counted pattern candidates"
            );

            previous = counted.iter().map(|&(pattern, _)| pattern).collect();
            qualified.extend(counted.into_iter().map(|(pattern, frequency)| RankedPattern {
                pattern: pattern.to_vec(),
                frequency,
            }));

            if previous.is_empty() {
                break;
            }
        }

        qualified.par_sort_unstable_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.pattern.cmp(&b.pattern))
        });
        qualified.truncate(num_frequent);

        Self::from_ranked(qualified, num_super_frequent)
    }

    /// Wrap an already ranked list; the first `num_super_frequent` entries
    /// are super-frequent
    pub fn from_ranked(ranked: Vec<RankedPattern>, num_super_frequent: usize) -> Self {
        let ranks = ranked
            .iter()
            .enumerate()
            .map(|(rank, entry)| (entry.pattern.clone(), rank as u32))
            .collect();
        let num_super_frequent = num_super_frequent.min(ranked.len());

        Self {
            ranked,
            num_super_frequent,
            ranks,
        }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn num_super_frequent(&self) -> usize {
        self.num_super_frequent
    }

    /// Ranked patterns, most frequent first
    pub fn patterns(&self) -> &[RankedPattern] {
        &self.ranked
    }

    /// Pattern at `rank`
    pub fn pattern(&self, rank: u32) -> &[Token] {
        &self.ranked[rank as usize].pattern
    }

    pub fn rank(&self, pattern: &[Token]) -> Option<u32> {
        self.ranks.get(pattern).copied()
    }

    #[inline]
    pub fn is_super_rank(&self, rank: u32) -> bool {
        (rank as usize) < self.num_super_frequent
    }

    pub fn tier(&self, pattern: &[Token]) -> Option<Tier> {
        self.rank(pattern).map(|rank| {
            if self.is_super_rank(rank) {
                Tier::SuperFrequent
            } else {
                Tier::Frequent
            }
        })
    }

    pub fn is_frequent(&self, pattern: &[Token]) -> bool {
        self.ranks.contains_key(pattern)
    }

    pub fn is_super_frequent(&self, pattern: &[Token]) -> bool {
        self.tier(pattern) == Some(Tier::SuperFrequent)
    }
}
