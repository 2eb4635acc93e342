//! Per-sentence assembly of discontiguous collocations.
//!
//! Given the ordered matches of frequent patterns in one sentence, emits:
//! - `a X b` for every pair of frequent matches `a`, `b`
//! - `a X b Y c` for every triple where `a, b` or `b, c` are super-frequent
//!
//! subject to the gap, span and symbol limits.

use super::frequent::FrequentPatterns;
use super::index::CollocationIndex;
use super::matcher::Match;
use super::types::{Occurrence, FIRST_NONTERMINAL, SECOND_NONTERMINAL};
use crate::config::PrecomputationConfig;
use crate::corpus::{Position, Token};
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::ops::Range;

/// Shape limits applied to every collocation occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Maximum distance from the first covered token to the last, inclusive
    pub max_rule_span: usize,
    /// Minimum tokens between adjacent components
    pub min_gap_size: usize,
    /// Maximum tokens plus markers in a template
    pub max_rule_symbols: usize,
}

impl From<&PrecomputationConfig> for Constraints {
    fn from(config: &PrecomputationConfig) -> Self {
        Self {
            max_rule_span: config.max_rule_span,
            min_gap_size: config.min_gap_size,
            max_rule_symbols: config.max_rule_symbols,
        }
    }
}

impl Constraints {
    /// `right` starts at least `min_gap_size` tokens after `left` ends, and
    /// never directly after it
    #[inline]
    fn gap_ok(&self, left: &Match, right: &Match) -> bool {
        right.start as u64 >= left.end() + self.min_gap_size.max(1) as u64
    }

    /// Tokens from `first` through `last` fit in the span limit
    #[inline]
    fn span_ok(&self, first: &Match, last: &Match) -> bool {
        last.end() - first.start as u64 <= self.max_rule_span as u64
    }

    /// No later match can start close enough to `first`
    #[inline]
    fn past_span(&self, first: &Match, candidate: &Match) -> bool {
        (candidate.start - first.start) as usize >= self.max_rule_span
    }

    /// Tokens of all components plus one marker per gap fit the symbol budget
    #[inline]
    fn symbols_ok(&self, parts: &[&Match]) -> bool {
        let tokens: usize = parts.iter().map(|m| m.len as usize).sum();
        tokens + parts.len() - 1 <= self.max_rule_symbols
    }
}

/// Builds the collocation entries of single sentences
pub struct CollocationAssembler<'a> {
    frequent: &'a FrequentPatterns,
    constraints: Constraints,
}

impl<'a> CollocationAssembler<'a> {
    pub fn new(frequent: &'a FrequentPatterns, constraints: Constraints) -> Self {
        Self {
            frequent,
            constraints,
        }
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Collect every valid collocation occurrence of one sentence
    ///
    /// `sentence` is the global token range of the sentence and `matches`
    /// the frequent-pattern matches inside it. Matches are walked in
    /// (start, length, rank) order; unordered input is sorted first.
    pub fn assemble(
        &self,
        sentence: Range<Position>,
        matches: &[Match],
    ) -> Result<CollocationIndex> {
        for m in matches {
            if m.start < sentence.start || m.end() > sentence.end as u64 {
                return Err(Error::OutOfBounds {
                    position: m.start as u64,
                    len: m.len as u64,
                    range_start: sentence.start as u64,
                    range_end: sentence.end as u64,
                });
            }
        }

        let matches: Cow<'_, [Match]> = if matches.is_sorted() {
            Cow::Borrowed(matches)
        } else {
            let mut sorted = matches.to_vec();
            sorted.sort_unstable();
            Cow::Owned(sorted)
        };

        let mut index = CollocationIndex::new();
        let mut template: Vec<Token> = Vec::with_capacity(self.constraints.max_rule_symbols);
        let c = &self.constraints;

        // Leftmost component
        for (i, a) in matches.iter().enumerate() {
            // Middle component
            for (j, b) in matches.iter().enumerate().skip(i + 1) {
                if c.past_span(a, b) {
                    break;
                }
                if !(c.gap_ok(a, b) && c.span_ok(a, b) && c.symbols_ok(&[a, b])) {
                    continue;
                }

                template.clear();
                template.extend_from_slice(self.frequent.pattern(a.rank));
                template.push(FIRST_NONTERMINAL);
                template.extend_from_slice(self.frequent.pattern(b.rank));
                index.push(&template, Occurrence::Binary([a.start, b.start]));

                // Every ternary needs a super-frequent middle
                if !self.frequent.is_super_rank(b.rank) {
                    continue;
                }
                let binary_len = template.len();

                // Rightmost component
                for cm in matches.iter().skip(j + 1) {
                    if c.past_span(a, cm) {
                        break;
                    }
                    if !(c.gap_ok(b, cm) && c.span_ok(a, cm) && c.symbols_ok(&[a, b, cm])) {
                        continue;
                    }
                    let super_neighbor = self.frequent.is_super_rank(a.rank)
                        || self.frequent.is_super_rank(cm.rank);
                    if !super_neighbor {
                        continue;
                    }

                    template.truncate(binary_len);
                    template.push(SECOND_NONTERMINAL);
                    template.extend_from_slice(self.frequent.pattern(cm.rank));
                    index.push(&template, Occurrence::Ternary([a.start, b.start, cm.start]));
                }
            }
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precompute::frequent::RankedPattern;

    const X: Token = FIRST_NONTERMINAL;
    const Y: Token = SECOND_NONTERMINAL;

    fn ranked(patterns: &[&[Token]], num_super: usize) -> FrequentPatterns {
        let ranked = patterns
            .iter()
            .map(|p| RankedPattern {
                pattern: p.to_vec(),
                frequency: 2,
            })
            .collect();
        FrequentPatterns::from_ranked(ranked, num_super)
    }

    /// Matches of every ranked pattern in `tokens`, as the locator would produce
    fn matches_in(tokens: &[Token], frequent: &FrequentPatterns) -> Vec<Match> {
        let mut matches = Vec::new();
        for start in 0..tokens.len() {
            for len in 1..=tokens.len() - start {
                if let Some(rank) = frequent.rank(&tokens[start..start + len]) {
                    matches.push(Match {
                        start: start as Position,
                        len: len as u32,
                        rank,
                    });
                }
            }
        }
        matches.sort_unstable();
        matches
    }

    fn constraints(span: usize, gap: usize, symbols: usize) -> Constraints {
        Constraints {
            max_rule_span: span,
            min_gap_size: gap,
            max_rule_symbols: symbols,
        }
    }

    #[test]
    fn test_binary_scenario() {
        let tokens = [1, 2, 3, 1, 2, 4];
        let frequent = ranked(&[&[1], &[2]], 0);
        let matches = matches_in(&tokens, &frequent);
        let assembler = CollocationAssembler::new(&frequent, constraints(6, 1, 3));
        let index = assembler.assemble(0..6, &matches).unwrap();

        assert_eq!(index.get(&[1, X, 1]).unwrap(), &[Occurrence::Binary([0, 3])]);
        assert_eq!(index.get(&[1, X, 2]).unwrap(), &[Occurrence::Binary([0, 4])]);
        assert_eq!(index.get(&[2, X, 1]).unwrap(), &[Occurrence::Binary([1, 3])]);
        assert_eq!(index.get(&[2, X, 2]).unwrap(), &[Occurrence::Binary([1, 4])]);
        // 1 at 0 and 2 at 1 are adjacent, 2 at 4 and 1 at 3 are out of order
        assert_eq!(index.len(), 4);
        assert_eq!(index.occurrence_count(), 4);
    }

    #[test]
    fn test_gap_limit() {
        let tokens = [1, 9, 2, 9, 9, 1];
        let frequent = ranked(&[&[1], &[2]], 0);
        let matches = matches_in(&tokens, &frequent);

        let index = CollocationAssembler::new(&frequent, constraints(10, 2, 5))
            .assemble(0..6, &matches)
            .unwrap();
        // 1@0 -> 2@2 has a one-token gap
        assert!(!index.contains(&[1, X, 2]));
        assert_eq!(index.get(&[2, X, 1]).unwrap(), &[Occurrence::Binary([2, 5])]);
        assert_eq!(index.get(&[1, X, 1]).unwrap(), &[Occurrence::Binary([0, 5])]);
    }

    #[test]
    fn test_zero_gap_matches_gap_of_one() {
        let tokens = [1, 2, 1, 9, 2, 1];
        let frequent = ranked(&[&[1], &[2]], 2);
        let matches = matches_in(&tokens, &frequent);

        let zero = CollocationAssembler::new(&frequent, constraints(10, 0, 5))
            .assemble(0..6, &matches)
            .unwrap();
        let one = CollocationAssembler::new(&frequent, constraints(10, 1, 5))
            .assemble(0..6, &matches)
            .unwrap();
        assert_eq!(zero, one);
        // Adjacent 1 2 at 0..2 never pairs up
        assert!(!zero.get(&[1, X, 2]).unwrap().contains(&Occurrence::Binary([0, 1])));
        assert!(zero.get(&[1, X, 1]).unwrap().contains(&Occurrence::Binary([0, 2])));
    }

    #[test]
    fn test_span_limit() {
        let tokens = [1, 9, 9, 9, 2, 2];
        let frequent = ranked(&[&[1], &[2], &[2, 2]], 0);
        let matches = matches_in(&tokens, &frequent);

        let index = CollocationAssembler::new(&frequent, constraints(5, 1, 5))
            .assemble(0..6, &matches)
            .unwrap();
        // 1@0 .. 2@4 spans 5 tokens, 1@0 .. [2 2]@4 spans 6
        assert_eq!(index.get(&[1, X, 2]).unwrap(), &[Occurrence::Binary([0, 4])]);
        assert!(!index.contains(&[1, X, 2, 2]));
    }

    #[test]
    fn test_symbol_limit() {
        let tokens = [1, 2, 9, 1, 2];
        let frequent = ranked(&[&[1], &[1, 2], &[2]], 3);
        let matches = matches_in(&tokens, &frequent);

        let index = CollocationAssembler::new(&frequent, constraints(10, 1, 4))
            .assemble(0..5, &matches)
            .unwrap();
        assert!(index.contains(&[1, 2, X, 1]));
        assert!(index.contains(&[2, X, 1, 2]));
        // 2 + 1 + 2 = 5 symbols
        assert!(!index.contains(&[1, 2, X, 1, 2]));
    }

    #[test]
    fn test_ternary_tier_gating() {
        let tokens = [1, 9, 2, 9, 3];
        let constraints = constraints(10, 1, 10);

        // a, b super-frequent
        let frequent = ranked(&[&[1], &[2], &[3]], 2);
        let index = CollocationAssembler::new(&frequent, constraints)
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert_eq!(
            index.get(&[1, X, 2, Y, 3]).unwrap(),
            &[Occurrence::Ternary([0, 2, 4])]
        );

        // b, c super-frequent
        let frequent = ranked(&[&[2], &[3], &[1]], 2);
        let index = CollocationAssembler::new(&frequent, constraints)
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert!(index.contains(&[1, X, 2, Y, 3]));

        // a, c super-frequent but b is not
        let frequent = ranked(&[&[1], &[3], &[2]], 2);
        let index = CollocationAssembler::new(&frequent, constraints)
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert!(!index.contains(&[1, X, 2, Y, 3]));
        assert!(index.contains(&[1, X, 2]));
        assert!(index.contains(&[2, X, 3]));

        // only b super-frequent
        let frequent = ranked(&[&[2], &[1], &[3]], 1);
        let index = CollocationAssembler::new(&frequent, constraints)
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert!(!index.contains(&[1, X, 2, Y, 3]));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_ternary_constraints() {
        let tokens = [1, 9, 2, 9, 3];
        let frequent = ranked(&[&[1], &[2], &[3]], 3);

        // Span of 5 needed
        let index = CollocationAssembler::new(&frequent, constraints(4, 1, 10))
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert!(!index.contains(&[1, X, 2, Y, 3]));
        assert!(index.contains(&[1, X, 2]));

        // Five symbols needed
        let index = CollocationAssembler::new(&frequent, constraints(10, 1, 4))
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();
        assert!(!index.contains(&[1, X, 2, Y, 3]));
        assert!(index.contains(&[2, X, 3]));
    }

    #[test]
    fn test_records_in_discovery_order() {
        let tokens = [1, 9, 1, 9, 1];
        let frequent = ranked(&[&[1]], 1);
        let index = CollocationAssembler::new(&frequent, constraints(10, 1, 10))
            .assemble(0..5, &matches_in(&tokens, &frequent))
            .unwrap();

        assert_eq!(
            index.get(&[1, X, 1]).unwrap(),
            &[
                Occurrence::Binary([0, 2]),
                Occurrence::Binary([0, 4]),
                Occurrence::Binary([2, 4]),
            ]
        );
        assert_eq!(
            index.get(&[1, X, 1, Y, 1]).unwrap(),
            &[Occurrence::Ternary([0, 2, 4])]
        );
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let tokens = [1, 9, 1, 9, 1];
        let frequent = ranked(&[&[1]], 1);
        let assembler = CollocationAssembler::new(&frequent, constraints(10, 1, 10));

        let sorted = matches_in(&tokens, &frequent);
        let mut reversed = sorted.clone();
        reversed.reverse();
        assert_eq!(
            assembler.assemble(0..5, &sorted).unwrap(),
            assembler.assemble(0..5, &reversed).unwrap()
        );
    }

    #[test]
    fn test_global_offsets() {
        // Sentence occupying 100..105 of the corpus
        let frequent = ranked(&[&[1]], 1);
        let matches = vec![
            Match { start: 100, len: 1, rank: 0 },
            Match { start: 104, len: 1, rank: 0 },
        ];
        let index = CollocationAssembler::new(&frequent, constraints(10, 1, 10))
            .assemble(100..105, &matches)
            .unwrap();
        assert_eq!(index.get(&[1, X, 1]).unwrap(), &[Occurrence::Binary([100, 104])]);
    }

    #[test]
    fn test_match_outside_sentence() {
        let frequent = ranked(&[&[1]], 1);
        let matches = vec![Match { start: 4, len: 2, rank: 0 }];
        let err = CollocationAssembler::new(&frequent, constraints(10, 1, 10))
            .assemble(0..5, &matches)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { position: 4, len: 2, .. }));
    }

    #[test]
    fn test_empty_sentence() {
        let frequent = ranked(&[&[1]], 1);
        let index = CollocationAssembler::new(&frequent, constraints(10, 1, 10))
            .assemble(3..3, &[])
            .unwrap();
        assert!(index.is_empty());
    }
}
