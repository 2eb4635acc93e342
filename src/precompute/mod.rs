//! Collocation precomputation
//!
//! Indexes discontiguous collocations of frequent patterns ahead of time, so
//! a grammar extractor can answer gapped pattern lookups without scanning the
//! suffix array.
//!
//! ## Pipeline
//!
//! 1. `frequent`: rank contiguous patterns by corpus frequency
//! 2. `matcher`: locate every ranked pattern and bucket matches by sentence
//! 3. `assembler`: combine matches of one sentence into `a X b` and
//!    `a X b Y c` occurrences under the span, gap and symbol limits
//! 4. `precomputation`: run 1-3 over all sentences in parallel and merge
//!
//! `codec` persists the resulting [`CollocationIndex`].

pub mod assembler;
pub mod codec;
pub mod frequent;
pub mod index;
pub mod matcher;
pub mod precomputation;
pub mod types;

pub use assembler::{CollocationAssembler, Constraints};
pub use frequent::{FrequentPatterns, RankedPattern, Tier};
pub use index::{CollocationIndex, IndexStats};
pub use matcher::{locate_matches, Match};
pub use precomputation::Precomputation;
pub use types::{
    format_template, parse_template, template_arity, template_components, Occurrence, Template,
    FIRST_NONTERMINAL, SECOND_NONTERMINAL,
};
