//! # colloc - Collocation precomputation for suffix-array grammar extraction
//!
//! Hierarchical phrase extraction spends most of its lookup time on gapped
//! patterns built from very frequent words. colloc finds those patterns
//! ahead of time and stores every occurrence in a compact, reloadable index.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`corpus`] - Suffix array access (the [`corpus::SuffixIndex`] trait) and loading
//! - [`precompute`] - Frequent pattern mining, collocation assembly, the index and its codec
//! - [`config`] - Precomputation thresholds
//! - [`stats`] - Human-readable reports over a persisted index
//! - [`utils`] - Varint encoding and progress reporting
//!
//! ## Quick Start
//!
//! ```ignore
//! use colloc::{Precomputation, PrecomputationConfig, SuffixArray};
//! use std::path::Path;
//!
//! let sa = SuffixArray::open(Path::new("/data/corpus-sa")).unwrap();
//! let precomputation = Precomputation::build(&sa, &PrecomputationConfig::default()).unwrap();
//! precomputation.write_to_file(Path::new("collocations.bin")).unwrap();
//!
//! // Later, in the extractor
//! let loaded = Precomputation::read_from_file(Path::new("collocations.bin")).unwrap();
//! let occurrences = loaded.collocations().get(&[12, colloc::FIRST_NONTERMINAL, 7]);
//! ```
//!
//! ## Collocations
//!
//! A template is `a X b` or `a X b Y c`, where `a`, `b` and `c` are frequent
//! contiguous patterns and `X`, `Y` are gaps of at least `min_gap_size`
//! tokens. Ternary templates require a super-frequent middle pattern plus
//! one super-frequent neighbor.

pub mod config;
pub mod corpus;
pub mod error;
pub mod precompute;
pub mod stats;
pub mod utils;

pub use config::PrecomputationConfig;
pub use corpus::{Position, SuffixArray, SuffixIndex, Token};
pub use error::{Error, Result};
pub use precompute::{
    CollocationIndex, Occurrence, Precomputation, FIRST_NONTERMINAL, SECOND_NONTERMINAL,
};
