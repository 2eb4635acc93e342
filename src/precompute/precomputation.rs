//! Build orchestration and persistence of the collocation index.

use super::assembler::{CollocationAssembler, Constraints};
use super::codec;
use super::frequent::FrequentPatterns;
use super::index::CollocationIndex;
use super::matcher::locate_matches;
use crate::config::PrecomputationConfig;
use crate::corpus::SuffixIndex;
use crate::error::Result;
use crate::utils::progress;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

/// Sentences assembled per parallel batch
const SENTENCE_CHUNK: usize = 4096;

/// Precomputed collocations of a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Precomputation {
    collocations: CollocationIndex,
}

impl Precomputation {
    /// Build the collocation index of `sa`
    pub fn build<S: SuffixIndex + ?Sized>(sa: &S, config: &PrecomputationConfig) -> Result<Self> {
        Self::build_with_progress(sa, config, true)
    }

    /// Build the collocation index of `sa`, drawing progress unless `silent`
    ///
    /// Sentences are assembled in parallel and merged back in corpus order,
    /// so the result does not depend on the thread count.
    pub fn build_with_progress<S: SuffixIndex + ?Sized>(
        sa: &S,
        config: &PrecomputationConfig,
        silent: bool,
    ) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let spinner = progress::spinner("Mining frequent patterns...", silent);
        let frequent = FrequentPatterns::find(
            sa,
            config.num_frequent_patterns,
            config.num_super_frequent_patterns,
            config.max_frequent_phrase_len,
            config.min_frequency,
        );
        spinner.finish_and_clear();
        tracing::info!(
            frequent = frequent.len(),
            super_frequent = frequent.num_super_frequent(),
            "ranked frequent patterns"
        );

        let matches = locate_matches(sa, &frequent)?;
        let assembler = CollocationAssembler::new(&frequent, Constraints::from(config));

        let num_sentences = sa.num_sentences();
        let pb = progress::bar(num_sentences as u64, "Assembling collocations", silent);
        let mut collocations = CollocationIndex::new();

        for (chunk_idx, chunk) in matches.chunks(SENTENCE_CHUNK).enumerate() {
            let first = chunk_idx * SENTENCE_CHUNK;
            let partials: Vec<CollocationIndex> = chunk
                .par_iter()
                .enumerate()
                .map(|(offset, sentence_matches)| {
                    let range = sa.sentence_range(first + offset);
                    let partial = assembler.assemble(range, sentence_matches);
                    pb.inc(1);
                    partial
                })
                .collect::<Result<Vec<_>>>()?;

            for partial in partials {
                collocations.merge(partial);
            }
        }
        pb.finish_and_clear();

        tracing::info!(
            sentences = num_sentences,
            templates = collocations.len(),
            occurrences = collocations.occurrence_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "precomputation complete"
        );

        Ok(Self { collocations })
    }

    /// Wrap an existing index
    pub fn from_collocations(collocations: CollocationIndex) -> Self {
        Self { collocations }
    }

    pub fn collocations(&self) -> &CollocationIndex {
        &self.collocations
    }

    /// Serialize the index; see [`codec`] for the layout
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(&self.collocations)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes).map(Self::from_collocations)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.encode();
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&bytes)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote collocation index");
        Ok(())
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let mut bytes = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;

        let precomputation = Self::decode(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            templates = precomputation.collocations.len(),
            "read collocation index"
        );
        Ok(precomputation)
    }
}
