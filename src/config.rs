//! Thresholds controlling which collocations get indexed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Precomputation thresholds, loadable from a JSON file.
///
/// Missing fields fall back to their defaults, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecomputationConfig {
    /// How many of the most frequent contiguous patterns count as frequent
    #[serde(default = "default_num_frequent_patterns")]
    pub num_frequent_patterns: usize,

    /// How many of the frequent patterns (from the top) are super-frequent
    #[serde(default = "default_num_super_frequent_patterns")]
    pub num_super_frequent_patterns: usize,

    /// Maximum distance from the first to the last covered token, gaps included
    #[serde(default = "default_max_rule_span")]
    pub max_rule_span: usize,

    /// Maximum number of tokens plus gap markers in one template
    #[serde(default = "default_max_rule_symbols")]
    pub max_rule_symbols: usize,

    /// Minimum number of tokens between adjacent components; components
    /// never touch, so 0 behaves like 1
    #[serde(default = "default_min_gap_size")]
    pub min_gap_size: usize,

    /// Maximum length of a contiguous frequent pattern
    #[serde(default = "default_max_frequent_phrase_len")]
    pub max_frequent_phrase_len: usize,

    /// Minimum corpus frequency for a pattern to be ranked at all
    #[serde(default = "default_min_frequency")]
    pub min_frequency: usize,
}

fn default_num_frequent_patterns() -> usize {
    100
}

fn default_num_super_frequent_patterns() -> usize {
    10
}

fn default_max_rule_span() -> usize {
    15
}

fn default_max_rule_symbols() -> usize {
    5
}

fn default_min_gap_size() -> usize {
    1
}

fn default_max_frequent_phrase_len() -> usize {
    4
}

fn default_min_frequency() -> usize {
    1000
}

impl Default for PrecomputationConfig {
    fn default() -> Self {
        Self {
            num_frequent_patterns: default_num_frequent_patterns(),
            num_super_frequent_patterns: default_num_super_frequent_patterns(),
            max_rule_span: default_max_rule_span(),
            max_rule_symbols: default_max_rule_symbols(),
            min_gap_size: default_min_gap_size(),
            max_frequent_phrase_len: default_max_frequent_phrase_len(),
            min_frequency: default_min_frequency(),
        }
    }
}

impl PrecomputationConfig {
    /// Load a config file, or return the defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: PrecomputationConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject threshold combinations the precomputation cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.num_super_frequent_patterns > self.num_frequent_patterns {
            return Err(Error::InvalidConfig(format!(
                "num_super_frequent_patterns ({}) exceeds num_frequent_patterns ({})",
                self.num_super_frequent_patterns, self.num_frequent_patterns
            )));
        }
        if self.max_frequent_phrase_len == 0 {
            return Err(Error::InvalidConfig(
                "max_frequent_phrase_len must be at least 1".to_string(),
            ));
        }
        if self.num_frequent_patterns > u32::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "num_frequent_patterns ({}) exceeds the pattern rank range",
                self.num_frequent_patterns
            )));
        }
        Ok(())
    }
}
