//! Solver configuration, loadable from TOML.
//!
//! ```
//! use fillcsp::SolverConfig;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     distinct_words = false
//!     max_states = 10000
//! "#).unwrap();
//!
//! assert!(!config.distinct_words);
//! assert_eq!(config.max_states, Some(10000));
//! assert!(!config.maintain_arc_consistency);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backtracking_search::SearchSettings;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Require every slot to get a different word.
    pub distinct_words: bool,

    /// Re-run arc consistency on the crossing slots after each tentative choice, instead of only
    /// checking the choice against the slots already filled.
    pub maintain_arc_consistency: bool,

    /// Give up after selecting this many slots during search.
    pub max_states: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            distinct_words: true,
            maintain_arc_consistency: false,
            max_states: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the search cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_states == Some(0) {
            return Err(ConfigError::Invalid("max_states must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_distinct_words(mut self, distinct_words: bool) -> Self {
        self.distinct_words = distinct_words;
        self
    }

    pub fn with_arc_consistency_maintained(mut self, maintain: bool) -> Self {
        self.maintain_arc_consistency = maintain;
        self
    }

    pub fn with_max_states(mut self, max_states: u64) -> Self {
        self.max_states = Some(max_states);
        self
    }

    pub(crate) fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            distinct_words: self.distinct_words,
            maintain_arc_consistency: self.maintain_arc_consistency,
            max_states: self.max_states,
        }
    }
}
