//! Configuration handling for the pairalign CLI
//!
//! Supports loading configuration from pairalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use pairalign_core::Scoring;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "pairalign.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Match reward and mismatch/gap penalties for global and local alignment
    #[serde(default)]
    pub scoring: Scoring,

    #[serde(default)]
    pub kmer: KmerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmerConfig {
    /// Default k-mer length for shared k-mer counting
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    3
}

impl Default for KmerConfig {
    fn default() -> Self {
        Self { k: default_k() }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply command line overrides on top of the file values
    pub fn scoring_with(
        &self,
        match_score: Option<f64>,
        mismatch_penalty: Option<f64>,
        gap_penalty: Option<f64>,
    ) -> Scoring {
        Scoring {
            match_score: match_score.unwrap_or(self.scoring.match_score),
            mismatch_penalty: mismatch_penalty.unwrap_or(self.scoring.mismatch_penalty),
            gap_penalty: gap_penalty.unwrap_or(self.scoring.gap_penalty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring, Scoring::default());
        assert_eq!(config.kmer.k, 3);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scoring]").unwrap();
        writeln!(file, "gap_penalty = 0.5").unwrap();
        file.as_file().sync_all().unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.scoring, Scoring::new(1.0, 1.0, 0.5));
        assert_eq!(config.kmer, KmerConfig::default());
    }

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scoring]").unwrap();
        writeln!(file, "match_score = 2.0").unwrap();
        writeln!(file, "mismatch_penalty = 0.5").unwrap();
        writeln!(file, "gap_penalty = 1.5").unwrap();
        writeln!(file, "[kmer]").unwrap();
        writeln!(file, "k = 11").unwrap();
        file.as_file().sync_all().unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.scoring, Scoring::new(2.0, 0.5, 1.5));
        assert_eq!(config.kmer.k, 11);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scoring").unwrap();
        file.as_file().sync_all().unwrap();

        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config {
            scoring: Scoring::new(2.0, 0.5, 1.5),
            ..Default::default()
        };

        assert_eq!(config.scoring_with(None, None, None), config.scoring);
        assert_eq!(
            config.scoring_with(Some(1.0), None, Some(0.25)),
            Scoring::new(1.0, 0.5, 0.25)
        );
    }
}
