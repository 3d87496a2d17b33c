//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub normalization: NormalizationConfig,
    pub vectorizer: VectorizerConfig,
    pub thresholds: ScoreThresholds,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Reduce tokens to their base form
    pub lemmatize: bool,
    /// Stop words removed in addition to the built-in English list
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub min_token_len: usize,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

/// Inclusive lower bounds for the interpretation labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            lemmatize: true,
            extra_stop_words: Vec::new(),
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.75,
            good: 0.5,
            average: 0.3,
        }
    }
}

impl ScoreThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_range(self.excellent) && in_range(self.good) && in_range(self.average)) {
            return Err(ResumeRankerError::Configuration(
                "Score thresholds must lie within [0, 1]".to_string(),
            ));
        }
        if !(self.excellent >= self.good && self.good >= self.average) {
            return Err(ResumeRankerError::Configuration(format!(
                "Score thresholds must be ordered excellent >= good >= average (got {} / {} / {})",
                self.excellent, self.good, self.average
            )));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalization: NormalizationConfig::default(),
            vectorizer: VectorizerConfig::default(),
            thresholds: ScoreThresholds::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.thresholds.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    /// Set a single value addressed by a dotted key, e.g. `thresholds.good`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)
            .map_err(|e| ResumeRankerError::Configuration(format!("{:#}", e)))?;
        self.thresholds.validate()
    }

    fn apply(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let parse_f64 = |v: &str| -> anyhow::Result<f64> {
            v.parse::<f64>().with_context(|| format!("'{}' is not a number", v))
        };
        let parse_bool = |v: &str| -> anyhow::Result<bool> {
            v.parse::<bool>().with_context(|| format!("'{}' is not true or false", v))
        };

        match key {
            "thresholds.excellent" => self.thresholds.excellent = parse_f64(value)?,
            "thresholds.good" => self.thresholds.good = parse_f64(value)?,
            "thresholds.average" => self.thresholds.average = parse_f64(value)?,
            "vectorizer.min_token_len" => {
                self.vectorizer.min_token_len = value
                    .parse::<usize>()
                    .with_context(|| format!("'{}' is not a positive integer", value))?
            }
            "vectorizer.smooth_idf" => self.vectorizer.smooth_idf = parse_bool(value)?,
            "vectorizer.sublinear_tf" => self.vectorizer.sublinear_tf = parse_bool(value)?,
            "normalization.lemmatize" => self.normalization.lemmatize = parse_bool(value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value).map_err(anyhow::Error::msg)?
            }
            "output.color_output" => self.output.color_output = parse_bool(value)?,
            "output.pretty_json" => self.output.pretty_json = parse_bool(value)?,
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.thresholds.excellent, 0.75);
        assert_eq!(config.thresholds.good, 0.5);
        assert_eq!(config.thresholds.average, 0.3);
        assert!(config.thresholds.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.vectorizer.sublinear_tf = true;
        config.normalization.extra_stop_words = vec!["responsibilities".to_string()];
        config.output.format = OutputFormat::Csv;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("thresholds.excellent", "0.8").unwrap();
        config.set("vectorizer.min_token_len", "3").unwrap();
        config.set("normalization.lemmatize", "false").unwrap();
        config.set("output.format", "md").unwrap();

        assert_eq!(config.thresholds.excellent, 0.8);
        assert_eq!(config.vectorizer.min_token_len, 3);
        assert!(!config.normalization.lemmatize);
        assert_eq!(config.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("thresholds.good", "high").is_err());
        assert!(config.set("vectorizer.smooth_idf", "maybe").is_err());
        assert!(config.set("scoring.embedding_weight", "0.3").is_err());
        // good above excellent breaks the ordering
        assert!(config.set("thresholds.good", "0.9").is_err());
    }

    #[test]
    fn test_load_rejects_unordered_thresholds() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.thresholds.average = 0.9;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
