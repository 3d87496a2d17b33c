//! CLI interface for the resume ranker

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description by lexical similarity")]
#[command(long_about = "Score a batch of resumes against one job description using TF-IDF weighting and cosine similarity, then print or export the ranked table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD)
        resumes: Vec<PathBuf>,

        /// Also rank every supported file in this directory
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show normalized text statistics per document
        #[arg(long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "thresholds.good")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, csv", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("README"), &["pdf"]).is_err());
    }

    #[test]
    fn test_rank_command_parses() {
        let cli = Cli::parse_from([
            "resume-ranker", "rank", "--job", "job.txt", "a.pdf", "b.txt", "--output", "csv",
        ]);
        match cli.command {
            Commands::Rank { job, resumes, output, .. } => {
                assert_eq!(job, PathBuf::from("job.txt"));
                assert_eq!(resumes.len(), 2);
                assert_eq!(output.as_deref(), Some("csv"));
            }
            _ => panic!("expected rank command"),
        }
    }
}
