//! resume-ranker: rank resumes against a job description by TF-IDF similarity

use clap::Parser;
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::Config;
use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, suggest_filename};
use resume_ranker::output::{RankingReport, ReportGenerator};
use resume_ranker::processing::RankingEngine;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) if path.exists() => Config::load_from(path),
        Some(_) => Ok(Config::default()),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            dir,
            output,
            save,
            detailed,
        } => {
            info!("Starting resume ranking");

            cli::validate_file_extension(&job, &["txt", "md", "markdown"])
                .map_err(|e| ResumeRankerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeRankerError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();

            let mut resume_paths = resumes;
            if let Some(dir) = &dir {
                resume_paths.extend(input_manager.collect_candidates(dir, &job).await?);
            }
            for path in &resume_paths {
                cli::validate_file_extension(path, &["pdf", "txt", "md", "markdown"]).map_err(|e| {
                    ResumeRankerError::InvalidInput(format!("Resume file {}: {}", path.display(), e))
                })?;
            }
            if resume_paths.is_empty() {
                return Err(ResumeRankerError::EmptyInput);
            }

            let started = Instant::now();

            let job_text = input_manager.extract_text(&job).await?;
            let mut candidates = Vec::with_capacity(resume_paths.len());
            for path in &resume_paths {
                let text = input_manager.extract_text(path).await?;
                if text.trim().is_empty() {
                    warn!("No text extracted from {}", path.display());
                }
                candidates.push((display_id(path), text));
            }

            let engine = RankingEngine::new(&config)?;
            let run = engine.rank(&job_text, &candidates)?;

            let elapsed_ms = started.elapsed().as_millis() as u64;
            let report = RankingReport::new(run, job.to_string_lossy(), elapsed_ms, detailed);
            info!("Ranked {} resumes in {}ms", report.metadata.candidate_count, elapsed_ms);

            // Files never get ANSI escape codes
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, config.output.pretty_json, true);
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(mut path) => {
                    if path.is_dir() {
                        path.push(suggest_filename(&output_format, &job.to_string_lossy(), true));
                    }
                    save_report_to_file(&content, &path)?;
                    info!("Report saved to {}", path.display());
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Config { action } => {
            let target = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("# {}", target.display());
                    println!("{}", content);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", target.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&target)?;
                    println!("Configuration reset to defaults at {}", target.display());
                }
                Some(ConfigAction::Set { key, value }) => {
                    let mut config = config;
                    config.set(&key, &value)?;
                    config.save_to(&target)?;
                    println!("Set {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

/// Identifier shown for a resume: its file name.
fn display_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
