//! Output formatters for ranked result tables

use crate::config::OutputFormat;
use crate::error::{Result, ResumeRankerError};
use crate::output::report::RankingReport;
use crate::processing::ranking::Interpretation;
use colored::{Color, Colorize};
use std::path::Path;

pub const CSV_HEADER: [&str; 3] = ["Resume", "Score", "Interpretation"];

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

/// Console table with colored interpretation labels
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// CSV export: `Resume,Score,Interpretation`
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

fn format_timestamp(report: &RankingReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn label_color(interpretation: Interpretation) -> Color {
        match interpretation {
            Interpretation::Excellent => Color::Green,
            Interpretation::Good => Color::BrightGreen,
            Interpretation::Average => Color::Yellow,
            Interpretation::Low => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING"));
        output.push_str(&format!(
            "Job: {} | Candidates: {} | Vocabulary: {} terms\n",
            display_name(&report.metadata.job_file),
            report.metadata.candidate_count,
            report.metadata.vocabulary_size
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        let name_width = report
            .results
            .iter()
            .map(|record| record.candidate.chars().count())
            .chain(std::iter::once(CSV_HEADER[0].len()))
            .max()
            .unwrap_or(0);

        output.push_str(&format!(
            "{:>4}  {:<width$}  {:>6}  {}\n",
            "#",
            CSV_HEADER[0],
            CSV_HEADER[1],
            CSV_HEADER[2],
            width = name_width
        ));
        output.push_str(&format!("{}\n", "-".repeat(name_width + 30)));

        for (rank, record) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}  {:<width$}  {:>6.3}  {}\n",
                rank + 1,
                record.candidate,
                record.score,
                self.colorize(record.interpretation.label(), Self::label_color(record.interpretation)),
                width = name_width
            ));
        }

        let counts = report.label_counts();
        output.push_str(&format!(
            "\nExcellent: {} | Good: {} | Average: {} | Low: {}\n",
            counts.excellent, counts.good, counts.average, counts.low
        ));

        if self.detailed && !report.document_stats.is_empty() {
            output.push_str(&self.format_header("Normalization"));
            for stats in &report.document_stats {
                output.push_str(&format!(
                    "  {}: {} words -> {} tokens\n",
                    stats.id, stats.word_count, stats.token_count
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Ranking Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                format_timestamp(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Job:** `{}` | **Candidates:** {} | **Vocabulary:** {} terms\n\n",
                display_name(&report.metadata.job_file),
                report.metadata.candidate_count,
                report.metadata.vocabulary_size
            ));
        }

        output.push_str("| Rank | Resume | Score | Interpretation |\n");
        output.push_str("|------|--------|-------|----------------|\n");
        for (rank, record) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.3} | {} |\n",
                rank + 1,
                Self::escape_cell(&record.candidate),
                record.score,
                record.interpretation
            ));
        }

        if !report.document_stats.is_empty() {
            output.push_str("\n## Normalization\n\n");
            output.push_str("| Document | Words | Tokens |\n");
            output.push_str("|----------|-------|--------|\n");
            for stats in &report.document_stats {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    Self::escape_cell(&stats.id),
                    stats.word_count,
                    stats.token_count
                ));
            }
        }

        output.push_str(&format!(
            "\n---\n*Generated by resume-ranker v{}*\n",
            report.metadata.ranker_version
        ));

        Ok(output)
    }
}

impl CsvFormatter {
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = CSV_HEADER.join(",");
        output.push('\n');

        for record in &report.results {
            output.push_str(&format!(
                "{},{:.3},{}\n",
                Self::escape_field(&record.candidate),
                record.score,
                record.interpretation
            ));
        }

        Ok(output)
    }
}

/// One row of an exported CSV table
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub resume: String,
    pub score: f64,
    pub interpretation: Interpretation,
}

/// Split CSV text into records of fields, honoring quoted fields.
fn split_csv_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ResumeRankerError::OutputFormatting(
            "Unterminated quoted field in CSV".to_string(),
        ));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Read a table previously written by [`CsvFormatter`].
pub fn parse_csv(content: &str) -> Result<Vec<CsvRow>> {
    let mut records = split_csv_records(content)?.into_iter();

    match records.next() {
        Some(header) if header.iter().map(String::as_str).eq(CSV_HEADER.iter().copied()) => {}
        Some(header) => {
            return Err(ResumeRankerError::OutputFormatting(format!(
                "Unexpected CSV header: {}",
                header.join(",")
            )))
        }
        None => {
            return Err(ResumeRankerError::OutputFormatting("CSV is empty".to_string()));
        }
    }

    records
        .filter(|fields| !(fields.len() == 1 && fields[0].is_empty()))
        .enumerate()
        .map(|(index, fields)| {
            let line = index + 2;
            if fields.len() != 3 {
                return Err(ResumeRankerError::OutputFormatting(format!(
                    "Row {} has {} fields, expected 3",
                    line,
                    fields.len()
                )));
            }

            let score = fields[1].trim().parse::<f64>().map_err(|e| {
                ResumeRankerError::OutputFormatting(format!("Row {}: invalid score '{}': {}", line, fields[1], e))
            })?;
            let interpretation = fields[2]
                .parse::<Interpretation>()
                .map_err(|e| ResumeRankerError::OutputFormatting(format!("Row {}: {}", line, e)))?;

            Ok(CsvRow {
                resume: fields[0].clone(),
                score,
                interpretation,
            })
        })
        .collect()
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Csv => "csv",
    };

    format!("{}_ranking{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::engine::RankingRun;
    use crate::processing::ranking::RankAggregator;

    fn report() -> RankingReport {
        let run = RankingRun {
            table: RankAggregator::default().aggregate(vec![
                ("plain.pdf".to_string(), 0.4),
                ("Doe, Jane.pdf".to_string(), 0.8531),
                ("say \"hi\".txt".to_string(), 0.1026),
            ]),
            vocabulary_size: 12,
            document_stats: Vec::new(),
        };
        RankingReport::new(run, "jobs/backend.txt", 3, false)
    }

    #[test]
    fn test_csv_export() {
        let csv = CsvFormatter.format_report(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Resume,Score,Interpretation");
        assert_eq!(lines[1], "\"Doe, Jane.pdf\",0.853,Excellent");
        assert_eq!(lines[2], "plain.pdf,0.400,Average");
        assert_eq!(lines[3], "\"say \"\"hi\"\".txt\",0.103,Low");
    }

    #[test]
    fn test_csv_round_trip() {
        let report = report();
        let csv = CsvFormatter.format_report(&report).unwrap();
        let rows = parse_csv(&csv).unwrap();

        assert_eq!(rows.len(), report.results.len());
        for (row, record) in rows.iter().zip(report.results.iter()) {
            assert_eq!(row.resume, record.candidate);
            assert_eq!(row.score, record.score);
            assert_eq!(row.interpretation, record.interpretation);
        }
    }

    #[test]
    fn test_parse_csv_quoted_newline_and_crlf() {
        let rows = parse_csv("Resume,Score,Interpretation\r\n\"two\nlines\",0.5,Good\r\n").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].resume, "two\nlines");
        assert_eq!(rows[0].interpretation, Interpretation::Good);
    }

    #[test]
    fn test_parse_csv_errors() {
        assert!(parse_csv("").is_err());
        assert!(parse_csv("Name,Score\n").is_err());
        assert!(parse_csv("Resume,Score,Interpretation\na,high,Good\n").is_err());
        assert!(parse_csv("Resume,Score,Interpretation\n\"open,0.5,Good\n").is_err());
        assert!(parse_csv("Resume,Score,Interpretation\na,0.5\n").is_err());
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, false).format_report(&report()).unwrap();

        assert!(output.contains("RESUME RANKING"));
        assert!(output.contains("Job: backend.txt"));
        assert!(output.contains("0.853"));
        assert!(output.contains("Excellent: 1 | Good: 0 | Average: 1 | Low: 1"));
        let first = output.find("Doe, Jane.pdf").unwrap();
        let second = output.find("plain.pdf").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(true).format_report(&report()).unwrap();

        assert!(output.contains("| 1 | Doe, Jane.pdf | 0.853 | Excellent |"));
        assert!(output.contains("**Job:** `backend.txt`"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"][0]["candidate"], "Doe, Jane.pdf");
        assert_eq!(value["results"][0]["interpretation"], "Excellent");
        assert_eq!(value["results"][0]["score"], 0.853);
        // Only the displayed score is serialized
        assert_eq!(value["results"][0].as_object().unwrap().len(), 3);
        assert_eq!(value["metadata"]["candidate_count"], 3);
    }

    #[test]
    fn test_generator_dispatch_and_filename() {
        let generator = ReportGenerator::with_options(false, false, true, true);
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Csv] {
            assert!(!generator.generate_report(&report(), &format).unwrap().is_empty());
        }

        assert_eq!(suggest_filename(&OutputFormat::Csv, "jobs/backend.txt", false), "backend_ranking.csv");
    }
}
