//! Report rendering and export

pub mod formatter;
pub mod report;

pub use formatter::{parse_csv, CsvRow, OutputFormatter, ReportGenerator};
pub use report::{RankingReport, ReportMetadata};
