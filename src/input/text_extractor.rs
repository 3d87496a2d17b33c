//! Text extraction from various file formats

use crate::error::{Result, ResumeRankerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeRankerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            ResumeRankerError::InvalidInput(format!("'{}' is not valid UTF-8: {}", path.display(), e))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Keep the text of a markdown document, one block per line.
///
/// Raw HTML blocks and inline tags are dropped along with the markup.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::BlockQuote
                | Tag::TableRow
                | Tag::TableHead,
            ) => text.push('\n'),
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_keeps_block_text() {
        let text = markdown_to_text("# Jane Roe\n\n**Rust** & Go\n\n- Kafka\n- `gRPC`\n");

        assert_eq!(text, "Jane Roe\nRust & Go\nKafka\ngRPC");
    }

    #[test]
    fn test_markdown_to_text_joins_soft_breaks_and_drops_html() {
        let text = markdown_to_text("Built *data*\npipelines\n\n<div>hidden</div>\n\n---\n\n> Led a team\n");

        assert_eq!(text, "Built data pipelines\nLed a team");
    }

    #[tokio::test]
    async fn test_plain_text_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &[0xff, 0xfe, 0x00]).unwrap();

        let result = PlainTextExtractor.extract(file.path()).await;
        assert!(matches!(result, Err(ResumeRankerError::InvalidInput(_))));
    }
}
