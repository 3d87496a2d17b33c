//! Input manager for handling different file types

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Raw document content received from outside the file system, e.g. an upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    scratch_dir: Option<PathBuf>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            scratch_dir: None,
        }
    }

    /// Directory for temporary copies of uploaded content (system temp dir by default)
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cache.get(path) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ResumeRankerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = self.detect_file_type(path)?;
        let text = Self::extract_as(file_type, path).await?;

        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    /// Extract text from uploaded bytes via a temporary file.
    ///
    /// The temporary file is removed when this returns, whether extraction
    /// succeeded or not.
    pub async fn extract_uploaded(&self, upload: &UploadedFile) -> Result<String> {
        let file_type = self.detect_file_type(Path::new(&upload.name))?;
        if !file_type.is_supported() {
            return Err(ResumeRankerError::UnsupportedFormat(
                format!("Unsupported file type for upload: {}", upload.name)
            ));
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-ranker-").suffix(file_type.suffix());
        let mut tmp = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        tmp.write_all(&upload.bytes)?;
        tmp.flush()?;
        debug!("Staged upload '{}' at {}", upload.name, tmp.path().display());

        Self::extract_as(file_type, tmp.path()).await
    }

    /// List every supported document in a directory, sorted by file name.
    pub async fn collect_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ResumeRankerError::InvalidInput(
                format!("Not a directory: {}", dir.display())
            ));
        }

        let mut entries = fs::read_dir(dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && FileType::from_path(&path).is_supported() {
                paths.push(path);
            }
        }
        paths.sort();

        info!("Found {} documents in {}", paths.len(), dir.display());
        Ok(paths)
    }

    /// Like [`collect_directory`](Self::collect_directory), but leaves out the
    /// reference document when it lives in the same directory.
    pub async fn collect_candidates(&self, dir: &Path, reference: &Path) -> Result<Vec<PathBuf>> {
        let reference = fs::canonicalize(reference).await.ok();
        let mut candidates = Vec::new();

        for path in self.collect_directory(dir).await? {
            if reference.is_some() && fs::canonicalize(&path).await.ok() == reference {
                warn!("Skipping {}: it is the job description", path.display());
                continue;
            }
            candidates.push(path);
        }

        Ok(candidates)
    }

    async fn extract_as(file_type: FileType, path: &Path) -> Result<String> {
        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            },
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            },
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            },
            FileType::Unknown => Err(ResumeRankerError::UnsupportedFormat(
                format!("Unsupported file type for: {}", path.display())
            )),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeRankerError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
