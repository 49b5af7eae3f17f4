//! Local text extraction for uploaded resume files.

use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::client::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum FileKind {
    Pdf,
    Text,
    Markdown,
    Unsupported(String),
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "pdf" => FileKind::Pdf,
            "txt" => FileKind::Text,
            "md" | "markdown" => FileKind::Markdown,
            other => FileKind::Unsupported(other.to_string()),
        }
    }
}

/// A resume file as selected by the user: its name and raw contents.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub contents: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub async fn read(path: &Path) -> Result<Self, ClientError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::Extraction {
                file: name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(name, contents))
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }

    fn failure(&self, reason: impl Into<String>) -> ClientError {
        ClientError::Extraction {
            file: self.name.clone(),
            reason: reason.into(),
        }
    }

    /// Pulls plain text out of the file. Blocking for PDFs.
    pub fn extract_text_blocking(&self) -> Result<String, ClientError> {
        let text = match self.kind() {
            FileKind::Pdf => {
                info!("Extracting text from PDF: {}", self.name);
                pdf_extract::extract_text_from_mem(&self.contents)
                    .map_err(|e| self.failure(e.to_string()))?
            }
            FileKind::Text | FileKind::Markdown => {
                info!("Reading plain text file: {}", self.name);
                String::from_utf8(self.contents.to_vec())
                    .map_err(|_| self.failure("file is not valid UTF-8 text"))?
            }
            FileKind::Unsupported(ext) if ext.is_empty() => {
                return Err(self.failure("file has no extension"));
            }
            FileKind::Unsupported(ext) => {
                return Err(self.failure(format!("unsupported file type '.{ext}'")));
            }
        };

        if text.trim().is_empty() {
            return Err(self.failure("no text found in file"));
        }
        Ok(text)
    }
}

/// Extracts text off the async runtime. A panicking extractor is reported as
/// an extraction failure.
pub async fn extract_text(file: ResumeFile) -> Result<String, ClientError> {
    let name = file.name.clone();
    tokio::task::spawn_blocking(move || file.extract_text_blocking())
        .await
        .map_err(|e| ClientError::Extraction {
            file: name,
            reason: format!("extractor crashed: {e}"),
        })?
}
