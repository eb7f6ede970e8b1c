//! File storage for book files and id-card scans
//!
//! Files land in a flat directory with a uuid-prefixed name and are served
//! statically; this service only produces the public URL.

use std::path::Path;

use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf", "doc", "docx"];

/// Whether a file name carries an accepted extension
pub fn allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Strip any path components a client may have smuggled into the name
fn sanitize_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file")
        .to_string()
}

#[derive(Clone)]
pub struct StorageService {
    config: StorageConfig,
}

impl StorageService {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Store an uploaded file and return its public URL
    pub async fn store(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        if !allowed_extension(file_name) {
            return Err(AppError::Validation("File type not allowed".to_string()));
        }

        tokio::fs::create_dir_all(&self.config.upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = Path::new(&self.config.upload_dir).join(&stored_name);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {}", e)))?;

        tracing::debug!(file = %stored_name, size = data.len(), "file stored");

        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            stored_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_documents_and_images() {
        for name in ["book.pdf", "scan.JPG", "card.jpeg", "notes.docx", "cover.png", "old.doc"] {
            assert!(allowed_extension(name), "{} should be accepted", name);
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["run.exe", "script.sh", "archive.zip", "noext", ".hidden"] {
            assert!(!allowed_extension(name), "{} should be rejected", name);
        }
    }

    #[test]
    fn sanitizes_path_traversal() {
        assert_eq!(sanitize_file_name("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitize_file_name("plain.pdf"), "plain.pdf");
    }
}
