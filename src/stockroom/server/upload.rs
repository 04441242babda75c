use crate::error::{Result, StockError};
use crate::sanitize::sanitize_filename;
use axum::body::Bytes;
use chrono::Utc;
use std::path::Path;
use tracing::debug;

pub const IMAGE_TYPES: &[&str] = &["image/jpg", "image/jpeg", "image/png", "image/webp"];
pub const CSV_TYPES: &[&str] = &["text/csv", "application/vnd.ms-excel", "application/csv"];

/// One file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Reject the file unless its declared type is allowed and it fits the limit.
    pub fn validate(&self, allowed: &[&str], max_bytes: usize) -> Result<()> {
        if !allowed.contains(&self.content_type.as_str()) {
            return Err(StockError::Upload(format!(
                "Invalid file type {:?}. Allowed: {}",
                self.content_type,
                allowed.join(", ")
            )));
        }
        if self.bytes.len() > max_bytes {
            return Err(StockError::Upload(format!(
                "File too large: {} bytes (limit {max_bytes})",
                self.bytes.len()
            )));
        }
        Ok(())
    }

    /// Contents as UTF-8 text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.bytes.to_vec())
            .map_err(|_| StockError::Upload("File is not valid UTF-8 text".to_string()))
    }

    /// Write the file into `dir` under a timestamped name and return that name.
    pub async fn store(&self, dir: &Path) -> Result<String> {
        let name = stored_name(&self.original_name, Utc::now().timestamp_millis());
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join(&name), &self.bytes).await?;
        debug!(original = %self.original_name, stored = %name, bytes = self.bytes.len(), "upload stored");
        Ok(name)
    }
}

/// `<millis><.ext>`, keeping only the extension of the client's file name.
pub fn stored_name(original: &str, millis: i64) -> String {
    let safe = sanitize_filename(original);
    match Path::new(&safe).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{millis}.{ext}"),
        _ => millis.to_string(),
    }
}
