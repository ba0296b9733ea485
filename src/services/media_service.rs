use crate::error::Result;
use bytes::Bytes;
use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;

/// Local blob storage for candidate recordings. Files land in the uploads
/// directory and are served back under `/uploads/{name}`.
#[derive(Clone)]
pub struct MediaService {
    uploads_dir: PathBuf,
}

impl MediaService {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub async fn store_recording(
        &self,
        candidate_id: Uuid,
        original_filename: &str,
        default_ext: &str,
        data: Bytes,
    ) -> Result<String> {
        let ext = sanitize_extension(original_filename).unwrap_or_else(|| default_ext.to_string());
        let timestamp = Utc::now().format("%Y%m%d%H%M%S");
        let name = format!("{}_{}.{}", candidate_id, timestamp, ext);

        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        tokio::fs::write(self.uploads_dir.join(&name), &data).await?;

        tracing::info!(%candidate_id, file = %name, bytes = data.len(), "stored recording");
        Ok(format!("/uploads/{}", name))
    }
}

/// Only the alphanumeric tail of the client-supplied extension survives.
fn sanitize_extension(filename: &str) -> Option<String> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())?
        .to_lowercase();
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}
