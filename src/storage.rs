//! Product image uploads to a hosted object store.
//!
//! Talks to the Supabase Storage REST interface for a single bucket. Uploaded
//! objects are addressed by path; products store that path and the public URL
//! is derived on demand.

use std::path::Path;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use crate::config;
use crate::error::{CardHavenError, Result};
use crate::models::Product;

/// Uploads and addresses objects in one storage bucket.
#[derive(Clone)]
pub struct StorageClient {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    pub bucket: String,
    key: String,
    client: Client,
}

impl StorageClient {
    pub fn new(client: Client, base_url: &str, key: &str, bucket: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
            client,
        }
    }

    fn object_url(&self, path: &str) -> String {
        config::join_url(
            &self.base_url,
            &format!("storage/v1/object/{}/{}", self.bucket, path),
        )
    }

    /// Public URL of an object in the bucket.
    pub fn public_url(&self, path: &str) -> String {
        config::join_url(
            &self.base_url,
            &format!(
                "storage/v1/object/public/{}/{}",
                self.bucket,
                path.trim_start_matches('/')
            ),
        )
    }

    /// Store `bytes` at `path`. Fails if the object already exists.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = self.object_url(path);
        log::debug!("uploading {} bytes to {}", bytes.len(), url);

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.key))
            .header("apikey", &self.key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(CardHavenError::from_transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);
        log::error!("upload to {} failed with {}: {}", path, status.as_u16(), message);
        Err(CardHavenError::Storage(format!(
            "{} ({})",
            message,
            status.as_u16()
        )))
    }

    /// Upload an image under a timestamped name and return its bucket path.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                CardHavenError::InvalidArgument(format!("invalid file name: {file_name:?}"))
            })?;
        let path = format!("{}_{}", chrono::Utc::now().timestamp_millis(), name);
        self.upload(&path, bytes, content_type_for(name)).await?;
        log::info!("uploaded image {}", path);
        Ok(path)
    }

    /// Read a local file and upload it with [`upload_image`](Self::upload_image).
    pub async fn upload_file(&self, file: &Path) -> Result<String> {
        let bytes = tokio::fs::read(file).await?;
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                CardHavenError::InvalidArgument(format!("invalid file path: {}", file.display()))
            })?;
        self.upload_image(name, bytes).await
    }

    /// Absolute URL for a product's image. Absolute URLs pass through; bucket
    /// paths are resolved against the public endpoint.
    pub fn resolve_image(&self, product: &Product) -> Option<String> {
        let raw = product.image_url.as_deref()?.trim();
        if raw.is_empty() {
            None
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw.to_string())
        } else {
            Some(self.public_url(raw))
        }
    }
}

/// MIME type from a file extension; unknown types upload as raw bytes.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}
