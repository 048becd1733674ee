//! Product image storage.
//!
//! Images arrive as base64 payloads on the admin API, land on the local
//! filesystem under the configured media root, and are served back by
//! the static file route at `/media`.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted upload size (5 MiB decoded).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur while storing media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Content type is not an accepted image format.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// Decoded payload exceeds the size limit.
    #[error("image too large ({0} bytes)")]
    TooLarge(usize),

    /// Filesystem failure.
    #[error("media I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for uploaded product images.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    /// Create a store rooted at `root`, minting URLs under `base_url`.
    #[must_use]
    pub fn new(root: PathBuf, base_url: &str) -> Self {
        Self {
            root,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The directory served at `/media`.
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Store a product image and return its public URL.
    ///
    /// The key is a fresh UUID, so uploads never collide and old URLs
    /// stay valid when a product's image is replaced.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedType` for non-image content types,
    /// `MediaError::TooLarge` past the size limit, or `MediaError::Io`
    /// if the write fails.
    pub async fn put_product_image(
        &self,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        let ext = extension_for(content_type)
            .ok_or_else(|| MediaError::UnsupportedType(content_type.to_owned()))?;

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge(bytes.len()));
        }

        let key = format!("products/{}.{ext}", Uuid::new_v4());

        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("{}/media/{key}", self.base_url))
    }
}

/// Map an accepted image content type to its file extension.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_image_types_map_to_extensions() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("application/pdf"), None);
    }

    #[tokio::test]
    async fn put_writes_file_and_mints_url() {
        let dir = std::env::temp_dir().join(format!("lamore-media-{}", Uuid::new_v4()));
        let store = MediaStore::new(dir.clone(), "http://localhost:3000/");

        let url = store
            .put_product_image("image/png", b"not a real png")
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:3000/media/products/"));
        assert!(url.ends_with(".png"));

        let key = url
            .strip_prefix("http://localhost:3000/media/")
            .unwrap();
        let on_disk = tokio::fs::read(dir.join(key)).await.unwrap();
        assert_eq!(on_disk, b"not a real png");

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test]
    async fn oversized_upload_rejected() {
        let store = MediaStore::new(std::env::temp_dir(), "http://localhost:3000");
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];

        assert!(matches!(
            store.put_product_image("image/png", &bytes).await,
            Err(MediaError::TooLarge(_))
        ));
    }
}
