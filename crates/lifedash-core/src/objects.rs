//! Binary object storage for item images.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::CoreError;

/// Default bucket holding item images.
pub const DEFAULT_BUCKET: &str = "dashboard-images";

const FALLBACK_EXTENSION: &str = "bin";
const SUFFIX_LEN: usize = 8;

/// Keyed blob storage that hands back a public URL per object.
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, CoreError>;
    fn delete(&self, key: &str) -> Result<(), CoreError>;
}

/// An image payload as received from the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Result of the second, best-effort phase of an image lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCleanup {
    Released,
    /// The record change went through but the object could not be removed.
    Orphaned { key: String, reason: String },
}

impl ImageCleanup {
    pub fn is_orphaned(&self) -> bool {
        matches!(self, ImageCleanup::Orphaned { .. })
    }
}

/// Generates `<millis>-<suffix>.<ext>` keys for freshly uploaded objects.
pub fn generate_object_key(now: DateTime<Utc>, original_name: &str) -> String {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{}-{}.{}", now.timestamp_millis(), suffix, extension)
}

/// Recovers the object key from a public URL of the form `.../<bucket>/<key>`.
pub fn object_key_from_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("{bucket}/");
    let (_, key) = url.rsplit_once(&marker)?;
    let key = key.split(['?', '#']).next().unwrap_or_default();
    (!key.is_empty()).then(|| key.to_string())
}

/// Public URL for an object under a base URL.
pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), bucket, key)
}

/// Removes the object behind `url`, reporting rather than propagating failures.
pub fn release_image<O: ObjectStore + ?Sized>(objects: &O, url: &str) -> ImageCleanup {
    let Some(key) = object_key_from_url(url, objects.bucket()) else {
        warn!(url, "image url does not reference the bucket; leaving object in place");
        return ImageCleanup::Orphaned {
            key: url.to_string(),
            reason: "url does not reference the image bucket".into(),
        };
    };
    match objects.delete(&key) {
        Ok(()) => {
            info!(%key, "released image object");
            ImageCleanup::Released
        }
        Err(err) => {
            warn!(%key, error = %err, "image object orphaned");
            ImageCleanup::Orphaned {
                key,
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn generated_keys_keep_extension_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let key = generate_object_key(now, "Poster.JPG");
        assert!(key.starts_with(&format!("{}-", now.timestamp_millis())));
        assert!(key.ends_with(".jpg"));
        assert!(generate_object_key(now, "README").ends_with(".bin"));
    }

    #[test]
    fn keys_parse_back_out_of_public_urls() {
        let url = "https://cdn.example.com/storage/v1/object/public/dashboard-images/171-abc.png";
        assert_eq!(
            object_key_from_url(url, DEFAULT_BUCKET).as_deref(),
            Some("171-abc.png")
        );
        assert_eq!(object_key_from_url("https://elsewhere/x.png", DEFAULT_BUCKET), None);
        assert_eq!(
            object_key_from_url(&public_url("file:///tmp/", "b", "k.png"), "b").as_deref(),
            Some("k.png")
        );
    }
}
