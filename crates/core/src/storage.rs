//! Public URL derivation for objects in the blob store.

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "product-images";

/// Where stored images are publicly served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Base URL of the blob store, e.g. `https://xyz.supabase.co`.
    pub base_url: Option<String>,
    pub bucket: String,
}

impl StorageConfig {
    pub fn new(base_url: Option<String>, bucket: impl Into<String>) -> Self {
        Self {
            base_url: base_url.filter(|u| !u.trim().is_empty()),
            bucket: bucket.into(),
        }
    }

    /// Resolve a storage reference to its public URL.
    ///
    /// Returns `None` when the reference is blank or no base URL is
    /// configured; callers must treat that as "image unavailable".
    pub fn public_url(&self, reference: &str) -> Option<String> {
        let base = self.base_url.as_deref()?.trim().trim_end_matches('/');
        let path = reference.trim().trim_start_matches('/');
        if base.is_empty() || path.is_empty() {
            return None;
        }
        let bucket = self.bucket.trim().trim_matches('/');
        let bucket = if bucket.is_empty() { DEFAULT_BUCKET } else { bucket };
        Some(format!("{base}/storage/v1/object/public/{bucket}/{path}"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_BUCKET)
    }
}
