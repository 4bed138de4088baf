//! Source document download and on-disk caching.
//!
//! The pipelines only ever see a complete text blob; this module is the
//! collaborator that produces one. Downloads go through blocking HTTPS
//! and land in a per-user cache directory, keyed by the URL's file
//! name. A fresh cached copy short-circuits the network entirely;
//! offline mode accepts any cached copy regardless of age.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};

use crate::error::{RegistryError, Result};

/// Published location of the IANA language subtag registry
pub const IANA_REGISTRY_URL: &str =
    "https://www.iana.org/assignments/language-subtag-registry/language-subtag-registry";

/// Published location of the SIL ISO 639-3 code table
pub const ISO_639_3_URL: &str =
    "https://iso639-3.sil.org/sites/iso639-3/files/downloads/iso-639-3.tab";

/// Default cache directory under the platform cache root
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("langreg"))
        .unwrap_or_else(|| PathBuf::from(".langreg-cache"))
}

/// Downloads source documents with an on-disk cache
#[derive(Debug, Clone)]
pub struct Fetcher {
    cache_dir: PathBuf,
    max_age: Duration,
    offline: bool,
}

impl Fetcher {
    pub fn new<P: Into<PathBuf>>(cache_dir: P, max_age_days: i64, offline: bool) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            max_age: Duration::days(max_age_days),
            offline,
        }
    }

    /// Fetch a document, preferring the cache.
    ///
    /// Order: fresh cache hit, then (offline) stale cache or a cache
    /// miss error, then (online) download and cache the body.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let path = self.cache_path(url);

        if let Some(text) = self.cached(&path, self.offline)? {
            tracing::debug!("using cached copy of {url} at {}", path.display());
            return Ok(text);
        }
        if self.offline {
            return Err(RegistryError::CacheMiss(path));
        }

        let text = download(url)?;
        self.store(&path, &text);
        Ok(text)
    }

    /// Cache file for a URL, keyed by its last path segment
    fn cache_path(&self, url: &str) -> PathBuf {
        let name: String = url
            .rsplit('/')
            .next()
            .unwrap_or("document")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(name)
    }

    /// Read the cached copy if present and acceptable. `any_age`
    /// disables the freshness check.
    fn cached(&self, path: &Path, any_age: bool) -> Result<Option<String>> {
        let Ok(metadata) = std::fs::metadata(path) else {
            return Ok(None);
        };
        if !any_age {
            let modified: DateTime<Utc> = metadata
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH)
                .into();
            if Utc::now() - modified > self.max_age {
                return Ok(None);
            }
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    /// Best-effort cache write; a failure only loses the cache benefit
    fn store(&self, path: &Path, text: &str) {
        let result = std::fs::create_dir_all(&self.cache_dir)
            .and_then(|_| std::fs::write(path, text));
        if let Err(error) = result {
            tracing::warn!("failed to cache document at {}: {error}", path.display());
        }
    }
}

/// Download one document body
fn download(url: &str) -> Result<String> {
    tracing::debug!("downloading {url}");
    let response = ureq::get(url)
        .set("User-Agent", concat!("langreg/", env!("CARGO_PKG_VERSION")))
        .call()
        .map_err(|source| RegistryError::Download {
            url: url.to_string(),
            source: Box::new(source),
        })?;
    Ok(response.into_string()?)
}
