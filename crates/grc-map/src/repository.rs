//! Persisted mapping store, keyed by column-set signature.
//!
//! A confirmed mapping is remembered so that the next upload with the same
//! column set (in any order) skips manual mapping. The store is a convenience
//! cache, never a correctness dependency: every failure to read or write is
//! swallowed and treated as a miss or no-op.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use grc_model::FieldMapping;

/// Order-independent signature of a header set.
///
/// Headers are trimmed, sorted and joined on a non-printing separator before
/// hashing, so any permutation of the same columns yields the same key. The
/// digest is truncated to 16 bytes; plenty for a per-user cache namespace.
#[must_use]
pub fn mapping_signature(headers: &[String]) -> String {
    let mut sorted: Vec<&str> = headers.iter().map(|header| header.trim()).collect();
    sorted.sort_unstable();
    let joined = sorted.join("\u{1f}");
    let digest = Sha256::digest(joined.as_bytes());
    hex::encode(&digest[..16])
}

/// Host-provided key/value storage for remembered mappings.
///
/// Injected into the workflow rather than reached for as ambient state, so
/// tests substitute [`InMemoryCache`].
pub trait MappingCache {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Envelope persisted per signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMapping {
    pub mapping: FieldMapping,
    /// When this mapping was confirmed (ISO 8601).
    pub saved_at: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMapping {
    #[must_use]
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            saved_at: Some(timestamp()),
            version: default_version(),
        }
    }
}

/// Current timestamp in ISO 8601 format, without pulling in a date crate.
fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_timestamp(secs)
}

fn format_timestamp(secs: u64) -> String {
    let (year, month, day) = civil_from_days(secs / 86400);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Gregorian civil date from days since the Unix epoch.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = era * 400 + yoe + u64::from(month <= 2);
    (year, month, day)
}

/// Save/load front for remembered mappings over any [`MappingCache`].
#[derive(Debug)]
pub struct MappingStore<C: MappingCache> {
    cache: C,
}

impl<C: MappingCache> MappingStore<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    /// Remembers a mapping for this header set. Failures are logged and
    /// dropped; the workflow carries on without the cache.
    pub fn save(&self, headers: &[String], mapping: &FieldMapping) {
        let key = mapping_signature(headers);
        let stored = StoredMapping::new(mapping.clone());
        let value = match serde_json::to_string(&stored) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "could not serialize mapping for cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(&key, &value) {
            warn!(error = %err, key = %key, "mapping cache write failed");
        }
    }

    /// Looks up a remembered mapping for this header set. Any read or parse
    /// failure is a miss.
    #[must_use]
    pub fn load(&self, headers: &[String]) -> Option<FieldMapping> {
        let key = mapping_signature(headers);
        let value = match self.cache.get(&key) {
            Ok(value) => value?,
            Err(err) => {
                warn!(error = %err, key = %key, "mapping cache read failed");
                return None;
            }
        };
        match serde_json::from_str::<StoredMapping>(&value) {
            Ok(stored) => Some(stored.mapping),
            Err(err) => {
                warn!(error = %err, key = %key, "discarding unreadable cached mapping");
                None
            }
        }
    }
}

/// In-memory cache for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("cache mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("cache mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed cache: one JSON value per signature under a base directory.
/// Last write wins; writes are infrequent, user-triggered events.
#[derive(Debug, Clone)]
pub struct FileCache {
    base_dir: PathBuf,
}

impl FileCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("create mapping cache dir: {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl MappingCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("read cached mapping: {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("write cached mapping: {}", path.display()))?;
        Ok(())
    }
}
