//! Memoization of bridge responses keyed by config file path.
//!
//! Entries are invalidated by comparing the timestamp stored at compute time
//! against the file's current modification time. Concurrent computations for
//! the same key are not de-duplicated; recompute is idempotent and cheap
//! relative to correct staleness detection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::errors::Result;

struct CacheEntry {
    stored_at: SystemTime,
    value: serde_json::Value,
}

/// Process-wide cache for resolved Tailwind configuration data.
///
/// Owned by the bridge and passed explicitly; parallel lint workers in other
/// processes each hold their own instance.
#[derive(Default)]
pub struct ConfigCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key` if it is still fresh, otherwise run
    /// `compute`, store the result with the current timestamp, and return it.
    pub fn with_cache<F>(&self, key: &Path, compute: F) -> Result<serde_json::Value>
    where
        F: FnOnce() -> Result<serde_json::Value>,
    {
        let modified = std::fs::metadata(key).and_then(|m| m.modified()).ok();

        if let Some(modified) = modified {
            let entries = self.entries.lock().unwrap();
            if let Some(entry) = entries.get(key) {
                if entry.stored_at > modified {
                    return Ok(entry.value.clone());
                }
            }
        }

        let value = compute()?;
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_path_buf(),
            CacheEntry {
                stored_at: SystemTime::now(),
                value: value.clone(),
            },
        );
        Ok(value)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_caches_second_call() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "module.exports = {{}}").unwrap();

        let cache = ConfigCache::new();
        let mut calls = 0;
        for _ in 0..2 {
            let value = cache
                .with_cache(file.path(), || {
                    calls += 1;
                    Ok(serde_json::json!({"n": 1}))
                })
                .unwrap();
            assert_eq!(value["n"], 1);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_recomputes_after_modification() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a").unwrap();

        let cache = ConfigCache::new();
        cache
            .with_cache(file.path(), || Ok(serde_json::json!(1)))
            .unwrap();

        // Push the mtime past the stored timestamp
        let future = SystemTime::now() + std::time::Duration::from_secs(5);
        file.as_file().set_modified(future).unwrap();

        let mut recomputed = false;
        let value = cache
            .with_cache(file.path(), || {
                recomputed = true;
                Ok(serde_json::json!(2))
            })
            .unwrap();
        assert!(recomputed);
        assert_eq!(value, serde_json::json!(2));
    }

    #[test]
    fn test_missing_file_always_computes() {
        let cache = ConfigCache::new();
        let key = Path::new("/nonexistent/tailwind.config.js");
        let mut calls = 0;
        for _ in 0..2 {
            cache
                .with_cache(key, || {
                    calls += 1;
                    Ok(serde_json::json!(null))
                })
                .unwrap();
        }
        assert_eq!(calls, 2);
    }
}
