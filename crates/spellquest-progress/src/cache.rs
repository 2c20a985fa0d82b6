//! Local mirror of child profiles.
//!
//! The cache is what the front end reads between sessions. It is updated
//! after every recorded session even when the store is unreachable, and it
//! holds the queue of results still waiting to be persisted.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{CacheError, ChildProfile, TestResult};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
struct CacheDocument {
    profiles: BTreeMap<String, ChildProfile>,
    pending: Vec<TestResult>,
}

/// Key/value JSON mirror of child profiles plus a pending-result queue.
///
/// A cache opened with [`open`](Self::open) is written back to its file by
/// [`save`](Self::save); an [`in_memory`](Self::in_memory) cache never
/// touches the file system.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    path: Option<PathBuf>,
    document: CacheDocument,
}

impl ProfileCache {
    /// Creates an empty cache that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            document: CacheDocument::default(),
        }
    }

    /// Loads the cache file at `path`; a missing file yields an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| CacheError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => CacheDocument::default(),
            Err(source) => return Err(CacheError::Io { path, source }),
        };
        Ok(Self {
            path: Some(path),
            document,
        })
    }

    /// Returns the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the cached profile of a child.
    #[must_use]
    pub fn profile(&self, child_id: &str) -> Option<&ChildProfile> {
        self.document.profiles.get(child_id)
    }

    /// Inserts or replaces a profile.
    pub fn put_profile(&mut self, profile: ChildProfile) {
        self.document.profiles.insert(profile.id.clone(), profile);
    }

    /// Returns the results waiting to be persisted, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[TestResult] {
        &self.document.pending
    }

    /// Appends a result to the pending queue.
    pub fn queue_pending(&mut self, result: TestResult) {
        self.document.pending.push(result);
    }

    /// Removes and returns the whole pending queue.
    pub fn take_pending(&mut self) -> Vec<TestResult> {
        std::mem::take(&mut self.document.pending)
    }

    /// Writes the cache to its file; does nothing for an in-memory cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json =
            serde_json::to_string_pretty(&self.document).map_err(|source| CacheError::Json {
                path: path.clone(),
                source,
            })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_owned(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use spellquest_game::SpellingSummary;

    use super::*;
    use crate::WordList;

    fn pending_result() -> TestResult {
        let list = WordList::new("w1", "Tricky", ["said"]);
        let summary = SpellingSummary {
            score: 1,
            total: 1,
            percentage: 100,
            time_taken: Duration::from_secs(3),
            words_correct: vec!["said".to_owned()],
            words_incorrect: Vec::new(),
        };
        TestResult::spelling("c1", &list, &summary, Utc::now())
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProfileCache::open(dir.path().join("cache.json")).unwrap();
        assert!(cache.profile("c1").is_none());
        assert!(cache.pending().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let mut cache = ProfileCache::open(&path).unwrap();
        let mut profile = ChildProfile::new("c1");
        profile.apply(pending_result());
        cache.put_profile(profile.clone());
        cache.queue_pending(pending_result());
        cache.save().unwrap();

        let mut reopened = ProfileCache::open(&path).unwrap();
        assert_eq!(reopened.profile("c1"), Some(&profile));
        assert_eq!(reopened.pending().len(), 1);

        let taken = reopened.take_pending();
        assert_eq!(taken.len(), 1);
        assert!(reopened.pending().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ProfileCache::open(&path),
            Err(CacheError::Json { .. })
        ));
    }

    #[test]
    fn test_in_memory_save_is_a_no_op() {
        let mut cache = ProfileCache::in_memory();
        cache.put_profile(ChildProfile::new("c1"));
        cache.save().unwrap();
        assert!(cache.path().is_none());
        assert!(cache.profile("c1").is_some());
    }
}
