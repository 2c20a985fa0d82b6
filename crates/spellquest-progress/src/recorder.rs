//! Hand-off from a finished session to persistence.

use crate::{
    CacheError, ChildProfile, ProfileCache, RecordError, ResultStore, StoreError, TestResult,
};

/// What happened to a recorded result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The child's profile after the result was applied.
    pub profile: ChildProfile,
    /// Identifier assigned by the store, if the record was stored.
    pub result_id: Option<String>,
    /// Whether both the record and the updated progress reached the store.
    pub persisted: bool,
}

/// Result of [`ResultRecorder::retry_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryReport {
    /// Pending results that reached the store.
    pub resubmitted: usize,
    /// Pending results still queued.
    pub remaining: usize,
    /// Pending results the store can never accept, removed from the queue.
    pub dropped: usize,
}

/// Result of [`ResultRecorder::clear_history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    /// Result records deleted from the store.
    pub deleted: usize,
    /// Pending results of the child removed from the queue.
    pub discarded_pending: usize,
}

/// Records finished sessions into a [`ResultStore`] and a [`ProfileCache`].
///
/// Persistence never rolls back a session: when the store fails, the
/// failure is logged, the result is queued in the cache, and the updated
/// profile is still returned and cached.
#[derive(Debug)]
pub struct ResultRecorder<S> {
    store: S,
    cache: ProfileCache,
}

impl<S> ResultRecorder<S>
where
    S: ResultStore,
{
    /// Creates a recorder.
    pub fn new(store: S, cache: ProfileCache) -> Self {
        Self { store, cache }
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the cache.
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// Splits the recorder into its parts.
    pub fn into_parts(self) -> (S, ProfileCache) {
        (self.store, self.cache)
    }

    /// Returns the best known profile of a child.
    ///
    /// The store is read first. The cached profile is used instead while
    /// the child has pending results, since only the cache holds them, and
    /// also when the store does not know the child or cannot be read. An
    /// unknown child gets a fresh profile.
    pub fn profile(&self, child_id: &str) -> ChildProfile {
        let cache_is_ahead = self
            .cache
            .pending()
            .iter()
            .any(|result| result.child_id == child_id);
        self.load_profile(child_id, cache_is_ahead)
    }

    fn load_profile(&self, child_id: &str, prefer_cache: bool) -> ChildProfile {
        let cached = self.cache.profile(child_id);
        if let Some(profile) = cached.filter(|_| prefer_cache) {
            return profile.clone();
        }
        let stored = match self.store.load_child(child_id) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("failed to load profile of {child_id}: {e}");
                None
            }
        };
        stored
            .or_else(|| cached.cloned())
            .unwrap_or_else(|| ChildProfile::new(child_id))
    }

    /// Stores a result and applies it to the child's profile.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Store`] if the store can never accept results
    /// of this child, and [`RecordError::Cache`] if the local cache cannot
    /// be written. Other store failures are reported through
    /// [`RecordOutcome::persisted`].
    pub fn record(&mut self, mut result: TestResult) -> Result<RecordOutcome, RecordError> {
        self.store.check_child_id(&result.child_id)?;
        let mut profile = self.profile(&result.child_id);

        let result_id = match self.store.append_result(&result) {
            Ok(id) => Some(id),
            Err(e) if e.is_permanent() => return Err(e.into()),
            Err(e) => {
                log::warn!("failed to store result for {}: {e}", result.child_id);
                None
            }
        };
        result.id.clone_from(&result_id);
        profile.apply(result.clone());

        let persisted = match &result_id {
            Some(_) => match self.save_profile(&profile) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("failed to save progress of {}: {e}", profile.id);
                    false
                }
            },
            None => false,
        };
        if !persisted {
            self.cache.queue_pending(result);
        }

        self.cache.put_profile(profile.clone());
        self.cache.save()?;

        Ok(RecordOutcome {
            profile,
            result_id,
            persisted,
        })
    }

    /// Re-submits every pending result, oldest first.
    ///
    /// A result without an id is appended again and the id is copied into
    /// the cached history; then the cached profile is saved. Results that
    /// fail again stay queued in order. Results the store rejects for good
    /// are dropped from the queue; they stay in the cached history.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local cache cannot be written.
    pub fn retry_pending(&mut self) -> Result<RetryReport, CacheError> {
        let pending = self.cache.take_pending();
        let mut report = RetryReport::default();

        for mut result in pending {
            match self.resubmit(&mut result) {
                Ok(()) => report.resubmitted += 1,
                Err(e) if e.is_permanent() => {
                    log::warn!("dropping pending result for {}: {e}", result.child_id);
                    report.dropped += 1;
                }
                Err(e) => {
                    log::warn!("retry failed for {}: {e}", result.child_id);
                    self.cache.queue_pending(result);
                    report.remaining += 1;
                }
            }
        }

        self.cache.save()?;
        log::info!(
            "retried pending results: {} stored, {} remaining, {} dropped",
            report.resubmitted,
            report.remaining,
            report.dropped
        );
        Ok(report)
    }

    /// Deletes a child's results and resets the history and counters.
    ///
    /// The store is updated first; the cache follows only once the store
    /// has accepted the change. Pending results of the child are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Store`] if the store cannot be updated (the
    /// cache is then left untouched) and [`RecordError::Cache`] if the
    /// cache cannot be written.
    pub fn clear_history(&mut self, child_id: &str) -> Result<ClearReport, RecordError> {
        self.store.check_child_id(child_id)?;
        let mut profile = self.profile(child_id);
        profile.clear_history();

        let deleted = self.store.delete_results(child_id)?;
        self.save_profile(&profile)?;

        let mut discarded_pending = 0;
        for result in self.cache.take_pending() {
            if result.child_id == child_id {
                discarded_pending += 1;
            } else {
                self.cache.queue_pending(result);
            }
        }
        self.cache.put_profile(profile);
        self.cache.save()?;

        log::info!("cleared history of {child_id}: {deleted} result(s) deleted");
        Ok(ClearReport {
            deleted,
            discarded_pending,
        })
    }

    fn resubmit(&mut self, result: &mut TestResult) -> Result<(), StoreError> {
        self.store.check_child_id(&result.child_id)?;
        let mut profile = self.load_profile(&result.child_id, true);

        if result.id.is_none() {
            let id = self.store.append_result(result)?;
            if let Some(entry) = profile.test_history.iter_mut().find(|r| *r == result) {
                entry.id = Some(id.clone());
            }
            result.id = Some(id);
            // Keep the id even if saving the profile fails below.
            self.cache.put_profile(profile.clone());
        }

        self.save_profile(&profile)
    }

    fn save_profile(&mut self, profile: &ChildProfile) -> Result<(), StoreError> {
        self.store
            .save_progress(&profile.id, &profile.progress, &profile.test_history)
    }
}
