//! Result records, child progress, and persistence.
//!
//! Play sessions end with a summary; this crate turns that summary into a
//! [`TestResult`], folds it into the child's [`ChildProgress`], and hands it
//! to a [`ResultStore`]. Persistence is best-effort: when the store fails,
//! the local [`ProfileCache`] is still updated and the result waits in a
//! pending queue for [`ResultRecorder::retry_pending`].
//!
//! # Overview
//!
//! - [`model`]: serializable documents ([`WordList`], [`TestResult`],
//!   [`ChildProfile`])
//! - [`store`]: the [`WordListProvider`] and [`ResultStore`] seams, with the
//!   in-process [`MemoryStore`] and the file-backed [`DirectoryStore`]
//! - [`cache`]: the local profile mirror and pending queue
//! - [`recorder`]: the hand-off from a finished session to the store
//! - [`history`]: filtering and ordering past sessions for review
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use chrono::Utc;
//! use spellquest_game::SessionSummary;
//! use spellquest_progress::{
//!     MemoryStore, ProfileCache, ResultRecorder, TestResult, WordList,
//! };
//!
//! let list = WordList::new("list-1", "Animals", ["cat", "dog"]);
//! let summary = SessionSummary {
//!     score: 1,
//!     total: 2,
//!     percentage: 50,
//!     time_taken: Duration::from_secs(42),
//!     words_found: vec!["CAT".to_owned()],
//!     words_not_found: vec!["DOG".to_owned()],
//! };
//!
//! let mut recorder = ResultRecorder::new(MemoryStore::default(), ProfileCache::in_memory());
//! let result = TestResult::word_search("child-1", &list, &summary, Utc::now());
//! let outcome = recorder.record(result).unwrap();
//!
//! assert!(outcome.persisted);
//! assert_eq!(outcome.profile.progress.wordsearches_completed, 1);
//! assert_eq!(outcome.profile.test_history.len(), 1);
//! ```

pub mod cache;
pub mod history;
pub mod model;
pub mod recorder;
pub mod store;

mod error;

pub use self::{
    cache::ProfileCache,
    error::{CacheError, KindFilterParseError, RecordError, StoreError},
    history::{HistoryFilter, KindFilter},
    model::{
        ChildProfile, ChildProgress, Difficulty, ListWord, SpellingMistake, TestKind, TestResult,
        WordList,
    },
    recorder::{ClearReport, RecordOutcome, ResultRecorder, RetryReport},
    store::{DirectoryStore, MemoryStore, ResultStore, WordListProvider},
};
