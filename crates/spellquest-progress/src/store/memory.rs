use std::collections::BTreeMap;

use crate::{
    ChildProfile, ChildProgress, ResultStore, StoreError, TestResult, WordList, WordListProvider,
};

/// An in-process store and word-list provider.
///
/// Writes can be switched off with [`set_available`](Self::set_available)
/// to exercise the offline path of a [`ResultRecorder`](crate::ResultRecorder),
/// and profile saves alone with
/// [`set_save_available`](Self::set_save_available).
#[derive(Debug, Clone)]
pub struct MemoryStore {
    word_lists: Vec<WordList>,
    results: Vec<TestResult>,
    children: BTreeMap<String, ChildProfile>,
    available: bool,
    save_available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            word_lists: Vec::new(),
            results: Vec::new(),
            children: BTreeMap::new(),
            available: true,
            save_available: true,
        }
    }
}

impl MemoryStore {
    /// Creates a store offering the given lists, oldest first.
    #[must_use]
    pub fn with_word_lists(word_lists: Vec<WordList>) -> Self {
        Self {
            word_lists,
            ..Self::default()
        }
    }

    /// Adds a word list after the existing ones.
    pub fn add_word_list(&mut self, list: WordList) {
        self.word_lists.push(list);
    }

    /// Inserts or replaces a child profile.
    pub fn insert_child(&mut self, profile: ChildProfile) {
        self.children.insert(profile.id.clone(), profile);
    }

    /// Makes every later write succeed (`true`) or fail with
    /// [`StoreError::Unavailable`] (`false`).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Makes later [`save_progress`](ResultStore::save_progress) calls fail
    /// with [`StoreError::Unavailable`] while appends keep working.
    pub fn set_save_available(&mut self, available: bool) {
        self.save_available = available;
    }

    /// Returns the stored result records in insertion order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl WordListProvider for MemoryStore {
    fn word_lists(&self) -> Result<Vec<WordList>, StoreError> {
        Ok(self.word_lists.clone())
    }
}

impl ResultStore for MemoryStore {
    fn append_result(&mut self, result: &TestResult) -> Result<String, StoreError> {
        self.ensure_available()?;
        let id = format!("result-{}", self.results.len() + 1);
        let mut result = result.clone();
        result.id = Some(id.clone());
        self.results.push(result);
        Ok(id)
    }

    fn load_child(&self, child_id: &str) -> Result<Option<ChildProfile>, StoreError> {
        Ok(self.children.get(child_id).cloned())
    }

    fn save_progress(
        &mut self,
        child_id: &str,
        progress: &ChildProgress,
        history: &[TestResult],
    ) -> Result<(), StoreError> {
        self.ensure_available()?;
        if !self.save_available {
            return Err(StoreError::Unavailable);
        }
        let profile = self
            .children
            .entry(child_id.to_owned())
            .or_insert_with(|| ChildProfile::new(child_id));
        profile.progress = *progress;
        profile.test_history = history.to_vec();
        Ok(())
    }

    fn delete_results(&mut self, child_id: &str) -> Result<usize, StoreError> {
        self.ensure_available()?;
        let before = self.results.len();
        self.results.retain(|result| result.child_id != child_id);
        Ok(before - self.results.len())
    }
}
