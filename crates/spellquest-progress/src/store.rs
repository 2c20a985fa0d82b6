//! Word-list sources and persistence sinks.

use crate::{ChildProfile, ChildProgress, StoreError, TestResult, WordList};

pub use self::{directory::DirectoryStore, memory::MemoryStore};

mod directory;
mod memory;

/// A source of parent-managed word lists.
pub trait WordListProvider {
    /// Returns all word lists, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists cannot be read.
    fn word_lists(&self) -> Result<Vec<WordList>, StoreError>;

    /// Picks the list a child should play next.
    ///
    /// This is the most recent list that is active and assigned to the
    /// child. `Ok(None)` means no list is assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists cannot be read.
    fn select_list_for_child(&self, child_id: &str) -> Result<Option<WordList>, StoreError> {
        let selected = self
            .word_lists()?
            .into_iter()
            .rev()
            .find(|list| list.is_active && list.is_assigned_to(child_id));
        if selected.is_none() {
            log::debug!("no active word list assigned to {child_id}");
        }
        Ok(selected)
    }
}

/// A persistence sink for results and child profiles.
pub trait ResultStore {
    /// Checks that `child_id` can be stored at all.
    ///
    /// The default accepts every id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidId`] if the store can never hold records
    /// for this child.
    fn check_child_id(&self, child_id: &str) -> Result<(), StoreError> {
        let _ = child_id;
        Ok(())
    }

    /// Stores a result record and returns its new identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn append_result(&mut self, result: &TestResult) -> Result<String, StoreError>;

    /// Loads a child profile, or `Ok(None)` if the child is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read.
    fn load_child(&self, child_id: &str) -> Result<Option<ChildProfile>, StoreError>;

    /// Replaces a child's progress totals and history.
    ///
    /// Unknown children are created with a default profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    fn save_progress(
        &mut self,
        child_id: &str,
        progress: &ChildProgress,
        history: &[TestResult],
    ) -> Result<(), StoreError>;

    /// Deletes every stored result of a child and returns how many were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be listed or removed.
    fn delete_results(&mut self, child_id: &str) -> Result<usize, StoreError>;
}

impl<S> ResultStore for &mut S
where
    S: ResultStore + ?Sized,
{
    fn check_child_id(&self, child_id: &str) -> Result<(), StoreError> {
        (**self).check_child_id(child_id)
    }

    fn append_result(&mut self, result: &TestResult) -> Result<String, StoreError> {
        (**self).append_result(result)
    }

    fn load_child(&self, child_id: &str) -> Result<Option<ChildProfile>, StoreError> {
        (**self).load_child(child_id)
    }

    fn save_progress(
        &mut self,
        child_id: &str,
        progress: &ChildProgress,
        history: &[TestResult],
    ) -> Result<(), StoreError> {
        (**self).save_progress(child_id, progress, history)
    }

    fn delete_results(&mut self, child_id: &str) -> Result<usize, StoreError> {
        (**self).delete_results(child_id)
    }
}
