use std::{
    fs::{self, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    ChildProfile, ChildProgress, ResultStore, StoreError, TestResult, WordList, WordListProvider,
};

const LISTS_DIR: &str = "lists";
const RESULTS_DIR: &str = "results";
const CHILDREN_DIR: &str = "children";

/// A store keeping one JSON document per record under a directory.
///
/// ```text
/// <root>/lists/<any>.json      word lists, ordered by file name
/// <root>/results/<id>.json     one test result each
/// <root>/children/<id>.json    one child profile each
/// ```
///
/// Missing directories are treated as empty and created on first write.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a word list document named after the list id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not a valid document name or the file
    /// cannot be written.
    pub fn put_word_list(&self, list: &WordList) -> Result<(), StoreError> {
        let path = self.document_path(LISTS_DIR, &list.id)?;
        write_json(&path, list)
    }

    fn document_path(&self, dir: &str, id: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_owned()));
        }
        Ok(self.root.join(dir).join(format!("{id}.json")))
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
        && !id.starts_with('.')
}

fn read_json<T>(path: &Path) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_owned(),
            source,
        })
}

fn encode<T>(path: &Path, value: &T) -> Result<String, StoreError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_owned(),
        source,
    })
}

fn create_parent(path: &Path) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_owned(),
        source,
    })
}

fn write_json<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let json = encode(path, value)?;
    create_parent(path)?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Lists the `.json` files of a directory sorted by name; a missing
/// directory is empty.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: dir.to_owned(),
                source,
            });
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_owned(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

impl WordListProvider for DirectoryStore {
    fn word_lists(&self) -> Result<Vec<WordList>, StoreError> {
        let paths = json_files(&self.root.join(LISTS_DIR))?;
        let mut lists = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(list) = read_json(&path)? {
                lists.push(list);
            }
        }
        Ok(lists)
    }
}

impl ResultStore for DirectoryStore {
    fn check_child_id(&self, child_id: &str) -> Result<(), StoreError> {
        self.document_path(CHILDREN_DIR, child_id).map(drop)
    }

    fn append_result(&mut self, result: &TestResult) -> Result<String, StoreError> {
        let stamp = result.date.format("%Y%m%dT%H%M%S%3fZ");
        let base = format!("{stamp}-{}", result.child_id);

        let mut attempt = 0_u32;
        loop {
            let id = if attempt == 0 {
                base.clone()
            } else {
                format!("{base}-{attempt}")
            };
            attempt += 1;
            let path = self.document_path(RESULTS_DIR, &id)?;

            let mut record = result.clone();
            record.id = Some(id.clone());
            let json = encode(&path, &record)?;
            create_parent(&path)?;

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())
                        .map_err(|source| StoreError::Io { path, source })?;
                    log::debug!("stored result {id}");
                    return Ok(id);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }
    }

    fn load_child(&self, child_id: &str) -> Result<Option<ChildProfile>, StoreError> {
        let path = self.document_path(CHILDREN_DIR, child_id)?;
        read_json(&path)
    }

    fn save_progress(
        &mut self,
        child_id: &str,
        progress: &ChildProgress,
        history: &[TestResult],
    ) -> Result<(), StoreError> {
        let path = self.document_path(CHILDREN_DIR, child_id)?;
        let mut profile = read_json(&path)?.unwrap_or_else(|| ChildProfile::new(child_id));
        profile.progress = *progress;
        profile.test_history = history.to_vec();
        write_json(&path, &profile)
    }

    fn delete_results(&mut self, child_id: &str) -> Result<usize, StoreError> {
        let mut removed = 0;
        for path in json_files(&self.root.join(RESULTS_DIR))? {
            let Some(result) = read_json::<TestResult>(&path)? else {
                continue;
            };
            if result.child_id != child_id {
                continue;
            }
            fs::remove_file(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            removed += 1;
        }
        log::debug!("deleted {removed} result(s) of {child_id}");
        Ok(removed)
    }
}
