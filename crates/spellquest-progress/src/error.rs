use std::{io, path::PathBuf};

/// Errors returned by a [`ResultStore`](crate::ResultStore) or
/// [`WordListProvider`](crate::WordListProvider).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// Reading or writing a document failed.
    #[display("failed to access {}: {source}", path.display())]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A document could not be encoded or decoded.
    #[display("malformed document {}: {source}", path.display())]
    Json {
        /// The document path.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
    /// An identifier cannot be used as a document name.
    #[display("invalid identifier {_0:?}")]
    InvalidId(#[error(not(source))] String),
    /// The store is not reachable.
    #[display("result store is unavailable")]
    Unavailable,
}

impl StoreError {
    /// Returns whether retrying the same request can never succeed.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::InvalidId(_))
    }
}

/// Errors returned by the local [`ProfileCache`](crate::ProfileCache).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed.
    #[display("failed to access cache {}: {source}", path.display())]
    Io {
        /// The cache file path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The cache file could not be encoded or decoded.
    #[display("malformed cache {}: {source}", path.display())]
    Json {
        /// The cache file path.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// Errors returned by a [`ResultRecorder`](crate::ResultRecorder).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RecordError {
    /// The store rejected the request.
    #[display("{_0}")]
    Store(#[from] StoreError),
    /// The local cache could not be written.
    #[display("{_0}")]
    Cache(#[from] CacheError),
}

/// A history filter name other than `all`, `spelling`, or `wordsearch`.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown result type {_0:?} (expected all, spelling, or wordsearch)")]
pub struct KindFilterParseError(#[error(not(source))] pub(crate) String);
