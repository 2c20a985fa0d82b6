use std::{io, path::PathBuf};

use spellquest_game::GameError;
use spellquest_generator::GenerateError;
use spellquest_progress::{CacheError, RecordError, StoreError};

use crate::{session::SessionError, settings::SettingsError};

/// Errors reported by the `spellquest` command.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("{_0}")]
    Settings(#[from] SettingsError),
    #[display("failed to read word list {}: {source}", path.display())]
    WordFile { path: PathBuf, source: io::Error },
    #[display("invalid word list {}: {source}", path.display())]
    WordFileFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("give a word list with --words or a child with --child")]
    MissingWordSource,
    #[display("{_0}")]
    Generate(#[from] GenerateError),
    #[display("{_0}")]
    Game(#[from] GameError),
    #[display("{_0}")]
    Session(#[from] SessionError),
    #[display("{_0}")]
    Store(#[from] StoreError),
    #[display("{_0}")]
    Cache(#[from] CacheError),
    #[display("{_0}")]
    Record(#[from] RecordError),
    #[display("terminal I/O failed: {_0}")]
    Io(#[from] io::Error),
}
