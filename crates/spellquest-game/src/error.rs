use spellquest_core::Position;

/// Errors returned by play sessions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The session has already been finished.
    #[display("session is already completed")]
    SessionCompleted,
    /// A gesture referred to a cell outside the grid.
    #[display("cell {pos} is outside the grid")]
    OutOfBounds {
        /// The offending position.
        pos: Position,
    },
    /// A spelling test was started without any words.
    #[display("word list is empty")]
    EmptyWordList,
}
