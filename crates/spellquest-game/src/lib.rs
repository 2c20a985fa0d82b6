//! Interactive play sessions.
//!
//! - [`WordSearch`] tracks press/drag/release gestures over a generated
//!   grid, matches them against the placed words, and produces a
//!   [`SessionSummary`] when the child finishes.
//! - [`SpellingTest`] asks the words of a list one at a time and checks the
//!   typed answers.
//!
//! Sessions never persist anything themselves; the summaries are handed to
//! the progress layer.

mod error;
mod spelling;
mod summary;
mod word_search;

pub use self::{
    error::GameError,
    spelling::{AnswerOutcome, IncorrectAnswer, SpellingSummary, SpellingTest},
    summary::{Celebration, SessionSummary, percentage},
    word_search::{ReleaseOutcome, Selection, SessionPhase, WordSearch, WordStatus},
};
