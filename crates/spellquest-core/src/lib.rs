//! Core data structures for word-search puzzles.
//!
//! This crate provides the small, shared vocabulary used by puzzle generation,
//! interactive play, and result tracking.
//!
//! # Overview
//!
//! 1. **Geometry** - Where things are on the board
//!    - [`position`]: Cell coordinates and the eight writing [`Direction`]s
//!    - [`line`]: Straight horizontal, vertical, or 45° diagonal spans of cells
//!
//! 2. **Board contents**
//!    - [`grid`]: A square grid of uppercase letters
//!    - [`solution`]: The recorded span of a placed word
//!
//! 3. **Words**
//!    - [`word`]: Word entries with optional hints, and normalization into
//!      the grid alphabet
//!
//! # Examples
//!
//! ```
//! use spellquest_core::{Direction, LetterGrid, Line, Position};
//!
//! let grid: LetterGrid = "
//!     CAT
//!     XOX
//!     XXG
//! "
//! .parse()
//! .unwrap();
//!
//! let line = Line::between(Position::new(0, 0), Position::new(0, 2)).unwrap();
//! assert_eq!(line.direction(), Some(Direction::Right));
//! assert_eq!(grid.read_line(&line).as_deref(), Some("CAT"));
//! ```

pub mod grid;
pub mod line;
pub mod position;
pub mod solution;
pub mod word;

pub use self::{
    grid::{GridParseError, LetterGrid},
    line::Line,
    position::{Direction, Position},
    solution::Solution,
    word::{MIN_WORD_LEN, WordEntry, normalize_word},
};
