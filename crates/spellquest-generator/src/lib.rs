//! Word-search puzzle generation.
//!
//! [`PuzzleGenerator`] places a list of words into a square letter grid and
//! records where each one went. Generation is driven by a [`PuzzleSeed`], so
//! puzzles can be reproduced exactly in tests or shared between players.
//!
//! # Examples
//!
//! ```
//! use spellquest_core::WordEntry;
//! use spellquest_generator::{GeneratorConfig, GridSizePolicy, PuzzleGenerator, PuzzleSeed};
//!
//! let generator = PuzzleGenerator::new(
//!     GeneratorConfig::default().size_policy(GridSizePolicy::Fixed(10)),
//! );
//! let seed: PuzzleSeed = "monday".parse().unwrap();
//! let words = [WordEntry::new("cat"), WordEntry::new("dog")];
//!
//! let puzzle = generator.generate_with_seed(&words, seed).unwrap();
//! assert_eq!(puzzle.grid.size(), 10);
//! assert_eq!(puzzle.seed, seed);
//! ```

mod config;
mod generator;
mod seed;

pub use self::{
    config::{GeneratorConfig, GridSizePolicy},
    generator::{GenerateError, GeneratedPuzzle, PuzzleGenerator},
    seed::{PuzzleSeed, SeedParseError},
};
