use rand::{
    SeedableRng as _,
    distr::{Distribution as _, Uniform, uniform},
};
use rand_pcg::Pcg64;
use spellquest_core::{Direction, LetterGrid, Line, MIN_WORD_LEN, Position, Solution, WordEntry};

use crate::{GeneratorConfig, PuzzleSeed};

/// A generated word-search puzzle.
///
/// The `grid` is completely filled. `solutions` and `placed` list the words
/// that were placed, in input order; scoring must use `placed.len()` as the
/// number of words to find, since words that did not fit are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The filled letter grid.
    pub grid: LetterGrid,
    /// One span per placed word.
    pub solutions: Vec<Solution>,
    /// Normalized words that were placed.
    pub placed: Vec<String>,
    /// Input words that were skipped or could not be placed.
    pub unplaced: Vec<String>,
    /// Seed that reproduces this puzzle under the same configuration.
    pub seed: PuzzleSeed,
}

impl GeneratedPuzzle {
    /// Returns the solution for a normalized word.
    #[must_use]
    pub fn solution_for(&self, word: &str) -> Option<&Solution> {
        self.solutions.iter().find(|solution| solution.word == word)
    }
}

/// Errors returned by [`PuzzleGenerator`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GenerateError {
    /// No input word survives normalization with at least two characters.
    #[display("no usable words in the word list")]
    EmptyWordList,
    /// Every word failed placement; there is no puzzle to show.
    #[display("no words could be placed in the grid")]
    NoWordsPlaced,
    /// The configuration allows no placement directions.
    #[display("no placement directions are allowed")]
    NoDirections,
    /// The chosen side length exceeds [`GeneratorConfig::MAX_SIZE`].
    #[display("a {size}x{size} grid is too large (at most {max}x{max})")]
    GridTooLarge {
        /// The requested side length.
        size: usize,
        /// The largest allowed side length.
        max: usize,
    },
    /// A random range could not be built.
    #[display("invalid sampling range: {_0}")]
    Sampling(#[from] uniform::Error),
    /// The operating system's random source failed.
    #[display("failed to draw a random seed: {_0}")]
    Entropy(#[from] getrandom::Error),
}

/// Word-search puzzle generator.
///
/// Places each word along a random allowed direction from a random start
/// cell, retrying a bounded number of times, then fills the remaining
/// cells with random letters. All randomness comes from the
/// [`PuzzleSeed`], so the same seed and configuration always produce the
/// same puzzle.
///
/// # Example
///
/// ```
/// use spellquest_core::WordEntry;
/// use spellquest_generator::PuzzleGenerator;
///
/// let generator = PuzzleGenerator::default();
/// let words = [WordEntry::new("cat"), WordEntry::new("dog")];
/// let puzzle = generator.generate(&words).unwrap();
///
/// for solution in &puzzle.solutions {
///     let line = solution.line().unwrap();
///     assert_eq!(puzzle.grid.read_line(&line).unwrap(), solution.word);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a puzzle from a fresh random seed.
    ///
    /// # Errors
    ///
    /// See [`PuzzleGenerator::generate_with_seed`]; additionally returns
    /// [`GenerateError::Entropy`] if no seed could be drawn.
    pub fn generate(&self, words: &[WordEntry]) -> Result<GeneratedPuzzle, GenerateError> {
        let seed = PuzzleSeed::random()?;
        self.generate_with_seed(words, seed)
    }

    /// Generates a puzzle deterministically from `seed`.
    ///
    /// Hints are ignored. Words that normalize to fewer than two characters,
    /// and repeats of an earlier normalized word, are skipped. Words that do
    /// not fit after the configured number of attempts are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NoDirections`] if the configuration allows no
    /// direction, [`GenerateError::EmptyWordList`] if no word is usable,
    /// [`GenerateError::GridTooLarge`] if the grid would exceed
    /// [`GeneratorConfig::MAX_SIZE`], and [`GenerateError::NoWordsPlaced`] if
    /// every usable word failed placement.
    pub fn generate_with_seed(
        &self,
        words: &[WordEntry],
        seed: PuzzleSeed,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        let directions = self.config.allowed_directions();
        if directions.is_empty() {
            return Err(GenerateError::NoDirections);
        }

        let mut unplaced = Vec::new();
        let mut targets: Vec<(String, &WordEntry)> = Vec::with_capacity(words.len());
        for entry in words {
            let word = entry.normalized(self.config.keeps_hyphens());
            if word.chars().count() < MIN_WORD_LEN || targets.iter().any(|(w, _)| *w == word) {
                log::debug!("skipping word {:?} (normalized {word:?})", entry.word);
                unplaced.push(entry.word.clone());
                continue;
            }
            targets.push((word, entry));
        }
        if targets.is_empty() {
            return Err(GenerateError::EmptyWordList);
        }

        let size = self
            .config
            .grid_size_policy()
            .size_for(targets.iter().map(|(word, _)| word.len()));
        if size > GeneratorConfig::MAX_SIZE {
            return Err(GenerateError::GridTooLarge {
                size,
                max: GeneratorConfig::MAX_SIZE,
            });
        }
        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        let cell_range = Uniform::new(0, size)?;
        let direction_range = Uniform::new(0, directions.len())?;
        let letter_range = Uniform::new_inclusive(b'A', b'Z')?;

        let mut draft = DraftGrid::new(size);
        let mut solutions = Vec::with_capacity(targets.len());
        let mut placed = Vec::with_capacity(targets.len());

        for (word, entry) in targets {
            let letters = word.chars().collect::<Vec<_>>();
            let mut solution = None;
            for _ in 0..self.config.attempts_per_word() {
                let direction = directions[direction_range.sample(&mut rng)];
                let start = Position::new(cell_range.sample(&mut rng), cell_range.sample(&mut rng));
                if let Some(line) = draft.fit(&letters, start, direction) {
                    draft.write(&letters, &line);
                    solution = Some(Solution {
                        word: word.clone(),
                        start: line.start(),
                        end: line.end(),
                    });
                    break;
                }
            }

            match solution {
                Some(solution) => {
                    log::debug!(
                        "placed {word:?} from {} to {}",
                        solution.start,
                        solution.end
                    );
                    solutions.push(solution);
                    placed.push(word);
                }
                None => {
                    log::debug!(
                        "dropping {word:?} after {} attempts",
                        self.config.attempts_per_word()
                    );
                    unplaced.push(entry.word.clone());
                }
            }
        }

        if placed.is_empty() {
            return Err(GenerateError::NoWordsPlaced);
        }

        let cells = draft
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| char::from(letter_range.sample(&mut rng))))
            .collect();
        let grid = LetterGrid::from_cells(size, cells)
            .unwrap_or_else(|e| unreachable!("generated grid is well formed: {e}"));

        Ok(GeneratedPuzzle {
            grid,
            solutions,
            placed,
            unplaced,
            seed,
        })
    }
}

/// A partially filled grid used during placement.
#[derive(Debug)]
struct DraftGrid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl DraftGrid {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row() * self.size + pos.col()
    }

    /// Returns the line for `letters` if it stays in bounds and every cell
    /// is empty or already holds the needed letter.
    fn fit(&self, letters: &[char], start: Position, direction: Direction) -> Option<Line> {
        let line = Line::from_direction(start, direction, letters.len())?;
        let end = line.end();
        if end.row() >= self.size || end.col() >= self.size {
            return None;
        }
        line.cells()
            .zip(letters)
            .all(|(pos, &letter)| self.cells[self.index(pos)].is_none_or(|cell| cell == letter))
            .then_some(line)
    }

    fn write(&mut self, letters: &[char], line: &Line) {
        for (pos, &letter) in line.cells().zip(letters) {
            let index = self.index(pos);
            self.cells[index] = Some(letter);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::GridSizePolicy;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words.iter().copied().map(WordEntry::new).collect()
    }

    fn seed() -> PuzzleSeed {
        SEED.parse().expect("valid seed")
    }

    #[track_caller]
    fn assert_puzzle_invariants(puzzle: &GeneratedPuzzle, input_len: usize) {
        let grid = &puzzle.grid;

        // Every cell is filled with a grid character.
        for pos in grid.positions() {
            let ch = grid[pos];
            assert!(ch.is_ascii_uppercase() || ch == '-', "bad cell {ch:?} at {pos}");
        }

        // Every solution spells its word along a straight line.
        let mut letters_at = HashMap::new();
        for solution in &puzzle.solutions {
            let line = solution.line().expect("solution is a straight line");
            assert_eq!(line.len(), solution.word.len());
            assert_eq!(grid.read_line(&line).as_deref(), Some(solution.word.as_str()));
            for (pos, letter) in line.cells().zip(solution.word.chars()) {
                let previous = letters_at.insert(pos, letter);
                assert!(previous.is_none_or(|prev| prev == letter), "conflict at {pos}");
            }
        }

        // Placed words and solutions correspond one to one.
        assert!(puzzle.placed.len() <= input_len);
        assert_eq!(puzzle.placed.len(), puzzle.solutions.len());
        for (word, solution) in puzzle.placed.iter().zip(&puzzle.solutions) {
            assert_eq!(word, &solution.word);
        }
        assert_eq!(puzzle.placed.len() + puzzle.unplaced.len(), input_len);
    }

    #[test]
    fn test_cat_and_dog_are_placed_in_ten_by_ten() {
        let generator =
            PuzzleGenerator::new(GeneratorConfig::default().size_policy(GridSizePolicy::Fixed(10)));
        for i in 0..50 {
            let puzzle = generator
                .generate_with_seed(&entries(&["CAT", "DOG"]), PuzzleSeed::from_phrase(&i.to_string()))
                .unwrap();
            assert_eq!(puzzle.grid.size(), 10);
            assert_eq!(puzzle.placed, ["CAT", "DOG"]);
            assert_puzzle_invariants(&puzzle, 2);
        }
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let generator = PuzzleGenerator::default();
        let words = entries(&["rabbit", "carrot", "garden", "spade"]);
        let a = generator.generate_with_seed(&words, seed()).unwrap();
        let b = generator.generate_with_seed(&words, seed()).unwrap();
        assert_eq!(a, b);

        let c = generator
            .generate_with_seed(&words, PuzzleSeed::from_phrase("other"))
            .unwrap();
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn test_words_are_normalized() {
        let generator = PuzzleGenerator::default();
        let puzzle = generator
            .generate_with_seed(&entries(&["ice-cream", "don't", "x"]), seed())
            .unwrap();
        assert_eq!(puzzle.placed, ["ICE-CREAM", "DONT"]);
        assert_eq!(puzzle.unplaced, ["x"]);
        assert_puzzle_invariants(&puzzle, 3);

        let generator = PuzzleGenerator::new(GeneratorConfig::default().keep_hyphens(false));
        let puzzle = generator
            .generate_with_seed(&entries(&["ice-cream"]), seed())
            .unwrap();
        assert_eq!(puzzle.placed, ["ICECREAM"]);
    }

    #[test]
    fn test_duplicate_words_are_placed_once() {
        let generator = PuzzleGenerator::default();
        let puzzle = generator
            .generate_with_seed(&entries(&["Cat", "cat!", "dog"]), seed())
            .unwrap();
        assert_eq!(puzzle.placed, ["CAT", "DOG"]);
        assert_eq!(puzzle.unplaced, ["cat!"]);
    }

    #[test]
    fn test_fit_to_words_sizing() {
        let generator = PuzzleGenerator::new(
            GeneratorConfig::default().size_policy(GridSizePolicy::FitToWords { min: 10 }),
        );
        let puzzle = generator
            .generate_with_seed(&entries(&["hippopotamus", "elephant"]), seed())
            .unwrap();
        assert_eq!(puzzle.grid.size(), 12);
        assert_puzzle_invariants(&puzzle, 2);
    }

    #[test]
    fn test_fixed_size_grows_to_longest_word() {
        let generator = PuzzleGenerator::new(
            GeneratorConfig::default()
                .size_policy(GridSizePolicy::Fixed(4))
                .max_attempts(2000),
        );
        let puzzle = generator
            .generate_with_seed(&entries(&["butterfly"]), seed())
            .unwrap();
        assert_eq!(puzzle.grid.size(), 9);
        assert_eq!(puzzle.placed, ["BUTTERFLY"]);
    }

    #[test]
    fn test_directions_are_respected() {
        let generator =
            PuzzleGenerator::new(GeneratorConfig::default().directions(&[Direction::Down]));
        let puzzle = generator
            .generate_with_seed(&entries(&["apple", "pear", "plum", "fig"]), seed())
            .unwrap();
        for solution in &puzzle.solutions {
            assert_eq!(solution.line().unwrap().direction(), Some(Direction::Down));
        }
    }

    #[test]
    fn test_error_states() {
        let generator = PuzzleGenerator::default();
        assert!(matches!(
            generator.generate_with_seed(&entries(&["1", "?!", ""]), seed()),
            Err(GenerateError::EmptyWordList)
        ));
        assert!(matches!(
            generator.generate_with_seed(&[], seed()),
            Err(GenerateError::EmptyWordList)
        ));

        let generator = PuzzleGenerator::new(GeneratorConfig::default().directions(&[]));
        assert!(matches!(
            generator.generate_with_seed(&entries(&["cat"]), seed()),
            Err(GenerateError::NoDirections)
        ));

        let generator = PuzzleGenerator::new(GeneratorConfig::default().max_attempts(0));
        assert!(matches!(
            generator.generate_with_seed(&entries(&["cat"]), seed()),
            Err(GenerateError::NoWordsPlaced)
        ));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let generator =
            PuzzleGenerator::new(GeneratorConfig::default().size_policy(GridSizePolicy::Fixed(100_000)));
        assert!(matches!(
            generator.generate_with_seed(&entries(&["cat"]), seed()),
            Err(GenerateError::GridTooLarge { size: 100_000, max: GeneratorConfig::MAX_SIZE })
        ));

        let long_word = "A".repeat(GeneratorConfig::MAX_SIZE + 1);
        assert!(matches!(
            PuzzleGenerator::default().generate_with_seed(&entries(&[long_word.as_str()]), seed()),
            Err(GenerateError::GridTooLarge { .. })
        ));

        let generator = PuzzleGenerator::new(
            GeneratorConfig::default().size_policy(GridSizePolicy::Fixed(GeneratorConfig::MAX_SIZE)),
        );
        assert!(generator.generate_with_seed(&entries(&["cat"]), seed()).is_ok());
    }

    #[test]
    fn test_crowded_grid_drops_words() {
        // A 2x2 grid has room for at most a handful of two-letter words.
        let generator = PuzzleGenerator::new(
            GeneratorConfig::default()
                .size_policy(GridSizePolicy::Fixed(2))
                .directions(&[Direction::Right]),
        );
        let words = entries(&["AB", "CD", "EF", "GH"]);
        let puzzle = generator.generate_with_seed(&words, seed()).unwrap();
        assert_eq!(puzzle.placed.len(), 2);
        assert_eq!(puzzle.unplaced.len(), 2);
        assert_puzzle_invariants(&puzzle, 4);
    }

    proptest! {
        #[test]
        fn generated_puzzles_hold_invariants(
            words in prop::collection::vec("[a-z]{2,9}", 1..12),
            seed in any::<[u8; 32]>(),
            fit in any::<bool>(),
            all_directions in any::<bool>(),
        ) {
            let policy = if fit {
                GridSizePolicy::FitToWords { min: 6 }
            } else {
                GridSizePolicy::Fixed(10)
            };
            let directions: &[Direction] = if all_directions {
                &Direction::ALL
            } else {
                &Direction::FORWARD
            };
            let generator = PuzzleGenerator::new(
                GeneratorConfig::default().size_policy(policy).directions(directions),
            );
            let words = words.iter().map(|w| WordEntry::new(w.as_str())).collect::<Vec<_>>();
            match generator.generate_with_seed(&words, PuzzleSeed::from_bytes(seed)) {
                Ok(puzzle) => assert_puzzle_invariants(&puzzle, words.len()),
                Err(GenerateError::NoWordsPlaced) => {}
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }
    }
}
