use std::{collections::BTreeSet, time::Instant};

use spellquest_core::{LetterGrid, Line, Position, Solution};
use spellquest_generator::{GeneratedPuzzle, PuzzleSeed};

use crate::{GameError, SessionSummary, percentage};

/// An in-progress drag gesture.
///
/// `current` only ever holds a cell that forms a straight line with `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Cell where the gesture began.
    pub start: Position,
    /// Current end of the selection.
    pub current: Position,
}

impl Selection {
    /// Returns the straight line covered by the selection.
    #[must_use]
    pub fn line(&self) -> Option<Line> {
        Line::between(self.start, self.current)
    }
}

/// Where a [`WordSearch`] session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionPhase {
    /// No gesture in progress.
    Idle,
    /// A cell has been pressed and the gesture is ongoing.
    Selecting,
    /// The session has been finished; no more input is accepted.
    Completed,
}

/// Result of releasing a selection.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ReleaseOutcome {
    /// There was no active selection.
    NoSelection,
    /// The selection matched a word that had not been found yet.
    Found(String),
    /// The selection matched a word that was already found.
    AlreadyFound(String),
    /// The selection did not match any word.
    Missed,
}

/// A placed word and whether it has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStatus<'a> {
    /// Normalized word.
    pub word: &'a str,
    /// Whether the child has found it.
    pub found: bool,
}

/// A word-search play session.
///
/// The session owns the puzzle and tracks a single press-drag-release
/// gesture at a time. A release is matched against the placed words by
/// endpoints, in either direction; letters are not re-read because the grid
/// never changes during a session.
///
/// # Example
///
/// ```
/// use spellquest_core::WordEntry;
/// use spellquest_game::{ReleaseOutcome, WordSearch};
/// use spellquest_generator::PuzzleGenerator;
///
/// let puzzle = PuzzleGenerator::default()
///     .generate(&[WordEntry::new("cat"), WordEntry::new("dog")])
///     .unwrap();
/// let cat = puzzle.solution_for("CAT").unwrap().clone();
/// let mut game = WordSearch::new(puzzle);
///
/// // Drag from the last letter back to the first.
/// game.press(cat.end).unwrap();
/// game.enter(cat.start).unwrap();
/// assert_eq!(game.release().unwrap(), ReleaseOutcome::Found("CAT".to_owned()));
///
/// let summary = game.finish().unwrap();
/// assert_eq!((summary.score, summary.total, summary.percentage), (1, 2, 50));
/// ```
#[derive(Debug, Clone)]
pub struct WordSearch {
    grid: LetterGrid,
    solutions: Vec<Solution>,
    placed: Vec<String>,
    seed: PuzzleSeed,
    found: Vec<String>,
    selection: Option<Selection>,
    completed: bool,
    started_at: Instant,
}

impl WordSearch {
    /// Starts a session now.
    #[must_use]
    pub fn new(puzzle: GeneratedPuzzle) -> Self {
        Self::with_start_time(puzzle, Instant::now())
    }

    /// Starts a session with an explicit start time.
    #[must_use]
    pub fn with_start_time(puzzle: GeneratedPuzzle, started_at: Instant) -> Self {
        let GeneratedPuzzle {
            grid,
            solutions,
            placed,
            unplaced: _,
            seed,
        } = puzzle;
        Self {
            grid,
            solutions,
            placed,
            seed,
            found: Vec::new(),
            selection: None,
            completed: false,
            started_at,
        }
    }

    /// Returns the letter grid.
    #[must_use]
    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    /// Returns the placed-word solutions.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Returns the normalized words to find.
    #[must_use]
    pub fn placed(&self) -> &[String] {
        &self.placed
    }

    /// Returns the seed of the puzzle being played.
    #[must_use]
    pub fn seed(&self) -> PuzzleSeed {
        self.seed
    }

    /// Returns the words found so far, in the order they were found.
    #[must_use]
    pub fn found_words(&self) -> &[String] {
        &self.found
    }

    /// Returns whether `word` (normalized) has been found.
    #[must_use]
    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|found| found == word)
    }

    /// Returns whether every placed word has been found.
    #[must_use]
    pub fn is_all_found(&self) -> bool {
        self.found.len() == self.placed.len()
    }

    /// Returns each placed word with its found state, in placement order.
    #[must_use]
    pub fn word_status(&self) -> Vec<WordStatus<'_>> {
        self.placed
            .iter()
            .map(|word| WordStatus {
                word,
                found: self.is_found(word),
            })
            .collect()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.completed {
            SessionPhase::Completed
        } else if self.selection.is_some() {
            SessionPhase::Selecting
        } else {
            SessionPhase::Idle
        }
    }

    /// Returns the active selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Returns when the session started.
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.completed {
            return Err(GameError::SessionCompleted);
        }
        Ok(())
    }

    fn ensure_in_grid(&self, pos: Position) -> Result<(), GameError> {
        if !self.grid.contains(pos) {
            return Err(GameError::OutOfBounds { pos });
        }
        Ok(())
    }

    /// Begins a selection at `pos`.
    ///
    /// Pressing while a selection is active restarts it from `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] after [`WordSearch::finish`],
    /// and [`GameError::OutOfBounds`] if `pos` is outside the grid.
    pub fn press(&mut self, pos: Position) -> Result<(), GameError> {
        self.ensure_active()?;
        self.ensure_in_grid(pos)?;
        self.selection = Some(Selection {
            start: pos,
            current: pos,
        });
        Ok(())
    }

    /// Extends the active selection to `pos`.
    ///
    /// The endpoint only moves if `pos` lies on the same row, column, or 45°
    /// diagonal as the start cell. Returns whether the endpoint moved; entering
    /// a cell with no active selection, or at a bent angle, returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] after [`WordSearch::finish`],
    /// and [`GameError::OutOfBounds`] if `pos` is outside the grid.
    pub fn enter(&mut self, pos: Position) -> Result<bool, GameError> {
        self.ensure_active()?;
        self.ensure_in_grid(pos)?;
        let Some(selection) = &mut self.selection else {
            return Ok(false);
        };
        if Line::between(selection.start, pos).is_none() {
            return Ok(false);
        }
        selection.current = pos;
        Ok(true)
    }

    /// Finishes the active selection and checks it against the solutions.
    ///
    /// The selection is cleared whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] after [`WordSearch::finish`].
    pub fn release(&mut self) -> Result<ReleaseOutcome, GameError> {
        self.ensure_active()?;
        let Some(Selection { start, current }) = self.selection.take() else {
            return Ok(ReleaseOutcome::NoSelection);
        };

        let Some(solution) = self
            .solutions
            .iter()
            .find(|solution| solution.matches_span(start, current))
        else {
            log::debug!("selection {start} -> {current} missed");
            return Ok(ReleaseOutcome::Missed);
        };

        let word = solution.word.clone();
        if self.is_found(&word) {
            return Ok(ReleaseOutcome::AlreadyFound(word));
        }
        log::debug!("found {word:?} ({}/{})", self.found.len() + 1, self.placed.len());
        self.found.push(word.clone());
        Ok(ReleaseOutcome::Found(word))
    }

    /// Drops the active selection without checking it, as when the pointer
    /// leaves the grid.
    pub fn cancel_selection(&mut self) {
        self.selection = None;
    }

    /// Returns the cells of the in-progress selection, for highlighting.
    ///
    /// Empty when there is no selection.
    #[must_use]
    pub fn selected_cells(&self) -> BTreeSet<Position> {
        self.selection
            .and_then(|selection| selection.line())
            .map(|line| line.cells().collect())
            .unwrap_or_default()
    }

    /// Finishes the session now.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] if already finished.
    pub fn finish(&mut self) -> Result<SessionSummary, GameError> {
        self.finish_at(Instant::now())
    }

    /// Finishes the session at `now` and returns the summary.
    ///
    /// Any active selection is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] if already finished.
    pub fn finish_at(&mut self, now: Instant) -> Result<SessionSummary, GameError> {
        self.ensure_active()?;
        self.completed = true;
        self.selection = None;

        let score = self.found.len();
        let total = self.placed.len();
        let words_not_found = self
            .placed
            .iter()
            .filter(|word| !self.is_found(word))
            .cloned()
            .collect();
        let summary = SessionSummary {
            score,
            total,
            percentage: percentage(score, total),
            time_taken: now.saturating_duration_since(self.started_at),
            words_found: self.found.clone(),
            words_not_found,
        };
        log::info!(
            "word search finished: {score}/{total} ({}%) in {:?}",
            summary.percentage,
            summary.time_taken
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use spellquest_core::WordEntry;
    use spellquest_generator::{GeneratorConfig, GridSizePolicy, PuzzleGenerator};

    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    // CAT along row 0, DOG down the diagonal from (1, 1).
    fn fixed_puzzle() -> GeneratedPuzzle {
        let grid: LetterGrid = "
            CATXX
            XDXXX
            XXOXX
            XXXGX
            XXXXX
        "
        .parse()
        .expect("valid grid");
        GeneratedPuzzle {
            grid,
            solutions: vec![
                Solution {
                    word: "CAT".to_owned(),
                    start: pos(0, 0),
                    end: pos(0, 2),
                },
                Solution {
                    word: "DOG".to_owned(),
                    start: pos(1, 1),
                    end: pos(3, 3),
                },
            ],
            placed: vec!["CAT".to_owned(), "DOG".to_owned()],
            unplaced: vec![],
            seed: PuzzleSeed::from_phrase("fixed"),
        }
    }

    fn select(game: &mut WordSearch, from: Position, to: Position) -> ReleaseOutcome {
        game.press(from).unwrap();
        game.enter(to).unwrap();
        game.release().unwrap()
    }

    #[test]
    fn test_state_machine() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert!(game.phase().is_idle());

        game.press(pos(0, 0)).unwrap();
        assert!(game.phase().is_selecting());
        assert_eq!(
            game.selection(),
            Some(Selection {
                start: pos(0, 0),
                current: pos(0, 0)
            })
        );

        game.release().unwrap();
        assert!(game.phase().is_idle());
        assert_eq!(game.selection(), None);

        game.finish().unwrap();
        assert!(game.phase().is_completed());
        assert_eq!(game.press(pos(0, 0)), Err(GameError::SessionCompleted));
        assert_eq!(game.enter(pos(0, 1)), Err(GameError::SessionCompleted));
        assert_eq!(game.release(), Err(GameError::SessionCompleted));
        assert_eq!(game.finish(), Err(GameError::SessionCompleted));
    }

    #[test]
    fn test_forward_and_reverse_match() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert_eq!(
            select(&mut game, pos(0, 0), pos(0, 2)),
            ReleaseOutcome::Found("CAT".to_owned())
        );
        assert_eq!(
            select(&mut game, pos(3, 3), pos(1, 1)),
            ReleaseOutcome::Found("DOG".to_owned())
        );
        assert!(game.is_all_found());
    }

    #[test]
    fn test_refinding_is_idempotent() {
        let mut game = WordSearch::new(fixed_puzzle());
        select(&mut game, pos(0, 0), pos(0, 2));
        assert_eq!(
            select(&mut game, pos(0, 2), pos(0, 0)),
            ReleaseOutcome::AlreadyFound("CAT".to_owned())
        );
        assert_eq!(game.found_words(), ["CAT"]);

        let summary = game.finish().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.words_found, ["CAT"]);
    }

    #[test]
    fn test_partial_and_single_cell_selections_miss() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert_eq!(select(&mut game, pos(0, 0), pos(0, 1)), ReleaseOutcome::Missed);
        assert_eq!(select(&mut game, pos(0, 0), pos(0, 3)), ReleaseOutcome::Missed);
        assert_eq!(select(&mut game, pos(1, 1), pos(1, 1)), ReleaseOutcome::Missed);
        assert!(game.found_words().is_empty());
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert_eq!(game.release(), Ok(ReleaseOutcome::NoSelection));
        assert_eq!(game.enter(pos(0, 2)), Ok(false));
        assert!(game.phase().is_idle());
    }

    #[test]
    fn test_bent_drag_is_ignored() {
        let mut game = WordSearch::new(fixed_puzzle());
        game.press(pos(0, 0)).unwrap();
        assert_eq!(game.enter(pos(1, 2)), Ok(false));
        assert_eq!(game.selected_cells(), BTreeSet::from([pos(0, 0)]));
        assert_eq!(game.release(), Ok(ReleaseOutcome::Missed));

        // A bent cell after a valid one keeps the last valid endpoint.
        game.press(pos(0, 0)).unwrap();
        assert_eq!(game.enter(pos(0, 2)), Ok(true));
        assert_eq!(game.enter(pos(1, 2)), Ok(false));
        assert_eq!(game.release(), Ok(ReleaseOutcome::Found("CAT".to_owned())));
    }

    #[test]
    fn test_selected_cells_follow_line() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert!(game.selected_cells().is_empty());

        game.press(pos(4, 0)).unwrap();
        game.enter(pos(1, 3)).unwrap();
        assert_eq!(
            game.selected_cells(),
            BTreeSet::from([pos(4, 0), pos(3, 1), pos(2, 2), pos(1, 3)])
        );
        let keys = game
            .selected_cells()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["1-3", "2-2", "3-1", "4-0"]);

        game.cancel_selection();
        assert!(game.selected_cells().is_empty());
        assert_eq!(game.release(), Ok(ReleaseOutcome::NoSelection));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = WordSearch::new(fixed_puzzle());
        assert_eq!(
            game.press(pos(5, 0)),
            Err(GameError::OutOfBounds { pos: pos(5, 0) })
        );
        game.press(pos(0, 0)).unwrap();
        assert_eq!(
            game.enter(pos(0, 7)),
            Err(GameError::OutOfBounds { pos: pos(0, 7) })
        );
        assert_eq!(game.selection().map(|s| s.current), Some(pos(0, 0)));
    }

    #[test]
    fn test_summary_scores() {
        let start = Instant::now();

        let mut game = WordSearch::with_start_time(fixed_puzzle(), start);
        let summary = game.finish_at(start + Duration::from_millis(1500)).unwrap();
        assert_eq!((summary.score, summary.total, summary.percentage), (0, 2, 0));
        assert_eq!(summary.time_taken, Duration::from_millis(1500));
        assert_eq!(summary.words_not_found, ["CAT", "DOG"]);
        assert!(summary.celebration().is_none());

        let mut game = WordSearch::with_start_time(fixed_puzzle(), start);
        select(&mut game, pos(3, 3), pos(1, 1));
        select(&mut game, pos(0, 0), pos(0, 2));
        let summary = game.finish_at(start).unwrap();
        assert_eq!((summary.score, summary.total, summary.percentage), (2, 2, 100));
        assert_eq!(summary.words_found, ["DOG", "CAT"]);
        assert!(summary.words_not_found.is_empty());
        assert!(summary.celebration().is_excellent());
    }

    #[test]
    fn test_finish_discards_selection() {
        let mut game = WordSearch::new(fixed_puzzle());
        game.press(pos(0, 0)).unwrap();
        game.enter(pos(0, 2)).unwrap();
        let summary = game.finish().unwrap();
        assert_eq!(summary.score, 0);
        assert!(game.selected_cells().is_empty());
    }

    #[test]
    fn test_word_status() {
        let mut game = WordSearch::new(fixed_puzzle());
        select(&mut game, pos(1, 1), pos(3, 3));
        assert_eq!(
            game.word_status(),
            [
                WordStatus {
                    word: "CAT",
                    found: false
                },
                WordStatus {
                    word: "DOG",
                    found: true
                },
            ]
        );
    }

    #[test]
    fn test_generated_cat_dog_scenario() {
        let generator =
            PuzzleGenerator::new(GeneratorConfig::default().size_policy(GridSizePolicy::Fixed(10)));
        let puzzle = generator
            .generate_with_seed(
                &[WordEntry::new("CAT"), WordEntry::new("DOG")],
                PuzzleSeed::from_phrase("cat and dog"),
            )
            .unwrap();
        assert_eq!(puzzle.placed, ["CAT", "DOG"]);
        let cat = puzzle.solution_for("CAT").unwrap().clone();

        let mut game = WordSearch::new(puzzle);
        assert_eq!(
            select(&mut game, cat.start, cat.end),
            ReleaseOutcome::Found("CAT".to_owned())
        );
        assert_eq!(game.found_words(), ["CAT"]);

        let summary = game.finish().unwrap();
        assert_eq!((summary.score, summary.total, summary.percentage), (1, 2, 50));
        assert_eq!(summary.words_not_found, ["DOG"]);
    }

    #[test]
    fn test_every_generated_solution_matches_both_ways() {
        let words = ["rocket", "planet", "comet", "star", "moon", "orbit"]
            .map(WordEntry::new);
        let puzzle = PuzzleGenerator::default()
            .generate_with_seed(&words, PuzzleSeed::from_phrase("space"))
            .unwrap();
        let solutions = puzzle.solutions.clone();

        let mut game = WordSearch::new(puzzle);
        for (i, solution) in solutions.iter().enumerate() {
            let (from, to) = if i % 2 == 0 {
                (solution.start, solution.end)
            } else {
                (solution.end, solution.start)
            };
            assert_eq!(
                select(&mut game, from, to),
                ReleaseOutcome::Found(solution.word.clone())
            );
        }
        assert!(game.is_all_found());
    }
}
