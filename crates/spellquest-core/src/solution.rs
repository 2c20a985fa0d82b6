//! Recorded word placements.

use crate::{Line, Position};

/// The span of one successfully placed word.
///
/// `word` is the normalized form that was written into the grid. Reading the
/// grid cell by cell from `start` to `end` spells `word` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    /// Normalized word.
    pub word: String,
    /// Cell holding the first letter.
    pub start: Position,
    /// Cell holding the last letter.
    pub end: Position,
}

impl Solution {
    /// Returns the line covered by this solution.
    ///
    /// Returns `None` only if `start` and `end` do not form a straight line,
    /// which never happens for solutions produced by the generator.
    #[must_use]
    pub fn line(&self) -> Option<Line> {
        Line::between(self.start, self.end)
    }

    /// Returns whether a selection from `from` to `to` covers this solution,
    /// in either reading direction.
    ///
    /// Matching compares endpoints only. Zero-length selections never match.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellquest_core::{Position, Solution};
    ///
    /// let solution = Solution {
    ///     word: "CAT".to_owned(),
    ///     start: Position::new(0, 0),
    ///     end: Position::new(0, 2),
    /// };
    /// assert!(solution.matches_span(Position::new(0, 0), Position::new(0, 2)));
    /// assert!(solution.matches_span(Position::new(0, 2), Position::new(0, 0)));
    /// assert!(!solution.matches_span(Position::new(0, 0), Position::new(0, 1)));
    /// ```
    #[must_use]
    pub fn matches_span(&self, from: Position, to: Position) -> bool {
        if from == to {
            return false;
        }
        (from == self.start && to == self.end) || (from == self.end && to == self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_never_matches() {
        // Degenerate solution; the generator never records one.
        let solution = Solution {
            word: "A".to_owned(),
            start: Position::new(1, 1),
            end: Position::new(1, 1),
        };
        assert!(!solution.matches_span(Position::new(1, 1), Position::new(1, 1)));
    }

    #[test]
    fn test_line_covers_word() {
        let solution = Solution {
            word: "DOG".to_owned(),
            start: Position::new(2, 0),
            end: Position::new(0, 2),
        };
        let line = solution.line().unwrap();
        assert_eq!(line.len(), solution.word.len());
    }
}
