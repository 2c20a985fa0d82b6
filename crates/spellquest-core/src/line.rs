//! Straight spans of cells.

use std::iter::FusedIterator;

use crate::{Direction, Position};

/// A straight run of cells from `start` to `end`, inclusive.
///
/// A line is horizontal, vertical, or an exact 45° diagonal. A line whose
/// start and end coincide covers a single cell and has no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    start: Position,
    end: Position,
    direction: Option<Direction>,
    len: usize,
}

impl Line {
    /// Returns the line from `start` to `end`, or `None` if the two cells
    /// are not on a common row, column, or 45° diagonal.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellquest_core::{Line, Position};
    ///
    /// let line = Line::between(Position::new(2, 2), Position::new(0, 4)).unwrap();
    /// assert_eq!(line.len(), 3);
    ///
    /// // A knight's move is not a straight line.
    /// assert!(Line::between(Position::new(0, 0), Position::new(1, 2)).is_none());
    /// ```
    #[must_use]
    pub fn between(start: Position, end: Position) -> Option<Self> {
        let d_row = end.row().cast_signed() - start.row().cast_signed();
        let d_col = end.col().cast_signed() - start.col().cast_signed();
        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return None;
        }

        let steps = d_row.unsigned_abs().max(d_col.unsigned_abs());
        let direction = if steps == 0 {
            None
        } else {
            Direction::from_delta(d_row.signum(), d_col.signum())
        };

        Some(Self {
            start,
            end,
            direction,
            len: steps + 1,
        })
    }

    /// Returns the line starting at `start` that covers `len` cells in `direction`.
    ///
    /// Returns `None` if `len` is zero or the line would leave the
    /// non-negative quadrant.
    #[must_use]
    pub fn from_direction(start: Position, direction: Direction, len: usize) -> Option<Self> {
        let end = start.step(direction, len.checked_sub(1)?)?;
        Some(Self {
            start,
            end,
            direction: (len > 1).then_some(direction),
            len,
        })
    }

    /// Returns the first cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the last cell.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Returns the direction of travel, or `None` for a single cell.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Returns the number of cells on the line (always at least 1).
    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the same cells traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            direction: self.direction.map(Direction::reversed),
            len: self.len,
        }
    }

    /// Returns an iterator over the cells from `start` to `end`.
    #[must_use]
    pub fn cells(&self) -> LineCells {
        LineCells {
            line: *self,
            index: 0,
        }
    }
}

/// Iterator over the cells of a [`Line`].
#[derive(Debug, Clone)]
pub struct LineCells {
    line: Line,
    index: usize,
}

impl Iterator for LineCells {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.line.len {
            return None;
        }
        let pos = match self.line.direction {
            Some(direction) => self.line.start.step(direction, self.index)?,
            None => self.line.start,
        };
        self.index += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.line.len - self.index.min(self.line.len);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineCells {}

impl FusedIterator for LineCells {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_between_accepts_straight_lines() {
        let horizontal = Line::between(pos(1, 1), pos(1, 4)).unwrap();
        assert_eq!(horizontal.direction(), Some(Direction::Right));
        assert_eq!(horizontal.len(), 4);

        let vertical = Line::between(pos(4, 2), pos(0, 2)).unwrap();
        assert_eq!(vertical.direction(), Some(Direction::Up));
        assert_eq!(vertical.len(), 5);

        let diagonal = Line::between(pos(0, 3), pos(3, 0)).unwrap();
        assert_eq!(diagonal.direction(), Some(Direction::DownLeft));
        assert_eq!(
            diagonal.cells().collect::<Vec<_>>(),
            [pos(0, 3), pos(1, 2), pos(2, 1), pos(3, 0)]
        );
    }

    #[test]
    fn test_between_rejects_bent_lines() {
        assert!(Line::between(pos(0, 0), pos(1, 2)).is_none());
        assert!(Line::between(pos(5, 5), pos(2, 3)).is_none());
    }

    #[test]
    fn test_single_cell_line() {
        let line = Line::between(pos(3, 3), pos(3, 3)).unwrap();
        assert_eq!(line.direction(), None);
        assert_eq!(line.len(), 1);
        assert_eq!(line.cells().collect::<Vec<_>>(), [pos(3, 3)]);
    }

    #[test]
    fn test_from_direction_matches_between() {
        for direction in Direction::ALL {
            let start = pos(4, 4);
            let line = Line::from_direction(start, direction, 4).unwrap();
            assert_eq!(Line::between(line.start(), line.end()), Some(line));
            assert_eq!(line.cells().len(), 4);
        }
        assert!(Line::from_direction(pos(0, 0), Direction::Up, 2).is_none());
        assert!(Line::from_direction(pos(0, 0), Direction::Right, 0).is_none());
    }

    #[test]
    fn test_reversed_visits_cells_backwards() {
        let line = Line::between(pos(0, 0), pos(2, 2)).unwrap();
        let mut forward = line.cells().collect::<Vec<_>>();
        forward.reverse();
        assert_eq!(line.reversed().cells().collect::<Vec<_>>(), forward);
    }
}
