//! Square letter grid.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Line, Position};

/// A completely filled, square grid of uppercase letters.
///
/// Cells hold `A`-`Z`, or `-` for hyphenated words. The grid is immutable
/// once built; puzzle generators assemble cells and then call
/// [`LetterGrid::from_cells`].
///
/// The text form is one row per line. Parsing ignores blank lines and
/// surrounding whitespace, so grids can be written inline in tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LetterGrid {
    size: usize,
    cells: Vec<char>,
}

/// Errors returned when building or parsing a [`LetterGrid`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The grid has no cells.
    #[display("grid is empty")]
    Empty,
    /// The number of cells is not `size * size`.
    #[display("expected {expected} cells, found {found}")]
    CellCount {
        /// Expected number of cells.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
    /// A row has a different length from the number of rows.
    #[display("row {row} has {len} cells, expected {size}")]
    NotSquare {
        /// Zero-based row index.
        row: usize,
        /// Cells in that row.
        len: usize,
        /// Required row length.
        size: usize,
    },
    /// A cell holds a character outside the grid alphabet.
    #[display("invalid cell {ch:?} at {pos}")]
    InvalidCell {
        /// Cell position.
        pos: Position,
        /// Offending character.
        ch: char,
    },
}

/// Returns whether `ch` may appear in a grid cell.
#[must_use]
pub const fn is_grid_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch == '-'
}

impl LetterGrid {
    /// Builds a grid from `size * size` cells in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError::Empty`] if `size` is zero,
    /// [`GridParseError::CellCount`] if the cell count does not match, and
    /// [`GridParseError::InvalidCell`] for characters outside `A`-`Z` and `-`.
    pub fn from_cells(size: usize, cells: Vec<char>) -> Result<Self, GridParseError> {
        if size == 0 {
            return Err(GridParseError::Empty);
        }
        let expected = size * size;
        if cells.len() != expected {
            return Err(GridParseError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        if let Some(i) = cells.iter().position(|&ch| !is_grid_char(ch)) {
            return Err(GridParseError::InvalidCell {
                pos: Position::new(i / size, i % size),
                ch: cells[i],
            });
        }
        Ok(Self { size, cells })
    }

    /// Returns the number of rows (equal to the number of columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns whether `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row() < self.size && pos.col() < self.size
    }

    /// Returns whether every cell of `line` lies inside the grid.
    #[must_use]
    pub const fn contains_line(&self, line: &Line) -> bool {
        self.contains(line.start()) && self.contains(line.end())
    }

    /// Returns the letter at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        self.contains(pos)
            .then(|| self.cells[pos.row() * self.size + pos.col()])
    }

    /// Reads the letters along `line`, or `None` if it leaves the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellquest_core::{LetterGrid, Line, Position};
    ///
    /// let grid: LetterGrid = "DOG\nXXX\nXXX".parse().unwrap();
    /// let line = Line::between(Position::new(0, 2), Position::new(0, 0)).unwrap();
    /// assert_eq!(grid.read_line(&line).as_deref(), Some("GOD"));
    /// ```
    #[must_use]
    pub fn read_line(&self, line: &Line) -> Option<String> {
        if !self.contains_line(line) {
            return None;
        }
        line.cells().map(|pos| self.get(pos)).collect()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[char]> {
        self.cells.chunks(self.size)
    }

    /// Returns an iterator over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }
}

impl Index<Position> for LetterGrid {
    type Output = char;

    fn index(&self, pos: Position) -> &Self::Output {
        assert!(self.contains(pos), "position {pos} out of bounds");
        &self.cells[pos.row() * self.size + pos.col()]
    }
}

impl Display for LetterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for LetterGrid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let size = rows.len();
        if size == 0 {
            return Err(GridParseError::Empty);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(GridParseError::NotSquare {
                    row,
                    len: cells.len(),
                    size,
                });
            }
        }

        Self::from_cells(size, rows.into_iter().flatten().collect())
    }
}
