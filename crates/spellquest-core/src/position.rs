//! Board coordinates and writing directions.

use std::fmt::{self, Display};

/// A cell position on the board, addressed by row and column (both 0-based).
///
/// Positions display as `"row-col"`, the cell key used by renderers.
///
/// # Examples
///
/// ```
/// use spellquest_core::Position;
///
/// let pos = Position::new(3, 7);
/// assert_eq!(pos.to_string(), "3-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row (0-based, top to bottom).
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column (0-based, left to right).
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the position `distance` steps away in `direction`.
    ///
    /// Returns `None` if the result would have a negative coordinate.
    /// The upper bound is not checked; that depends on the grid size.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellquest_core::{Direction, Position};
    ///
    /// let pos = Position::new(4, 1);
    /// assert_eq!(pos.step(Direction::UpRight, 3), Some(Position::new(1, 4)));
    /// assert_eq!(pos.step(Direction::Up, 5), None);
    /// ```
    #[must_use]
    pub fn step(self, direction: Direction, distance: usize) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let row = offset(self.row, d_row, distance)?;
        let col = offset(self.col, d_col, distance)?;
        Some(Self { row, col })
    }
}

fn offset(base: usize, delta: isize, distance: usize) -> Option<usize> {
    match delta {
        0 => Some(base),
        1 => base.checked_add(distance),
        -1 => base.checked_sub(distance),
        _ => unreachable!("direction deltas are unit steps"),
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// One of the eight straight writing directions on the board.
///
/// Each direction is a unit `(row, column)` delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Direction {
    /// Left to right along a row, `(0, 1)`.
    #[display("right")]
    Right,
    /// Top to bottom along a column, `(1, 0)`.
    #[display("down")]
    Down,
    /// Diagonally towards the bottom right, `(1, 1)`.
    #[display("down-right")]
    DownRight,
    /// Diagonally towards the top right, `(-1, 1)`.
    #[display("up-right")]
    UpRight,
    /// Right to left along a row, `(0, -1)`.
    #[display("left")]
    Left,
    /// Bottom to top along a column, `(-1, 0)`.
    #[display("up")]
    Up,
    /// Diagonally towards the top left, `(-1, -1)`.
    #[display("up-left")]
    UpLeft,
    /// Diagonally towards the bottom left, `(1, -1)`.
    #[display("down-left")]
    DownLeft,
}

impl Direction {
    /// All eight directions; the four forward-reading ones come first.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::Down,
        Self::DownRight,
        Self::UpRight,
        Self::Left,
        Self::Up,
        Self::UpLeft,
        Self::DownLeft,
    ];

    /// Directions that read left-to-right or top-to-bottom.
    pub const FORWARD: [Self; 4] = [Self::Right, Self::Down, Self::DownRight, Self::UpRight];

    /// Returns the `(row, column)` unit delta.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
            Self::UpRight => (-1, 1),
            Self::Left => (0, -1),
            Self::Up => (-1, 0),
            Self::UpLeft => (-1, -1),
            Self::DownLeft => (1, -1),
        }
    }

    /// Returns the direction for a unit delta, if it is one.
    #[must_use]
    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.delta() == (d_row, d_col))
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
            Self::UpRight => Self::DownLeft,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::UpLeft => Self::DownRight,
            Self::DownLeft => Self::UpRight,
        }
    }

    /// Parses a direction from its display name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.to_string().eq_ignore_ascii_case(name.trim()))
    }
}
