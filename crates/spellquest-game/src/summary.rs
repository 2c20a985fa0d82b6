use std::time::Duration;

/// Returns `round(100 * score / total)`, rounding halves up.
///
/// An empty session (`total == 0`) scores 0.
///
/// # Examples
///
/// ```
/// use spellquest_game::percentage;
///
/// assert_eq!(percentage(1, 2), 50);
/// assert_eq!(percentage(2, 3), 67);
/// assert_eq!(percentage(1, 8), 13);
/// assert_eq!(percentage(0, 0), 0);
/// ```
#[must_use]
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Result of a finished word-search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of words found.
    pub score: usize,
    /// Number of words placed in the puzzle.
    pub total: usize,
    /// `round(100 * score / total)`.
    pub percentage: u32,
    /// Time from session start to finish.
    pub time_taken: Duration,
    /// Found words, in the order they were found.
    pub words_found: Vec<String>,
    /// Placed words that were not found, in placement order.
    pub words_not_found: Vec<String>,
}

impl SessionSummary {
    /// Returns the celebration earned by this result.
    #[must_use]
    pub fn celebration(&self) -> Celebration {
        Celebration::from_percentage(self.percentage)
    }
}

/// How enthusiastically a result is celebrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::IsVariant)]
pub enum Celebration {
    /// Below 50%.
    None,
    /// 50% or more.
    Pass,
    /// 70% or more.
    Good,
    /// 90% or more.
    Excellent,
}

impl Celebration {
    /// Returns the celebration tier for a percentage score.
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Excellent,
            70..90 => Self::Good,
            50..70 => Self::Pass,
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(1, 201), 0);
        assert_eq!(percentage(5, 6), 83);
    }

    #[test]
    fn test_celebration_thresholds() {
        assert_eq!(Celebration::from_percentage(100), Celebration::Excellent);
        assert_eq!(Celebration::from_percentage(90), Celebration::Excellent);
        assert_eq!(Celebration::from_percentage(89), Celebration::Good);
        assert_eq!(Celebration::from_percentage(70), Celebration::Good);
        assert_eq!(Celebration::from_percentage(69), Celebration::Pass);
        assert_eq!(Celebration::from_percentage(50), Celebration::Pass);
        assert!(Celebration::from_percentage(49).is_none());
    }
}
