use spellquest_core::Direction;

/// How the side length of the grid is chosen.
///
/// Whatever the policy, the final size is never smaller than the longest
/// normalized word, so every word has room to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSizePolicy {
    /// A constant side length, raised to the longest word if needed.
    Fixed(usize),
    /// `max(longest word, ceil(sqrt(total letters)), min)`.
    FitToWords {
        /// Lower bound on the side length.
        min: usize,
    },
}

impl Default for GridSizePolicy {
    fn default() -> Self {
        Self::Fixed(GeneratorConfig::DEFAULT_SIZE)
    }
}

impl GridSizePolicy {
    /// Returns the side length for words of the given normalized lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellquest_generator::GridSizePolicy;
    ///
    /// assert_eq!(GridSizePolicy::Fixed(15).size_for([3, 3]), 15);
    /// assert_eq!(GridSizePolicy::Fixed(5).size_for([8]), 8);
    /// assert_eq!(GridSizePolicy::FitToWords { min: 10 }.size_for([3, 3]), 10);
    /// assert_eq!(GridSizePolicy::FitToWords { min: 4 }.size_for([9; 20]), 14);
    /// ```
    #[must_use]
    pub fn size_for<I>(self, word_lens: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let (longest, total) = word_lens
            .into_iter()
            .fold((0, 0), |(longest, total), len| (longest.max(len), total + len));
        let size = match self {
            Self::Fixed(size) => size,
            Self::FitToWords { min } => ceil_sqrt(total).max(min),
        };
        size.max(longest).max(1)
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let root = n.isqrt();
    if root * root == n { root } else { root + 1 }
}

/// Settings for [`PuzzleGenerator`](crate::PuzzleGenerator).
///
/// The defaults are a 15×15 grid, the four forward-reading directions,
/// 100 placement attempts per word, and hyphens kept as grid characters.
///
/// # Example
///
/// ```
/// use spellquest_core::Direction;
/// use spellquest_generator::{GeneratorConfig, GridSizePolicy};
///
/// let config = GeneratorConfig::default()
///     .size_policy(GridSizePolicy::FitToWords { min: 10 })
///     .directions(&[Direction::Right, Direction::DownRight, Direction::UpRight]);
/// assert_eq!(config.allowed_directions().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    size_policy: GridSizePolicy,
    directions: Vec<Direction>,
    max_attempts: usize,
    keep_hyphens: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size_policy: GridSizePolicy::default(),
            directions: Direction::FORWARD.to_vec(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            keep_hyphens: true,
        }
    }
}

impl GeneratorConfig {
    /// Default side length for [`GridSizePolicy::Fixed`].
    pub const DEFAULT_SIZE: usize = 15;
    /// Largest side length a generator will build.
    pub const MAX_SIZE: usize = 100;
    /// Default number of placement attempts per word.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

    /// Sets the grid size policy.
    #[must_use]
    pub fn size_policy(mut self, policy: GridSizePolicy) -> Self {
        self.size_policy = policy;
        self
    }

    /// Sets the allowed placement directions.
    ///
    /// Duplicates are removed; an empty set makes generation fail with
    /// [`GenerateError::NoDirections`](crate::GenerateError::NoDirections).
    #[must_use]
    pub fn directions(mut self, directions: &[Direction]) -> Self {
        let mut unique = Vec::with_capacity(directions.len());
        for &direction in directions {
            if !unique.contains(&direction) {
                unique.push(direction);
            }
        }
        self.directions = unique;
        self
    }

    /// Sets the number of random placement attempts per word.
    #[must_use]
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets whether hyphens are kept as grid characters.
    #[must_use]
    pub fn keep_hyphens(mut self, keep: bool) -> Self {
        self.keep_hyphens = keep;
        self
    }

    /// Returns the grid size policy.
    #[must_use]
    pub fn grid_size_policy(&self) -> GridSizePolicy {
        self.size_policy
    }

    /// Returns the allowed placement directions.
    #[must_use]
    pub fn allowed_directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Returns the number of placement attempts per word.
    #[must_use]
    pub fn attempts_per_word(&self) -> usize {
        self.max_attempts
    }

    /// Returns whether hyphens are kept as grid characters.
    #[must_use]
    pub fn keeps_hyphens(&self) -> bool {
        self.keep_hyphens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
    }

    #[test]
    fn test_size_never_below_longest_word() {
        for policy in [GridSizePolicy::Fixed(3), GridSizePolicy::FitToWords { min: 2 }] {
            assert!(policy.size_for([12, 2]) >= 12);
        }
        assert_eq!(GridSizePolicy::Fixed(0).size_for([]), 1);
    }

    #[test]
    fn test_directions_are_deduplicated() {
        let config =
            GeneratorConfig::default().directions(&[Direction::Right, Direction::Right, Direction::Down]);
        assert_eq!(config.allowed_directions(), [Direction::Right, Direction::Down]);
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.grid_size_policy(), GridSizePolicy::Fixed(15));
        assert_eq!(config.allowed_directions(), Direction::FORWARD);
        assert_eq!(config.attempts_per_word(), 100);
        assert!(config.keeps_hyphens());
    }
}
