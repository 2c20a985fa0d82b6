//! Target words and normalization.

/// Shortest normalized word that can be placed; single-cell words are not supported.
pub const MIN_WORD_LEN: usize = 2;

/// A word to practise, with an optional child-facing clue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordEntry {
    /// The word as written by the parent.
    pub word: String,
    /// Optional clue shown to the child.
    pub hint: Option<String>,
}

impl WordEntry {
    /// Creates an entry without a hint.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hint: None,
        }
    }

    /// Attaches a hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Returns the normalized form of the word.
    #[must_use]
    pub fn normalized(&self, keep_hyphens: bool) -> String {
        normalize_word(&self.word, keep_hyphens)
    }
}

impl From<&str> for WordEntry {
    fn from(word: &str) -> Self {
        Self::new(word)
    }
}

/// Normalizes a word into the grid alphabet.
///
/// The word is uppercased and every character that is not `A`-`Z` is
/// removed. Hyphens survive when `keep_hyphens` is set. Accented letters
/// are dropped rather than transliterated.
///
/// # Examples
///
/// ```
/// use spellquest_core::normalize_word;
///
/// assert_eq!(normalize_word("ice-cream!", true), "ICE-CREAM");
/// assert_eq!(normalize_word("ice-cream!", false), "ICECREAM");
/// assert_eq!(normalize_word("Don't stop", true), "DONTSTOP");
/// ```
#[must_use]
pub fn normalize_word(word: &str, keep_hyphens: bool) -> String {
    word.chars()
        .flat_map(char::to_uppercase)
        .filter(|&ch| ch.is_ascii_uppercase() || (keep_hyphens && ch == '-'))
        .collect()
}
