//! Serializable documents exchanged with stores and the local cache.
//!
//! Field names are camelCase on the wire so documents written by other
//! front ends of the same service can be read back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spellquest_core::WordEntry;
use spellquest_game::{IncorrectAnswer, SessionSummary, SpellingSummary};

/// Difficulty level of a word list or a child.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// First steps.
    #[default]
    #[display("beginner")]
    Beginner,
    /// Confident readers.
    #[display("intermediate")]
    Intermediate,
    /// Longer and less regular words.
    #[display("advanced")]
    Advanced,
}

/// One word of a [`WordList`].
///
/// In JSON a word may be written either as a bare string or as an object
/// with `word` and an optional `hint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawListWord")]
pub struct ListWord {
    /// The word as the parent typed it.
    pub word: String,
    /// Optional clue shown to the child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListWord {
    Plain(String),
    Entry {
        word: String,
        #[serde(default)]
        hint: Option<String>,
    },
}

impl From<RawListWord> for ListWord {
    fn from(raw: RawListWord) -> Self {
        match raw {
            RawListWord::Plain(word) => Self { word, hint: None },
            RawListWord::Entry { word, hint } => Self { word, hint },
        }
    }
}

impl From<&str> for ListWord {
    fn from(word: &str) -> Self {
        Self {
            word: word.to_owned(),
            hint: None,
        }
    }
}

impl From<&ListWord> for WordEntry {
    fn from(word: &ListWord) -> Self {
        let entry = WordEntry::new(word.word.clone());
        match &word.hint {
            Some(hint) => entry.with_hint(hint.clone()),
            None => entry,
        }
    }
}

/// A named list of words assigned to children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form category such as "animals".
    #[serde(default)]
    pub category: String,
    /// Difficulty level.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// The words, in the order they are asked.
    pub words: Vec<ListWord>,
    /// Ids of the children this list is assigned to.
    #[serde(default)]
    pub assigned_to: Vec<String>,
    /// Whether the list is currently offered.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl WordList {
    /// Creates an active, unassigned list.
    pub fn new<I, W>(id: impl Into<String>, name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<ListWord>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            difficulty: Difficulty::default(),
            words: words.into_iter().map(Into::into).collect(),
            assigned_to: Vec::new(),
            is_active: true,
        }
    }

    /// Assigns the list to a child.
    #[must_use]
    pub fn assign_to(mut self, child_id: impl Into<String>) -> Self {
        self.assigned_to.push(child_id.into());
        self
    }

    /// Returns whether the list is assigned to `child_id`.
    #[must_use]
    pub fn is_assigned_to(&self, child_id: &str) -> bool {
        self.assigned_to.iter().any(|id| id == child_id)
    }

    /// Returns the words as generator and session input.
    #[must_use]
    pub fn entries(&self) -> Vec<WordEntry> {
        self.words.iter().map(WordEntry::from).collect()
    }
}

/// A misspelled word in a spelling [`TestResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingMistake {
    /// The word that was asked.
    pub word: String,
    /// What the child typed.
    pub user_input: String,
}

impl From<IncorrectAnswer> for SpellingMistake {
    fn from(answer: IncorrectAnswer) -> Self {
        Self {
            word: answer.word,
            user_input: answer.user_input,
        }
    }
}

/// Activity-specific part of a [`TestResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TestKind {
    /// A word-search puzzle.
    #[serde(rename = "wordsearch", rename_all = "camelCase")]
    WordSearch {
        /// Found words, in the order they were found.
        words_found: Vec<String>,
        /// Placed words that were not found.
        words_not_found: Vec<String>,
    },
    /// A spelling test.
    #[serde(rename = "spelling", rename_all = "camelCase")]
    Spelling {
        /// Correctly spelled words.
        words_correct: Vec<String>,
        /// Misspelled words with the typed answers.
        words_incorrect: Vec<SpellingMistake>,
    },
}

/// The persisted record of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Identifier assigned by the store; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the session finished.
    pub date: DateTime<Utc>,
    /// The child who played.
    pub child_id: String,
    /// The word list played.
    pub list_id: String,
    /// Name of the word list at the time of play.
    pub list_name: String,
    /// Number of words found or spelled correctly.
    pub score: usize,
    /// Number of words in the session.
    pub total: usize,
    /// `round(100 * score / total)`.
    pub percentage: u32,
    /// Session length in milliseconds.
    #[serde(rename = "timeTaken")]
    pub time_taken_ms: u64,
    /// Difficulty of the word list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Activity-specific details.
    #[serde(flatten)]
    pub kind: TestKind,
}

impl TestResult {
    /// Builds the record of a finished word search.
    #[must_use]
    pub fn word_search(
        child_id: &str,
        list: &WordList,
        summary: &SessionSummary,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            date,
            child_id: child_id.to_owned(),
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            score: summary.score,
            total: summary.total,
            percentage: summary.percentage,
            time_taken_ms: u64::try_from(summary.time_taken.as_millis()).unwrap_or(u64::MAX),
            difficulty: Some(list.difficulty),
            kind: TestKind::WordSearch {
                words_found: summary.words_found.clone(),
                words_not_found: summary.words_not_found.clone(),
            },
        }
    }

    /// Builds the record of a finished spelling test.
    #[must_use]
    pub fn spelling(
        child_id: &str,
        list: &WordList,
        summary: &SpellingSummary,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            date,
            child_id: child_id.to_owned(),
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            score: summary.score,
            total: summary.total,
            percentage: summary.percentage,
            time_taken_ms: u64::try_from(summary.time_taken.as_millis()).unwrap_or(u64::MAX),
            difficulty: Some(list.difficulty),
            kind: TestKind::Spelling {
                words_correct: summary.words_correct.clone(),
                words_incorrect: summary
                    .words_incorrect
                    .iter()
                    .cloned()
                    .map(SpellingMistake::from)
                    .collect(),
            },
        }
    }
}

/// Running totals shown on a child's dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChildProgress {
    /// Reward coins.
    pub coins: u32,
    /// Reward gems.
    pub gems: u32,
    /// Finished spelling tests.
    pub completed_quests: u32,
    /// Finished word searches.
    pub wordsearches_completed: u32,
    /// Finished sessions of any kind.
    pub total_tests: u32,
    /// Average spelling score, 0 to 100.
    pub accuracy: u32,
}

impl ChildProgress {
    /// Folds one finished session into the totals.
    ///
    /// Spelling tests update `accuracy` as a running average weighted by
    /// the number of earlier tests, using the unrounded score of the new
    /// test and rounding the result half up.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use spellquest_progress::{ChildProgress, TestKind, TestResult};
    ///
    /// let mut progress = ChildProgress { completed_quests: 1, accuracy: 80, ..Default::default() };
    /// let result = TestResult {
    ///     id: None,
    ///     date: Utc::now(),
    ///     child_id: "c".into(),
    ///     list_id: "l".into(),
    ///     list_name: "L".into(),
    ///     score: 3,
    ///     total: 5,
    ///     percentage: 60,
    ///     time_taken_ms: 1_000,
    ///     difficulty: None,
    ///     kind: TestKind::Spelling { words_correct: vec![], words_incorrect: vec![] },
    /// };
    /// progress.record(&result);
    /// assert_eq!((progress.completed_quests, progress.accuracy), (2, 70));
    /// ```
    pub fn record(&mut self, result: &TestResult) {
        match result.kind {
            TestKind::WordSearch { .. } => {
                self.wordsearches_completed += 1;
            }
            TestKind::Spelling { .. } => {
                self.accuracy =
                    weighted_accuracy(self.accuracy, self.completed_quests, result.score, result.total);
                self.completed_quests += 1;
            }
        }
        self.total_tests += 1;
    }
}

/// `round((accuracy * count + 100 * score / total) / (count + 1))`.
fn weighted_accuracy(accuracy: u32, count: u32, score: usize, total: usize) -> u32 {
    let (accuracy, count) = (u64::from(accuracy), u64::from(count));
    // An empty test counts as 0%.
    let (score, total) = match (u64::try_from(score), u64::try_from(total)) {
        (Ok(score), Ok(total)) if total > 0 => (score, total),
        _ => (0, 1),
    };
    let numerator = accuracy * count * total + 100 * score;
    let denominator = total * (count + 1);
    u32::try_from((2 * numerator + denominator) / (2 * denominator)).unwrap_or(u32::MAX)
}

/// A child's profile with progress and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    /// Unique identifier.
    pub id: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Name shown in greetings.
    #[serde(default)]
    pub display_name: String,
    /// Preferred difficulty.
    #[serde(default, rename = "difficultyLevel")]
    pub difficulty: Difficulty,
    /// Running totals.
    #[serde(default)]
    pub progress: ChildProgress,
    /// Finished sessions, oldest first.
    #[serde(default)]
    pub test_history: Vec<TestResult>,
}

impl ChildProfile {
    /// Creates an empty profile whose names default to the id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            username: id.clone(),
            display_name: id.clone(),
            id,
            difficulty: Difficulty::default(),
            progress: ChildProgress::default(),
            test_history: Vec::new(),
        }
    }

    /// Appends a result to the history and updates the progress totals.
    pub fn apply(&mut self, result: TestResult) {
        self.progress.record(&result);
        self.test_history.push(result);
    }

    /// Empties the history and resets the session counters and accuracy.
    ///
    /// Coins and gems are kept.
    pub fn clear_history(&mut self) {
        self.test_history.clear();
        self.progress = ChildProgress {
            coins: self.progress.coins,
            gems: self.progress.gems,
            ..ChildProgress::default()
        };
    }
}
