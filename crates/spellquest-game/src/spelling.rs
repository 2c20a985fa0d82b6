use std::time::{Duration, Instant};

use spellquest_core::WordEntry;

use crate::{Celebration, GameError, percentage};

/// A misspelled answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncorrectAnswer {
    /// The word that was asked.
    pub word: String,
    /// What the child typed.
    pub user_input: String,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum AnswerOutcome {
    /// The answer matched the word.
    Correct,
    /// The answer did not match; `expected` is the correct spelling.
    Incorrect {
        /// The word as written in the list.
        expected: String,
    },
}

/// Result of a finished spelling test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingSummary {
    /// Number of correctly spelled words.
    pub score: usize,
    /// Number of words in the list.
    pub total: usize,
    /// `round(100 * score / total)`.
    pub percentage: u32,
    /// Time from start to finish.
    pub time_taken: Duration,
    /// Correctly spelled words, in the order asked.
    pub words_correct: Vec<String>,
    /// Misspelled words with the typed answers.
    pub words_incorrect: Vec<IncorrectAnswer>,
}

impl SpellingSummary {
    /// Returns the celebration earned by this result.
    #[must_use]
    pub fn celebration(&self) -> Celebration {
        Celebration::from_percentage(self.percentage)
    }
}

/// A spelling test session.
///
/// Words are asked in list order. Answers are compared with the word
/// ignoring case and surrounding whitespace. Words left unanswered when the
/// test is finished early count as not correct.
///
/// # Example
///
/// ```
/// use spellquest_core::WordEntry;
/// use spellquest_game::{AnswerOutcome, SpellingTest};
///
/// let mut test = SpellingTest::new(vec![WordEntry::new("said"), WordEntry::new("because")]).unwrap();
/// assert_eq!(test.submit("Said").unwrap(), AnswerOutcome::Correct);
/// assert!(test.submit("becuase").unwrap().is_incorrect());
/// assert!(test.is_finished());
///
/// let summary = test.finish().unwrap();
/// assert_eq!((summary.score, summary.total, summary.percentage), (1, 2, 50));
/// ```
#[derive(Debug, Clone)]
pub struct SpellingTest {
    words: Vec<WordEntry>,
    next: usize,
    words_correct: Vec<String>,
    words_incorrect: Vec<IncorrectAnswer>,
    completed: bool,
    started_at: Instant,
}

impl SpellingTest {
    /// Starts a test now.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyWordList`] if `words` is empty.
    pub fn new(words: Vec<WordEntry>) -> Result<Self, GameError> {
        Self::with_start_time(words, Instant::now())
    }

    /// Starts a test with an explicit start time.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyWordList`] if `words` is empty.
    pub fn with_start_time(words: Vec<WordEntry>, started_at: Instant) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }
        Ok(Self {
            words,
            next: 0,
            words_correct: Vec::new(),
            words_incorrect: Vec::new(),
            completed: false,
            started_at,
        })
    }

    /// Returns the word currently being asked, or `None` when all are answered.
    #[must_use]
    pub fn current(&self) -> Option<&WordEntry> {
        self.words.get(self.next)
    }

    /// Returns the number of answered words and the total.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.next, self.words.len())
    }

    /// Returns the number of correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.words_correct.len()
    }

    /// Returns whether every word has been answered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.words.len()
    }

    /// Checks `input` against the current word and moves to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] if every word has already been
    /// answered or the test was finished.
    pub fn submit(&mut self, input: &str) -> Result<AnswerOutcome, GameError> {
        if self.completed {
            return Err(GameError::SessionCompleted);
        }
        let Some(entry) = self.words.get(self.next) else {
            return Err(GameError::SessionCompleted);
        };
        self.next += 1;

        let answer = input.trim();
        if answer.to_lowercase() == entry.word.trim().to_lowercase() {
            self.words_correct.push(entry.word.clone());
            return Ok(AnswerOutcome::Correct);
        }
        log::debug!("misspelled {:?} as {answer:?}", entry.word);
        self.words_incorrect.push(IncorrectAnswer {
            word: entry.word.clone(),
            user_input: answer.to_owned(),
        });
        Ok(AnswerOutcome::Incorrect {
            expected: entry.word.clone(),
        })
    }

    /// Finishes the test now.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] if already finished.
    pub fn finish(&mut self) -> Result<SpellingSummary, GameError> {
        self.finish_at(Instant::now())
    }

    /// Finishes the test at `now` and returns the summary.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionCompleted`] if already finished.
    pub fn finish_at(&mut self, now: Instant) -> Result<SpellingSummary, GameError> {
        if self.completed {
            return Err(GameError::SessionCompleted);
        }
        self.completed = true;

        let score = self.words_correct.len();
        let total = self.words.len();
        let summary = SpellingSummary {
            score,
            total,
            percentage: percentage(score, total),
            time_taken: now.saturating_duration_since(self.started_at),
            words_correct: self.words_correct.clone(),
            words_incorrect: self.words_incorrect.clone(),
        };
        log::info!(
            "spelling test finished: {score}/{total} ({}%)",
            summary.percentage
        );
        Ok(summary)
    }
}
