//! Reviewing a child's past sessions.

use std::{cmp::Reverse, str::FromStr};

use chrono::NaiveDate;

use crate::{TestKind, TestResult, error::KindFilterParseError};

/// Which activities a [`HistoryFilter`] keeps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum KindFilter {
    /// Every session.
    #[default]
    #[display("all")]
    All,
    /// Spelling tests only.
    #[display("spelling")]
    Spelling,
    /// Word searches only.
    #[display("wordsearch")]
    WordSearch,
}

impl KindFilter {
    /// Returns whether a session of this kind is kept.
    #[must_use]
    pub fn matches(self, kind: &TestKind) -> bool {
        match self {
            Self::All => true,
            Self::Spelling => kind.is_spelling(),
            Self::WordSearch => kind.is_word_search(),
        }
    }
}

impl FromStr for KindFilter {
    type Err = KindFilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "spelling" => Ok(Self::Spelling),
            "wordsearch" | "word-search" => Ok(Self::WordSearch),
            _ => Err(KindFilterParseError(s.to_owned())),
        }
    }
}

/// Selects and orders sessions for review.
///
/// Date bounds are inclusive calendar days in UTC.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use spellquest_progress::{HistoryFilter, KindFilter};
///
/// let filter = HistoryFilter {
///     kind: KindFilter::Spelling,
///     since: NaiveDate::from_ymd_opt(2024, 3, 1),
///     until: None,
/// };
/// assert!(filter.select(&[]).is_empty());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Activities to keep.
    pub kind: KindFilter,
    /// First day to keep.
    pub since: Option<NaiveDate>,
    /// Last day to keep.
    pub until: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Returns whether a session passes the filter.
    #[must_use]
    pub fn matches(&self, result: &TestResult) -> bool {
        let day = result.date.date_naive();
        self.kind.matches(&result.kind)
            && self.since.is_none_or(|since| day >= since)
            && self.until.is_none_or(|until| day <= until)
    }

    /// Returns the sessions that pass the filter, newest first.
    ///
    /// Sessions finished at the same instant keep their history order.
    #[must_use]
    pub fn select<'a>(&self, history: &'a [TestResult]) -> Vec<&'a TestResult> {
        let mut selected = history
            .iter()
            .filter(|result| self.matches(result))
            .collect::<Vec<_>>();
        selected.sort_by_key(|result| Reverse(result.date));
        selected
    }
}
