//! Plain-text views of puzzles, sessions, and results.

use std::{collections::BTreeSet, fmt::Write as _};

use spellquest_core::{LetterGrid, Position, Solution};
use spellquest_game::{Celebration, SessionSummary, SpellingSummary, WordSearch};
use spellquest_generator::GeneratedPuzzle;
use spellquest_progress::{ChildProfile, HistoryFilter, TestKind, TestResult};

/// Shown when no active word list is assigned to the child.
pub const NO_WORD_LIST: &str = "No word list has been assigned yet. Ask a grown-up to set one up!";
/// Shown when none of the list's words could be placed in a grid.
pub const NO_PUZZLE: &str = "No puzzle could be generated from this word list.";
/// Shown when a spelling test is started on a list without words.
pub const EMPTY_WORD_LIST: &str = "This word list has no words yet.";

/// Renders a grid with row and column numbers.
///
/// Selected cells are bracketed and cells of found words are lowercase.
#[must_use]
pub fn grid(grid: &LetterGrid, selected: &BTreeSet<Position>, found: &BTreeSet<Position>) -> String {
    let mut out = String::from("   ");
    for col in 0..grid.size() {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for (row, letters) in grid.rows().enumerate() {
        let _ = write!(out, "{row:>3}");
        for (col, &letter) in letters.iter().enumerate() {
            let pos = Position::new(row, col);
            let letter = if found.contains(&pos) {
                letter.to_ascii_lowercase()
            } else {
                letter
            };
            if selected.contains(&pos) {
                let _ = write!(out, "[{letter}]");
            } else {
                let _ = write!(out, " {letter} ");
            }
        }
        out.push('\n');
    }
    out
}

fn found_cells(search: &WordSearch) -> BTreeSet<Position> {
    search
        .solutions()
        .iter()
        .filter(|solution| search.is_found(&solution.word))
        .filter_map(Solution::line)
        .flat_map(|line| line.cells())
        .collect()
}

/// Renders the board and word list of a running session.
#[must_use]
pub fn word_search(search: &WordSearch) -> String {
    let mut out = grid(search.grid(), &search.selected_cells(), &found_cells(search));
    out.push('\n');
    for status in search.word_status() {
        let mark = if status.found { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{mark}] {}", status.word);
    }
    let _ = write!(
        out,
        "found {} of {}",
        search.found_words().len(),
        search.placed().len()
    );
    out
}

/// Renders a generated puzzle with its seed and answer key.
#[must_use]
pub fn puzzle(puzzle: &GeneratedPuzzle) -> String {
    let mut out = format!("seed: {}\n\n", puzzle.seed);
    out.push_str(&grid(&puzzle.grid, &BTreeSet::new(), &BTreeSet::new()));
    out.push('\n');
    for solution in &puzzle.solutions {
        let direction = solution
            .line()
            .and_then(|line| line.direction())
            .map_or_else(|| "-".to_owned(), |direction| direction.to_string());
        let _ = writeln!(
            out,
            "  {:<16} {} -> {} ({direction})",
            solution.word, solution.start, solution.end
        );
    }
    if !puzzle.unplaced.is_empty() {
        let _ = writeln!(out, "\nnot placed: {}", puzzle.unplaced.join(", "));
    }
    out
}

/// Returns the celebration line for a score, if any.
#[must_use]
pub fn celebration(celebration: Celebration) -> Option<&'static str> {
    match celebration {
        Celebration::Excellent => Some("*** Amazing! You're a superstar! ***"),
        Celebration::Good => Some("** Great job! **"),
        Celebration::Pass => Some("* Well done! *"),
        Celebration::None => None,
    }
}

fn score_line(out: &mut String, score: usize, total: usize, percentage: u32, secs: u64) {
    let _ = writeln!(
        out,
        "score: {score}/{total} ({percentage}%) in {}m {:02}s",
        secs / 60,
        secs % 60
    );
}

/// Renders the end-of-session summary of a word search.
#[must_use]
pub fn session_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    score_line(
        &mut out,
        summary.score,
        summary.total,
        summary.percentage,
        summary.time_taken.as_secs(),
    );
    if !summary.words_found.is_empty() {
        let _ = writeln!(out, "found: {}", summary.words_found.join(", "));
    }
    if !summary.words_not_found.is_empty() {
        let _ = writeln!(out, "still hiding: {}", summary.words_not_found.join(", "));
    }
    if let Some(line) = celebration(summary.celebration()) {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Renders the end-of-test summary of a spelling test.
#[must_use]
pub fn spelling_summary(summary: &SpellingSummary) -> String {
    let mut out = String::new();
    score_line(
        &mut out,
        summary.score,
        summary.total,
        summary.percentage,
        summary.time_taken.as_secs(),
    );
    for mistake in &summary.words_incorrect {
        let _ = writeln!(
            out,
            "  {} (you wrote {:?})",
            mistake.word, mistake.user_input
        );
    }
    if let Some(line) = celebration(summary.celebration()) {
        let _ = writeln!(out, "{line}");
    }
    out
}

fn history_entry(out: &mut String, result: &TestResult) {
    let kind = match &result.kind {
        TestKind::WordSearch { .. } => "word search",
        TestKind::Spelling { .. } => "spelling",
    };
    let id = result.id.as_deref().unwrap_or("pending");
    let _ = writeln!(
        out,
        "  {}  {kind:<11} {:<20} {}/{} ({}%)  [{id}]",
        result.date.format("%Y-%m-%d %H:%M"),
        result.list_name,
        result.score,
        result.total,
        result.percentage
    );
}

/// Renders a child's progress totals and the sessions passing `filter`,
/// newest first.
#[must_use]
pub fn profile(profile: &ChildProfile, filter: &HistoryFilter) -> String {
    let progress = &profile.progress;
    let mut out = format!("{} ({})\n", profile.display_name, profile.id);
    let _ = writeln!(
        out,
        "  tests: {}  word searches: {}  spelling tests: {}  accuracy: {}%",
        progress.total_tests,
        progress.wordsearches_completed,
        progress.completed_quests,
        progress.accuracy
    );
    let _ = writeln!(out, "  coins: {}  gems: {}", progress.coins, progress.gems);
    if profile.test_history.is_empty() {
        out.push_str("  no tests yet\n");
        return out;
    }
    let selected = filter.select(&profile.test_history);
    if selected.is_empty() {
        out.push_str("  no tests match\n");
        return out;
    }
    out.push_str("history:\n");
    for result in selected {
        history_entry(&mut out, result);
    }
    out
}
