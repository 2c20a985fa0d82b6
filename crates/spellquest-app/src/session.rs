//! Line-oriented drivers for interactive sessions.
//!
//! The drivers read from any [`BufRead`] and write to any [`Write`], so the
//! binary runs them on stdin/stdout and tests run them on byte buffers.
//! End of input finishes the session.

use std::io::{self, BufRead, Write};

use spellquest_game::{
    AnswerOutcome, GameError, ReleaseOutcome, SessionSummary, SpellingSummary, SpellingTest,
    WordSearch,
};

use crate::{
    action::{HELP, PlayAction},
    render,
};

/// Errors that end an interactive session.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("terminal I/O failed: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Game(GameError),
}

fn read_command<R>(input: &mut R, line: &mut String) -> io::Result<bool>
where
    R: BufRead,
{
    line.clear();
    Ok(input.read_line(line)? > 0)
}

/// Applies one action; returns `true` once the session should finish.
fn apply<W>(search: &mut WordSearch, action: PlayAction, out: &mut W) -> Result<bool, SessionError>
where
    W: Write,
{
    match action {
        PlayAction::Press(pos) => search.press(pos)?,
        PlayAction::Enter(pos) => {
            if !search.enter(pos)? {
                writeln!(out, "cells must be in a straight line from where you started")?;
            }
        }
        PlayAction::Release => report_release(search.release()?, out)?,
        PlayAction::Select { from, to } => {
            search.press(from)?;
            let entered = search.enter(to).inspect_err(|_| search.cancel_selection());
            if !entered? {
                search.cancel_selection();
                writeln!(out, "cells must be in a straight line")?;
                return Ok(false);
            }
            report_release(search.release()?, out)?;
        }
        PlayAction::Cancel => search.cancel_selection(),
        PlayAction::Show => writeln!(out, "{}", render::word_search(search))?,
        PlayAction::Help => writeln!(out, "{HELP}")?,
        PlayAction::Finish => return Ok(true),
    }
    Ok(search.is_all_found())
}

fn report_release<W>(outcome: ReleaseOutcome, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    match outcome {
        ReleaseOutcome::Found(word) => writeln!(out, "you found {word}!"),
        ReleaseOutcome::AlreadyFound(word) => writeln!(out, "{word} is already found"),
        ReleaseOutcome::Missed => writeln!(out, "no word there, keep looking"),
        ReleaseOutcome::NoSelection => writeln!(out, "nothing is selected"),
    }
}

/// Plays a word search until `finish`, end of input, or every word is found.
///
/// Invalid commands and out-of-grid cells are reported and play continues.
pub fn run_word_search<R, W>(
    search: &mut WordSearch,
    mut input: R,
    out: &mut W,
) -> Result<SessionSummary, SessionError>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", render::word_search(search))?;
    writeln!(out, "type `help` for commands")?;

    let mut line = String::new();
    while read_command(&mut input, &mut line)? {
        if line.trim().is_empty() {
            continue;
        }
        let action = match line.parse::<PlayAction>() {
            Ok(action) => action,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        let done = match apply(search, action, out) {
            Ok(done) => done,
            Err(SessionError::Game(e @ GameError::OutOfBounds { .. })) => {
                writeln!(out, "{e}")?;
                false
            }
            Err(e) => return Err(e),
        };
        if done {
            break;
        }
    }

    if search.is_all_found() {
        writeln!(out, "you found every word!")?;
    }
    let summary = search.finish()?;
    write!(out, "{}", render::session_summary(&summary))?;
    Ok(summary)
}

/// Runs a spelling test, reading one answer per line.
///
/// The word itself is never shown; the prompt gives its length and hint.
pub fn run_spelling_test<R, W>(
    test: &mut SpellingTest,
    mut input: R,
    out: &mut W,
) -> Result<SpellingSummary, SessionError>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    while let Some(entry) = test.current() {
        let (answered, total) = test.progress();
        write!(
            out,
            "word {} of {total} ({} letters)",
            answered + 1,
            entry.word.chars().count()
        )?;
        if let Some(hint) = &entry.hint {
            write!(out, ", hint: {hint}")?;
        }
        writeln!(out)?;
        out.flush()?;

        if !read_command(&mut input, &mut line)? {
            break;
        }
        match test.submit(&line)? {
            AnswerOutcome::Correct => writeln!(out, "correct!")?,
            AnswerOutcome::Incorrect { expected } => {
                writeln!(out, "not quite, it is spelled {expected}")?;
            }
        }
    }

    let summary = test.finish()?;
    write!(out, "{}", render::spelling_summary(&summary))?;
    Ok(summary)
}
