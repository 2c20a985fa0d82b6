//! Command-line interface of the `spellquest` binary.

use std::{
    fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use spellquest_game::{GameError, SpellingTest, WordSearch};
use spellquest_generator::PuzzleSeed;
use spellquest_progress::{
    DirectoryStore, HistoryFilter, KindFilter, ProfileCache, RecordOutcome, ResultRecorder,
    ResultStore as _, TestResult, WordList, WordListProvider,
};

use crate::{
    error::AppError,
    puzzle_factory::{self, PuzzleOverrides},
    render, session,
    settings::{Settings, StorageSettings},
};

#[derive(Debug, Parser)]
#[command(name = "spellquest", author, version, about)]
pub struct Cli {
    /// JSON settings file.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Directory holding word lists, results, and profiles.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Local profile cache file.
    #[arg(long, global = true, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Word list JSON file; by default the child's assigned list is used.
    #[arg(long, value_name = "FILE")]
    pub words: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PuzzleArgs {
    /// Seed (64 hex digits, or any phrase) to reproduce a puzzle.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<PuzzleSeed>,

    /// Fixed grid size.
    #[arg(long, value_name = "SIZE")]
    pub size: Option<usize>,

    /// Size the grid from the words, with this minimum.
    #[arg(long, value_name = "MIN", conflicts_with = "size")]
    pub fit: Option<usize>,

    /// Allow backwards directions as well as forward ones.
    #[arg(long)]
    pub all_directions: bool,
}

impl PuzzleArgs {
    fn overrides(&self) -> PuzzleOverrides {
        PuzzleOverrides {
            size: self.size,
            fit: self.fit,
            all_directions: self.all_directions,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a puzzle with its answer key.
    Generate {
        #[command(flatten)]
        list: ListArgs,
        /// Use this child's assigned word list.
        #[arg(long, value_name = "ID")]
        child: Option<String>,
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
    /// Play a word search.
    Play {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, value_name = "ID")]
        child: String,
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
    /// Take a spelling test.
    Spell {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, value_name = "ID")]
        child: String,
    },
    /// Show a child's progress and test history, newest first.
    History {
        #[arg(long, value_name = "ID")]
        child: String,
        /// Only show this kind of session (all, spelling, wordsearch).
        #[arg(long, value_name = "KIND", default_value_t = KindFilter::All)]
        kind: KindFilter,
        /// Only show sessions from this day on (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        since: Option<NaiveDate>,
        /// Only show sessions up to and including this day (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        until: Option<NaiveDate>,
    },
    /// Delete a child's results and reset their progress counters.
    ClearHistory {
        #[arg(long, value_name = "ID")]
        child: String,
    },
    /// Re-submit results that could not be saved earlier.
    Retry,
}

/// Everything a command needs besides its own arguments.
struct Context {
    settings: Settings,
    storage: StorageSettings,
}

impl Context {
    fn store(&self) -> DirectoryStore {
        DirectoryStore::new(&self.storage.data_dir)
    }

    fn recorder(&self) -> Result<ResultRecorder<DirectoryStore>, AppError> {
        let cache = ProfileCache::open(&self.storage.cache_file)?;
        Ok(ResultRecorder::new(self.store(), cache))
    }
}

fn read_word_list(path: &Path) -> Result<WordList, AppError> {
    let json = fs::read_to_string(path).map_err(|source| AppError::WordFile {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| AppError::WordFileFormat {
        path: path.to_owned(),
        source,
    })
}

/// Resolves the word list: an explicit file wins over the child's assignment.
fn resolve_word_list<P>(
    words: Option<&Path>,
    child_id: Option<&str>,
    provider: &P,
) -> Result<Option<WordList>, AppError>
where
    P: WordListProvider,
{
    match (words, child_id) {
        (Some(path), _) => read_word_list(path).map(Some),
        (None, Some(child_id)) => Ok(provider.select_list_for_child(child_id)?),
        (None, None) => Err(AppError::MissingWordSource),
    }
}

fn report_record<W>(outcome: &RecordOutcome, out: &mut W) -> Result<(), AppError>
where
    W: Write,
{
    if outcome.persisted {
        writeln!(out, "result saved.")?;
    } else {
        writeln!(
            out,
            "couldn't save the result right now; it is kept locally (run `spellquest retry` later)."
        )?;
    }
    Ok(())
}

/// Runs a parsed command line, reading play input from `input`.
pub fn run<R, W>(cli: Cli, input: R, out: &mut W) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    let settings = Settings::load(cli.settings.as_deref())?;
    let storage = StorageSettings {
        data_dir: cli.data_dir.unwrap_or_else(|| settings.storage.data_dir.clone()),
        cache_file: cli
            .cache
            .unwrap_or_else(|| settings.storage.cache_file.clone()),
    };
    let cx = Context { settings, storage };

    match cli.command {
        Command::Generate {
            list,
            child,
            puzzle,
        } => {
            let Some(word_list) =
                resolve_word_list(list.words.as_deref(), child.as_deref(), &cx.store())?
            else {
                writeln!(out, "{}", render::NO_WORD_LIST)?;
                return Ok(());
            };
            let generator =
                puzzle_factory::build_generator(&cx.settings.generator, puzzle.overrides())?;
            match puzzle_factory::generate_puzzle(&generator, &word_list, puzzle.seed)? {
                Some(generated) => write!(out, "{}", render::puzzle(&generated))?,
                None => writeln!(out, "{}", render::NO_PUZZLE)?,
            }
        }
        Command::Play {
            list,
            child,
            puzzle,
        } => {
            cx.store().check_child_id(&child)?;
            let Some(word_list) =
                resolve_word_list(list.words.as_deref(), Some(child.as_str()), &cx.store())?
            else {
                writeln!(out, "{}", render::NO_WORD_LIST)?;
                return Ok(());
            };
            let generator =
                puzzle_factory::build_generator(&cx.settings.generator, puzzle.overrides())?;
            let Some(generated) =
                puzzle_factory::generate_puzzle(&generator, &word_list, puzzle.seed)?
            else {
                writeln!(out, "{}", render::NO_PUZZLE)?;
                return Ok(());
            };
            writeln!(out, "{} (seed {})", word_list.name, generated.seed)?;

            let mut search = WordSearch::new(generated);
            let summary = session::run_word_search(&mut search, input, out)?;
            let mut recorder = cx.recorder()?;
            let outcome = recorder.record(TestResult::word_search(
                &child,
                &word_list,
                &summary,
                Utc::now(),
            ))?;
            report_record(&outcome, out)?;
        }
        Command::Spell { list, child } => {
            cx.store().check_child_id(&child)?;
            let Some(word_list) =
                resolve_word_list(list.words.as_deref(), Some(child.as_str()), &cx.store())?
            else {
                writeln!(out, "{}", render::NO_WORD_LIST)?;
                return Ok(());
            };
            let mut test = match SpellingTest::new(word_list.entries()) {
                Ok(test) => test,
                Err(GameError::EmptyWordList) => {
                    writeln!(out, "{}", render::EMPTY_WORD_LIST)?;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            writeln!(out, "{}", word_list.name)?;

            let summary = session::run_spelling_test(&mut test, input, out)?;
            let mut recorder = cx.recorder()?;
            let outcome = recorder.record(TestResult::spelling(
                &child,
                &word_list,
                &summary,
                Utc::now(),
            ))?;
            report_record(&outcome, out)?;
        }
        Command::History {
            child,
            kind,
            since,
            until,
        } => {
            let recorder = cx.recorder()?;
            let filter = HistoryFilter { kind, since, until };
            write!(out, "{}", render::profile(&recorder.profile(&child), &filter))?;
            let pending = recorder
                .cache()
                .pending()
                .iter()
                .filter(|result| result.child_id == child)
                .count();
            if pending > 0 {
                writeln!(out, "{pending} result(s) waiting to be saved")?;
            }
        }
        Command::ClearHistory { child } => {
            let mut recorder = cx.recorder()?;
            let report = recorder.clear_history(&child)?;
            writeln!(
                out,
                "cleared history of {child}: {} result(s) deleted, {} unsaved result(s) discarded",
                report.deleted, report.discarded_pending
            )?;
        }
        Command::Retry => {
            let mut recorder = cx.recorder()?;
            let report = recorder.retry_pending()?;
            writeln!(
                out,
                "saved {} pending result(s), {} still waiting",
                report.resubmitted, report.remaining
            )?;
            if report.dropped > 0 {
                writeln!(
                    out,
                    "{} result(s) can never be saved and were discarded",
                    report.dropped
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use spellquest_progress::{ResultStore as _, StoreError, TestKind};

    use super::*;

    fn run_with(dir: &Path, args: &[&str], input: &str) -> Result<String, AppError> {
        let data_dir = dir.join("data");
        let cache = dir.join("cache.json");
        let mut argv = vec![
            "spellquest",
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--cache",
            cache.to_str().unwrap(),
        ];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(cli, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn write_list(dir: &Path, list: &WordList) -> PathBuf {
        let path = dir.join(format!("{}.json", list.id));
        fs::write(&path, serde_json::to_string(list).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_size_conflicts_with_fit() {
        let err = Cli::try_parse_from(["spellquest", "generate", "--size", "9", "--fit", "5"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_generate_from_file_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let list = write_list(dir.path(), &WordList::new("animals", "Animals", ["cat", "dog"]));
        let args = ["generate", "--words", list.to_str().unwrap(), "--seed", "zoo"];

        let first = run_with(dir.path(), &args, "").unwrap();
        let second = run_with(dir.path(), &args, "").unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("seed: "));
        assert!(first.contains("CAT"));
        assert!(first.contains("DOG"));
    }

    #[test]
    fn test_generate_needs_a_word_source() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run_with(dir.path(), &["generate"], ""),
            Err(AppError::MissingWordSource)
        ));
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_with(dir.path(), &["play", "--child", "c1"], "").unwrap();
        assert_eq!(out.trim(), render::NO_WORD_LIST);

        let list = write_list(dir.path(), &WordList::new("symbols", "Symbols", ["!", "?"]));
        let out = run_with(
            dir.path(),
            &["play", "--child", "c1", "--words", list.to_str().unwrap()],
            "",
        )
        .unwrap();
        assert_eq!(out.trim(), render::NO_PUZZLE);
        assert_ne!(render::NO_WORD_LIST, render::NO_PUZZLE);
    }

    #[test]
    fn test_play_records_result_for_assigned_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("data"));
        store
            .put_word_list(&WordList::new("animals", "Animals", ["cat", "dog"]).assign_to("c1"))
            .unwrap();

        let out = run_with(dir.path(), &["play", "--child", "c1", "--seed", "x"], "finish\n").unwrap();
        assert!(out.starts_with("Animals (seed "));
        assert!(out.contains("score: 0/2 (0%)"));
        assert!(out.contains("result saved."));

        let profile = store.load_child("c1").unwrap().unwrap();
        assert_eq!(profile.progress.wordsearches_completed, 1);
        assert!(profile.test_history[0].kind.is_word_search());

        let out = run_with(dir.path(), &["history", "--child", "c1"], "").unwrap();
        assert!(out.contains("word searches: 1"));
        assert!(out.contains("Animals"));
    }

    #[test]
    fn test_spell_records_result() {
        let dir = tempfile::tempdir().unwrap();
        let list = write_list(
            dir.path(),
            &WordList::new("tricky", "Tricky words", ["said", "friend"]),
        );
        let out = run_with(
            dir.path(),
            &["spell", "--child", "c1", "--words", list.to_str().unwrap()],
            "said\nfriend\n",
        )
        .unwrap();
        assert!(out.contains("score: 2/2 (100%)"));

        let cache = ProfileCache::open(dir.path().join("cache.json")).unwrap();
        let profile = cache.profile("c1").unwrap();
        assert_eq!(profile.progress.completed_quests, 1);
        assert_eq!(profile.progress.accuracy, 100);
        assert!(matches!(
            profile.test_history[0].kind,
            TestKind::Spelling { .. }
        ));

        let out = run_with(dir.path(), &["retry"], "").unwrap();
        assert_eq!(out.trim(), "saved 0 pending result(s), 0 still waiting");
    }

    #[test]
    fn test_unusable_child_id_is_rejected_before_playing() {
        let dir = tempfile::tempdir().unwrap();
        let list = write_list(dir.path(), &WordList::new("animals", "Animals", ["cat", "dog"]));
        let words = list.to_str().unwrap();

        for command in ["play", "spell"] {
            let err = run_with(
                dir.path(),
                &[command, "--child", "ada smith", "--words", words],
                "finish\n",
            )
            .unwrap_err();
            assert!(matches!(err, AppError::Store(StoreError::InvalidId(_))));
        }

        let cache = ProfileCache::open(dir.path().join("cache.json")).unwrap();
        assert!(cache.pending().is_empty());
        let out = run_with(dir.path(), &["retry"], "").unwrap();
        assert_eq!(out.trim(), "saved 0 pending result(s), 0 still waiting");
    }

    #[test]
    fn test_oversized_grid_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let list = write_list(dir.path(), &WordList::new("animals", "Animals", ["cat"]));
        let err = run_with(
            dir.path(),
            &["generate", "--words", list.to_str().unwrap(), "--size", "100000"],
            "",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Generate(spellquest_generator::GenerateError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_history_filters_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("data"));
        store
            .put_word_list(&WordList::new("animals", "Animals", ["cat", "dog"]).assign_to("c1"))
            .unwrap();
        let tricky = write_list(dir.path(), &WordList::new("tricky", "Tricky words", ["said"]));

        run_with(dir.path(), &["play", "--child", "c1", "--seed", "x"], "finish\n").unwrap();
        run_with(
            dir.path(),
            &["spell", "--child", "c1", "--words", tricky.to_str().unwrap()],
            "said\n",
        )
        .unwrap();

        let out = run_with(dir.path(), &["history", "--child", "c1"], "").unwrap();
        let spelling = out.find("Tricky words").unwrap();
        let word_search = out.find("Animals").unwrap();
        assert!(spelling < word_search);

        let out = run_with(
            dir.path(),
            &["history", "--child", "c1", "--kind", "wordsearch"],
            "",
        )
        .unwrap();
        assert!(out.contains("Animals"));
        assert!(!out.contains("Tricky words"));

        let out = run_with(
            dir.path(),
            &["history", "--child", "c1", "--until", "2000-01-01"],
            "",
        )
        .unwrap();
        assert!(out.contains("no tests match"));

        let out = run_with(dir.path(), &["clear-history", "--child", "c1"], "").unwrap();
        assert!(out.contains("2 result(s) deleted"));
        assert!(fs::read_dir(dir.path().join("data").join("results"))
            .unwrap()
            .next()
            .is_none());

        let profile = store.load_child("c1").unwrap().unwrap();
        assert!(profile.test_history.is_empty());
        assert_eq!(profile.progress.completed_quests, 0);
        assert_eq!(profile.progress.accuracy, 0);

        let out = run_with(dir.path(), &["history", "--child", "c1"], "").unwrap();
        assert!(out.contains("no tests yet"));
    }

    #[test]
    fn test_history_rejects_unknown_kind() {
        let err = Cli::try_parse_from(["spellquest", "history", "--child", "c1", "--kind", "quiz"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_spell_with_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let list = write_list(dir.path(), &WordList::new("none", "Nothing", Vec::<&str>::new()));
        let out = run_with(
            dir.path(),
            &["spell", "--child", "c1", "--words", list.to_str().unwrap()],
            "",
        )
        .unwrap();
        assert_eq!(out.trim(), render::EMPTY_WORD_LIST);
    }
}
