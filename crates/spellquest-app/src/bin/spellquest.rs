//! SpellQuest terminal front end.
//!
//! Generates word-search puzzles, runs word-search and spelling sessions on
//! stdin/stdout, and records results for each child.

use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use clap::Parser as _;
use spellquest_app::cli::{self, Cli};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    log::info!(
        "starting spellquest, version={}",
        spellquest_app::version::build_version()
    );

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let result = cli::run(cli, stdin, &mut stdout);
    let _ = stdout.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
