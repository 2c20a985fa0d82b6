//! Example demonstrating word-search puzzle generation.
//!
//! This example shows how to:
//! - Configure a `PuzzleGenerator` (grid size policy and directions)
//! - Generate a puzzle from a random or fixed seed
//! - Display the grid, the solutions, and the seed
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- cat dog bird fish
//! ```
//!
//! Reproduce a puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed "friday quiz" cat dog
//! ```
//!
//! Size the grid from the words instead of using a fixed size:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --fit 10 elephant giraffe
//! ```

use std::process;

use clap::Parser;
use spellquest_core::{Direction, WordEntry};
use spellquest_generator::{
    GeneratedPuzzle, GeneratorConfig, GridSizePolicy, PuzzleGenerator, PuzzleSeed,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Words to hide in the grid.
    #[arg(required = true, value_name = "WORD")]
    words: Vec<String>,

    /// Seed (64 hex digits, or any phrase).
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Fixed grid size.
    #[arg(long, value_name = "SIZE", default_value_t = GeneratorConfig::DEFAULT_SIZE, conflicts_with = "fit")]
    size: usize,

    /// Size the grid from the words, with this minimum.
    #[arg(long, value_name = "MIN")]
    fit: Option<usize>,

    /// Allow backwards directions as well as forward ones.
    #[arg(long)]
    all_directions: bool,
}

fn main() {
    let args = Args::parse();

    let policy = match args.fit {
        Some(min) => GridSizePolicy::FitToWords { min },
        None => GridSizePolicy::Fixed(args.size),
    };
    let directions: &[Direction] = if args.all_directions {
        &Direction::ALL
    } else {
        &Direction::FORWARD
    };
    let generator =
        PuzzleGenerator::new(GeneratorConfig::default().size_policy(policy).directions(directions));
    let words = args
        .words
        .iter()
        .map(|word| WordEntry::new(word.as_str()))
        .collect::<Vec<_>>();

    let result = match args.seed {
        Some(seed) => generator.generate_with_seed(&words, seed),
        None => generator.generate(&words),
    };
    match result {
        Ok(puzzle) => print_puzzle(&puzzle),
        Err(e) => {
            eprintln!("Failed to generate puzzle: {e}");
            process::exit(1);
        }
    }
}

fn print_puzzle(puzzle: &GeneratedPuzzle) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    println!("Grid:");
    for row in puzzle.grid.rows() {
        let row = row.iter().map(char::to_string).collect::<Vec<_>>();
        println!("  {}", row.join(" "));
    }
    println!();

    println!("Solutions:");
    for solution in &puzzle.solutions {
        let direction = solution
            .line()
            .and_then(|line| line.direction())
            .map_or_else(|| "-".to_owned(), |direction| direction.to_string());
        println!(
            "  {}: {} -> {} ({direction})",
            solution.word, solution.start, solution.end
        );
    }

    if !puzzle.unplaced.is_empty() {
        println!();
        println!("Not placed:");
        for word in &puzzle.unplaced {
            println!("  {word}");
        }
    }
}
