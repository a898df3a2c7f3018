//! Polycube Dissection Solver
//!
//! Solves the built-in packing puzzles (Soma, the diabolical cube, Bedlam
//! and the double Soma box) and prints every distinct solution as plain
//! text, one line per row with the planes side by side.

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dissection::config::DEFAULT_PROGRESS_SECS;
use dissection::posture::NamedPosture;
use dissection::{Builtin, Equivalences, SolveConfig, SolveReport};

/// Exit status after a second Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

/// Finds all distinct packings of polycube puzzles.
#[derive(Parser)]
#[command(name = "dissection")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print its solutions.
    Solve {
        /// Puzzle to solve.
        #[arg(value_enum, default_value_t = Builtin::Soma)]
        puzzle: Builtin,
        /// Stop after this many distinct solutions.
        #[arg(short, long)]
        stop: Option<usize>,
        /// Print only the summary, not the solutions.
        #[arg(short, long)]
        quiet: bool,
        /// Seconds between progress lines.
        #[arg(long, default_value_t = DEFAULT_PROGRESS_SECS)]
        progress_secs: u64,
    },
    /// Show each piece's posture count and which pieces are copies or
    /// mirror images of each other.
    Pieces {
        /// Puzzle whose pieces to describe.
        #[arg(value_enum, default_value_t = Builtin::Soma)]
        puzzle: Builtin,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Solve {
        puzzle: Builtin::Soma,
        stop: None,
        quiet: false,
        progress_secs: DEFAULT_PROGRESS_SECS,
    });

    let result = match command {
        Command::Solve {
            puzzle,
            stop,
            quiet,
            progress_secs,
        } => {
            let config = SolveConfig::new()
                .with_max_solutions(stop)
                .with_progress_interval(Duration::from_secs(progress_secs));
            install_interrupt_handler(&config);
            run_solve(puzzle, &config, quiet)
        }
        Command::Pieces { puzzle } => run_pieces(puzzle),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// The first Ctrl-C cancels the search so the solutions found so far are
/// still printed. A second one exits at once.
fn install_interrupt_handler(config: &SolveConfig) {
    let handle = config.clone();
    let result = ctrlc::set_handler(move || {
        if handle.is_cancelled() {
            std::process::exit(EXIT_INTERRUPTED);
        }
        handle.cancel();
    });
    if let Err(e) = result {
        warn!(error = %e, "cannot install Ctrl-C handler");
    }
}

/// Solves one puzzle and prints the report.
fn run_solve(builtin: Builtin, config: &SolveConfig, quiet: bool) -> dissection::Result<()> {
    let puzzle = builtin.puzzle()?;
    let report = puzzle.solve(config);
    print!("{}", format_report(builtin, &report, quiet));
    Ok(())
}

/// Prints the posture counts and the copy and mirror maps of a puzzle's
/// pieces.
fn run_pieces(builtin: Builtin) -> dissection::Result<()> {
    let puzzle = builtin.puzzle()?;
    print!("{}", format_postures(puzzle.postures()));
    print!("{}", format_equivalences(puzzle.equivalences()));
    Ok(())
}

fn format_report(builtin: Builtin, report: &SolveReport, quiet: bool) -> String {
    let mut output = String::new();
    if !quiet {
        for (i, solution) in report.solutions.iter().enumerate() {
            output.push_str(&format!("Solution {}:\n{solution}\n", i + 1));
        }
    }
    let count = report.solutions.len();
    output.push_str(&format!(
        "{}: {} solution{} found, {} variants tried{}\n",
        builtin.name(),
        count,
        if count == 1 { "" } else { "s" },
        report.stats.branches,
        if report.stats.interrupted {
            " (interrupted)"
        } else if report.stats.stopped_early {
            " (stopped early)"
        } else {
            ""
        }
    ));
    output
}

fn format_postures(postures: &[NamedPosture]) -> String {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for posture in postures {
        *counts.entry(posture.name).or_default() += 1;
    }
    let mut output = String::from("Postures:\n");
    for (name, count) in counts {
        output.push_str(&format!("  {name}: {count}\n"));
    }
    output
}

fn format_equivalences(equivalences: &Equivalences) -> String {
    let mut output = String::from("Copies:\n");
    if equivalences.piece_copies.is_empty() {
        output.push_str("  none\n");
    }
    for (name, copies) in &equivalences.piece_copies {
        let copies: String = copies.iter().collect();
        output.push_str(&format!("  {name}: {copies}\n"));
    }
    output.push_str("Mirrors:\n");
    for (name, mirror) in &equivalences.piece_mirrors {
        output.push_str(&format!("  {name} -> {mirror}\n"));
    }
    output
}
