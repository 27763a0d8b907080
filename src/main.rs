//! Pentomino Tiling Solver
//!
//! Finds the distinct ways to tile a board with the twelve pentominoes,
//! each used at most once. Boards are rectangles given by size or pictures
//! read from a file. Solutions that are mirror images or half turns of one
//! another are reported once.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use pentomino::geometry::all_orientations;
use pentomino::grid::format_solution;
use pentomino::worker::{self, SolveEvent};
use pentomino::{Board, BoardFit, Catalog, Error, SolveOptions, SolveOutcome, SolveStatus, Solver};

/// Tiles a board with pentominoes and prints the distinct solutions.
#[derive(Parser)]
#[command(name = "pentomino")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for tilings of a board.
    Solve(SolveArgs),
    /// List every piece with its number of distinct orientations.
    Orientations,
    /// Show a board and whether the pieces can fill it.
    Check(BoardArgs),
}

#[derive(Args)]
struct BoardArgs {
    /// Rows of a rectangular board.
    #[arg(long, default_value_t = 6)]
    rows: usize,
    /// Columns of a rectangular board.
    #[arg(long, default_value_t = 10)]
    cols: usize,
    /// File with a picture of the board: `#` for cells, `.` for holes.
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    board: Option<PathBuf>,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    board: BoardArgs,
    /// Stop after this many distinct solutions.
    #[arg(long)]
    max_solutions: Option<usize>,
    /// Accept tilings that leave some pieces unused.
    #[arg(long)]
    allow_unused_pieces: bool,
    /// Number of solutions to print.
    #[arg(long, default_value_t = 1)]
    show: usize,
    /// Cancel the search after this many seconds.
    #[arg(long)]
    time_limit: Option<u64>,
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            board: BoardArgs {
                rows: 6,
                cols: 10,
                board: None,
            },
            max_solutions: Some(1),
            allow_unused_pieces: false,
            show: 1,
            time_limit: None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Orientations) => {
            print!("{}", format_orientations(&Catalog::pentominoes()));
            Ok(())
        }
        Some(Command::Check(args)) => run_check(&args),
        // default: find one tiling of the 6x10 rectangle
        None => run_solve(&SolveArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the board from a file or builds the requested rectangle.
fn load_board(args: &BoardArgs) -> Result<Board, Error> {
    match &args.board {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| Error::ReadBoard {
                path: path.clone(),
                source,
            })?;
            text.parse()
        }
        None => Board::rectangle(args.rows, args.cols),
    }
}

/// Solves on a worker thread while this thread shows progress and enforces the time limit.
fn run_solve(args: &SolveArgs) -> Result<(), Error> {
    let board = load_board(&args.board)?;
    let catalog = Catalog::pentominoes();

    match board.fit(&catalog) {
        BoardFit::TooSmall { cells, min } => return Err(Error::BoardTooSmall { cells, min }),
        BoardFit::ExceedsCatalog { cells, capacity } => {
            warn!("board has {cells} cells, pieces cover {capacity}");
            println!(
                "The board has {cells} cells but the pieces can fill at most {capacity}; \
                 no complete tiling exists."
            );
        }
        BoardFit::Fits => {}
    }

    let mut options = match args.max_solutions {
        Some(max) => SolveOptions::with_max_solutions(max)?,
        None => SolveOptions::unbounded(),
    };
    options.allow_unused_pieces = args.allow_unused_pieces;

    info!("solving a {}-cell board", board.len());
    let handle = worker::spawn(Solver::new(board.clone(), catalog), options);
    let deadline = args
        .time_limit
        .map(|seconds| Instant::now() + Duration::from_secs(seconds));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = loop {
        match handle.recv_timeout(Duration::from_millis(50))? {
            Some(SolveEvent::Progress(progress)) => spinner.set_message(format!(
                "{} found, {} distinct",
                progress.found, progress.distinct
            )),
            Some(SolveEvent::Finished(outcome)) => break outcome,
            None => {}
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            handle.cancel();
        }
    };
    spinner.finish_and_clear();

    print!("{}", format_report(&board, &outcome, args.show));
    println!("Time: {:.4}s", outcome.elapsed_secs());
    Ok(())
}

fn run_check(args: &BoardArgs) -> Result<(), Error> {
    let board = load_board(args)?;
    print!("{board}");
    println!("{} cells", board.len());
    match board.fit(&Catalog::pentominoes()) {
        BoardFit::Fits => println!("The pieces can fill this board."),
        BoardFit::TooSmall { min, .. } => {
            println!("Too small: at least {min} cells are needed to place one piece.")
        }
        BoardFit::ExceedsCatalog { capacity, .. } => {
            println!("Too large: the pieces fill at most {capacity} cells.")
        }
    }
    Ok(())
}

/// Lists each piece label with its orientation count.
fn format_orientations(catalog: &Catalog) -> String {
    let mut output = String::new();
    let mut total = 0;
    for (label, cells) in catalog.iter() {
        let count = all_orientations(cells).len();
        total += count;
        output.push_str(&format!("{label}: {count}\n"));
    }
    output.push_str(&format!("total: {total}\n"));
    output
}

/// Formats the first `show` solutions and a summary line.
fn format_report(board: &Board, outcome: &SolveOutcome, show: usize) -> String {
    let mut output = String::new();
    for (i, solution) in outcome.solutions.iter().take(show).enumerate() {
        output.push_str(&format!("Solution {}:\n", i + 1));
        output.push_str(&format_solution(board, solution));
        output.push('\n');
    }

    output.push_str(&format!("Found {} distinct solutions", outcome.solutions.len()));
    output.push_str(match outcome.status {
        SolveStatus::Completed => ".\n",
        SolveStatus::LimitReached => " (limit reached).\n",
        SolveStatus::Cancelled => " before the search was cancelled.\n",
    });
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentomino::CancelToken;

    #[test]
    fn test_orientations_snapshot() {
        insta::assert_snapshot!(format_orientations(&Catalog::pentominoes()), @r"
        F: 8
        I: 2
        L: 8
        N: 8
        P: 8
        T: 4
        U: 4
        V: 4
        W: 4
        X: 1
        Y: 8
        Z: 4
        total: 63
        ");
    }

    #[test]
    fn test_plus_board_report_snapshot() {
        let board: Board = ".#.\n###\n.#.\n".parse().unwrap();
        let options = SolveOptions {
            allow_unused_pieces: true,
            ..SolveOptions::unbounded()
        };
        let outcome = Solver::new(board.clone(), Catalog::pentominoes())
            .solve(&options, &CancelToken::new());

        insta::assert_snapshot!(format_report(&board, &outcome, 1), @r"
        Solution 1:
        .X.
        XXX
        .X.

        Found 1 distinct solutions.
        ");
    }

    #[test]
    fn test_3x20_report_lists_both_tilings() {
        let board = Board::rectangle(3, 20).unwrap();
        let outcome = Solver::new(board.clone(), Catalog::pentominoes())
            .solve(&SolveOptions::unbounded(), &CancelToken::new());
        let report = format_report(&board, &outcome, 5);
        assert_eq!(report.matches("Solution ").count(), 2);
        assert!(report.ends_with("Found 2 distinct solutions.\n"));
    }

    #[test]
    fn test_cancelled_report_says_so() {
        let board = Board::rectangle(6, 10).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome =
            Solver::new(board.clone(), Catalog::pentominoes()).solve(&SolveOptions::unbounded(), &cancel);
        assert_eq!(
            format_report(&board, &outcome, 1),
            "Found 0 distinct solutions before the search was cancelled.\n"
        );
    }

    #[test]
    fn test_default_board_args_are_6x10() {
        let board = load_board(&SolveArgs::default().board).unwrap();
        assert_eq!((board.height(), board.width()), (6, 10));
        assert_eq!(board.fit(&Catalog::pentominoes()), BoardFit::Fits);
    }

    #[test]
    fn test_cli_parses_solve_flags() {
        let cli = Cli::try_parse_from([
            "pentomino",
            "solve",
            "--rows",
            "3",
            "--cols",
            "20",
            "--max-solutions",
            "2",
            "--allow-unused-pieces",
        ])
        .unwrap();
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!((args.board.rows, args.board.cols), (3, 20));
        assert_eq!(args.max_solutions, Some(2));
        assert!(args.allow_unused_pieces);
        assert_eq!(args.show, 1);
    }

    #[test]
    fn test_cli_rejects_board_file_with_size() {
        assert!(Cli::try_parse_from(["pentomino", "check", "--board", "b.txt", "--rows", "3"]).is_err());
    }
}
