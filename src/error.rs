//! Error type shared by the library and the command line.

use std::path::PathBuf;

/// Errors raised while preparing a solve.
///
/// The search itself never fails: cancellation and an empty result are
/// ordinary outcomes reported through [`SolveOutcome`](crate::solver::SolveOutcome).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// A board must contain at least one cell.
    #[display("board has no cells")]
    EmptyBoard,
    /// A board description contained a character other than a cell or a hole.
    #[display("unexpected character {found:?} in board at line {line}, column {column}")]
    UnexpectedBoardChar {
        line: usize,
        column: usize,
        found: char,
    },
    /// The solution cap must be a positive integer.
    #[display("maximum solution count must be a positive integer")]
    InvalidMaxSolutions,
    /// The board cannot hold even the smallest piece.
    #[display("board has {cells} cells but the smallest piece needs {min}")]
    BoardTooSmall { cells: usize, min: usize },
    /// Reading a board description from disk failed.
    #[display("failed to read board file {}", path.display())]
    ReadBoard {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The background solve thread went away without reporting a result.
    #[display("solver thread disconnected")]
    WorkerDisconnected,
}
