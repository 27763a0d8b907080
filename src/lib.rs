//! Pentomino Tiling Solver Library
//!
//! Enumerates the distinct ways to tile a board with a catalog of pieces,
//! each used at most once, by exact cover with dancing links.

pub mod board;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod links;
pub mod pieces;
pub mod placement;
pub mod solver;
pub mod worker;

pub use board::{Board, BoardFit};
pub use error::Error;
pub use pieces::{Catalog, Cell, PieceShape};
pub use placement::Placement;
pub use solver::{
    CancelToken, Progress, Solution, SolveOptions, SolveOutcome, SolveStatus, Solver,
};
