//! Exact-cover search over the dancing-links structure.
//!
//! Algorithm X with Knuth's minimum-size column heuristic:
//! - choose the uncovered column with the fewest live rows
//! - cover it, then try each of its rows in turn, covering the other
//!   columns of that row before recursing
//! - uncover in exactly the reverse order when backtracking
//!
//! The search is single-threaded. Cancellation is cooperative: a shared flag
//! is polled at every recursive entry and in the build loops.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::board::Board;
use crate::error::Error;
use crate::grid::Canonicalizer;
use crate::links::DancingLinks;
use crate::pieces::Catalog;
use crate::placement::{enumerate_placements, orient_catalog, PieceOrientations, Placement};

/// A complete tiling: the chosen placements in the order they were tried.
pub type Solution = Vec<Placement>;

/// Shared flag used to stop a running solve from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the solve stop as soon as possible.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Search limits and piece usage rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Stop after this many distinct solutions.
    pub max_solutions: Option<NonZeroUsize>,
    /// Allow tilings that leave some pieces unused.
    pub allow_unused_pieces: bool,
}

impl SolveOptions {
    /// No cap on the number of solutions.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps the number of distinct solutions; zero is rejected.
    pub fn with_max_solutions(max_solutions: usize) -> Result<Self, Error> {
        let max_solutions = NonZeroUsize::new(max_solutions).ok_or(Error::InvalidMaxSolutions)?;
        Ok(Self {
            max_solutions: Some(max_solutions),
            ..Self::default()
        })
    }
}

/// Solution counts reported after every exact cover found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Exact covers found so far, including symmetric duplicates.
    pub found: usize,
    /// Distinct solutions kept so far.
    pub distinct: usize,
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The whole search space was explored.
    Completed,
    /// The solution cap was reached.
    LimitReached,
    /// The cancel token fired before the search finished.
    Cancelled,
}

/// Result of a solve: distinct solutions in discovery order and timing.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solutions: Vec<Solution>,
    pub elapsed: Duration,
    pub status: SolveStatus,
}

impl SolveOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn was_cancelled(&self) -> bool {
        self.status == SolveStatus::Cancelled
    }
}

/// Tiles one board with one catalog.
///
/// Orientations are computed once on construction; every call to
/// [`solve`](Self::solve) builds a fresh link structure.
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    catalog: Catalog,
    pieces: PieceOrientations,
}

impl Solver {
    pub fn new(board: Board, catalog: Catalog) -> Self {
        let pieces = orient_catalog(&catalog);
        Self {
            board,
            catalog,
            pieces,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Finds distinct tilings without progress reporting.
    pub fn solve(&self, options: &SolveOptions, cancel: &CancelToken) -> SolveOutcome {
        self.solve_with_progress(options, cancel, |_| {})
    }

    /// Finds distinct tilings, calling `on_progress` after every exact cover.
    pub fn solve_with_progress<F>(
        &self,
        options: &SolveOptions,
        cancel: &CancelToken,
        on_progress: F,
    ) -> SolveOutcome
    where
        F: FnMut(Progress),
    {
        let start = Instant::now();
        let cancelled = |start: Instant| SolveOutcome {
            solutions: Vec::new(),
            elapsed: start.elapsed(),
            status: SolveStatus::Cancelled,
        };

        let Some(matrix) = enumerate_placements(&self.board, &self.pieces, cancel) else {
            return cancelled(start);
        };
        let Some(links) = DancingLinks::build(&matrix, options.allow_unused_pieces, cancel) else {
            return cancelled(start);
        };

        let mut context = SearchContext {
            links,
            placements: &matrix.placements,
            partial: Vec::with_capacity(matrix.piece_columns),
            canonicalizer: Canonicalizer::new(&self.board),
            solutions: Vec::new(),
            found: 0,
            max_solutions: options.max_solutions,
            cancel,
            interrupted: false,
            on_progress,
        };
        search(&mut context);

        let status = if context.interrupted {
            SolveStatus::Cancelled
        } else if context.limit_reached() {
            SolveStatus::LimitReached
        } else {
            SolveStatus::Completed
        };
        let elapsed = start.elapsed();
        info!(
            "search {:?}: {} exact covers, {} distinct, {:.4}s",
            status,
            context.found,
            context.solutions.len(),
            elapsed.as_secs_f64()
        );

        SolveOutcome {
            solutions: context.solutions,
            elapsed,
            status,
        }
    }
}

/// Mutable state threaded through the recursion.
struct SearchContext<'a, F> {
    links: DancingLinks,
    placements: &'a [Placement],
    /// Rows chosen on the current path.
    partial: Vec<usize>,
    canonicalizer: Canonicalizer,
    solutions: Vec<Solution>,
    found: usize,
    max_solutions: Option<NonZeroUsize>,
    cancel: &'a CancelToken,
    interrupted: bool,
    on_progress: F,
}

impl<F: FnMut(Progress)> SearchContext<'_, F> {
    fn limit_reached(&self) -> bool {
        self.max_solutions
            .is_some_and(|max| self.solutions.len() >= max.get())
    }

    fn accept(&mut self) {
        let solution: Solution = self
            .partial
            .iter()
            .map(|&row| self.placements[row].clone())
            .collect();
        self.found += 1;
        if self.canonicalizer.insert(&solution) {
            self.solutions.push(solution);
        }
        (self.on_progress)(Progress {
            found: self.found,
            distinct: self.solutions.len(),
        });
    }
}

fn search<F: FnMut(Progress)>(context: &mut SearchContext<'_, F>) {
    if context.interrupted || context.cancel.is_cancelled() {
        if !context.interrupted {
            debug!("search cancelled at depth {}", context.partial.len());
            context.interrupted = true;
        }
        return;
    }
    if context.limit_reached() {
        return;
    }

    let Some(column) = context.links.choose_column() else {
        context.accept();
        return;
    };

    context.links.cover(column);
    let mut row = context.links.down(column);
    while row != column {
        context.partial.push(context.links.row(row));
        let mut node = context.links.right(row);
        while node != row {
            let header = context.links.header_of(node);
            context.links.cover(header);
            node = context.links.right(node);
        }

        search(context);

        let mut node = context.links.left(row);
        while node != row {
            let header = context.links.header_of(node);
            context.links.uncover(header);
            node = context.links.left(node);
        }
        context.partial.pop();
        row = context.links.down(row);
    }
    context.links.uncover(column);
}
