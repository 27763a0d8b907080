//! Candidate placements and the exact-cover matrix they form.
//!
//! Columns are the piece labels (in sorted order) followed by the board
//! cells (in board order). Each placement contributes one row with a 1 in
//! its piece column and a 1 in every board cell it covers. Rows are stored
//! sparsely as sorted column indices.

use log::debug;

use crate::board::Board;
use crate::geometry::{all_orientations, Orientation};
use crate::pieces::{Catalog, Cell};
use crate::solver::CancelToken;

/// All distinct orientations of every catalog piece, in label order.
pub type PieceOrientations = Vec<(char, Vec<Orientation>)>;

/// One piece orientation translated by `anchor`; every covered cell is on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    pub label: char,
    pub orientation: Orientation,
    pub anchor: Cell,
}

impl Placement {
    /// Absolute board cells covered by this placement.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (anchor_row, anchor_column) = self.anchor;
        self.orientation
            .iter()
            .map(move |&(r, c)| (anchor_row + r, anchor_column + c))
    }
}

/// A matrix column: a piece that must be used or a cell that must be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnName {
    Piece(char),
    Cell(Cell),
}

/// The sparse 0/1 matrix handed to the link structure.
#[derive(Debug, Clone)]
pub struct ExactCoverMatrix {
    pub columns: Vec<ColumnName>,
    /// Number of leading piece columns.
    pub piece_columns: usize,
    /// Sorted column indices of the 1s in each row.
    pub rows: Vec<Vec<usize>>,
    /// The placement described by each row.
    pub placements: Vec<Placement>,
}

/// Computes the orientations of every catalog piece.
pub fn orient_catalog(catalog: &Catalog) -> PieceOrientations {
    catalog
        .iter()
        .map(|(label, cells)| (label, all_orientations(cells)))
        .collect()
}

/// Enumerates every placement that lies entirely on the board.
///
/// Returns `None` if `cancel` fires before enumeration finishes, which is
/// distinct from a completed matrix with no rows.
pub fn enumerate_placements(
    board: &Board,
    pieces: &PieceOrientations,
    cancel: &CancelToken,
) -> Option<ExactCoverMatrix> {
    let piece_columns = pieces.len();
    let columns: Vec<ColumnName> = pieces
        .iter()
        .map(|&(label, _)| ColumnName::Piece(label))
        .chain(board.cells().iter().map(|&cell| ColumnName::Cell(cell)))
        .collect();

    let mut rows = Vec::new();
    let mut placements = Vec::new();

    for (piece_column, (label, orientations)) in pieces.iter().enumerate() {
        for orientation in orientations {
            // the first offset is the orientation's top-left cell, and it
            // must land on the board, so each placement is tried exactly once
            let Some(&(first_row, first_column)) = orientation.first() else {
                continue;
            };

            for &(r, c) in board.cells() {
                if cancel.is_cancelled() {
                    debug!("placement enumeration cancelled after {} rows", rows.len());
                    return None;
                }

                let placement = Placement {
                    label: *label,
                    orientation: orientation.clone(),
                    anchor: (r - first_row, c - first_column),
                };
                let covered: Option<Vec<usize>> = placement
                    .cells()
                    .map(|cell| board.index_of(cell).map(|index| piece_columns + index))
                    .collect();
                let Some(mut row) = covered else {
                    continue;
                };

                row.push(piece_column);
                row.sort_unstable();
                rows.push(row);
                placements.push(placement);
            }
        }
    }

    debug!(
        "enumerated {} placements over {} columns",
        rows.len(),
        columns.len()
    );

    Some(ExactCoverMatrix {
        columns,
        piece_columns,
        rows,
        placements,
    })
}
