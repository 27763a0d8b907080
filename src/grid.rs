//! Grid rendering and symmetry-aware deduplication of solutions.
//!
//! A solution is rendered into a flat row-major grid over the board's
//! bounding box, one piece label per cell and `.` for holes. Two solutions
//! are the same tiling if one grid maps onto the other under a symmetry of
//! the board. Only the four symmetries of a rectangle are considered, and
//! of those only the ones that map this particular board onto itself.

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::pieces::Cell;
use crate::placement::Placement;

/// Label used for cells of the bounding box that are not on the board.
pub const HOLE: char = '.';

/// Flat row-major grid of piece labels.
pub type GridKey = Vec<char>;

/// A symmetry of a rectangle, applied within an `height` x `width` box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    /// Mirror left to right.
    FlipHorizontal,
    /// Mirror top to bottom.
    FlipVertical,
    Rotate180,
}

impl Symmetry {
    pub const ALL: [Self; 4] = [
        Self::Identity,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::Rotate180,
    ];

    #[inline]
    pub fn apply(self, (row, column): Cell, height: usize, width: usize) -> Cell {
        let last_row = height as i32 - 1;
        let last_column = width as i32 - 1;
        match self {
            Self::Identity => (row, column),
            Self::FlipHorizontal => (row, last_column - column),
            Self::FlipVertical => (last_row - row, column),
            Self::Rotate180 => (last_row - row, last_column - column),
        }
    }
}

/// The rectangle symmetries that map the board onto itself.
///
/// Always contains [`Symmetry::Identity`]; contains all four for a rectangle.
pub fn board_symmetries(board: &Board) -> Vec<Symmetry> {
    Symmetry::ALL
        .into_iter()
        .filter(|&symmetry| {
            board
                .cells()
                .iter()
                .all(|&cell| board.contains(symmetry.apply(cell, board.height(), board.width())))
        })
        .collect()
}

/// Renders a solution as a flat grid over the board's bounding box.
pub fn solution_to_grid(board: &Board, solution: &[Placement]) -> GridKey {
    let width = board.width();
    let mut grid = vec![HOLE; board.height() * width];

    for placement in solution {
        for (r, c) in placement.cells() {
            if board.contains((r, c)) {
                grid[r as usize * width + c as usize] = placement.label;
            }
        }
    }

    grid
}

/// Moves every cell of `original` to its image under `symmetry`.
fn transform(original: &[char], symmetry: Symmetry, height: usize, width: usize) -> GridKey {
    let mut transformed = vec![HOLE; original.len()];
    for (source, &label) in original.iter().enumerate() {
        let cell = ((source / width) as i32, (source % width) as i32);
        let (r, c) = symmetry.apply(cell, height, width);
        transformed[r as usize * width + c as usize] = label;
    }
    transformed
}

/// Lexicographically smallest image of `grid` under the given symmetries.
pub fn canonical_key(
    grid: &[char],
    symmetries: &[Symmetry],
    height: usize,
    width: usize,
) -> GridKey {
    let mut smallest = grid.to_vec();

    for &symmetry in symmetries {
        if symmetry == Symmetry::Identity {
            continue;
        }
        let image = transform(grid, symmetry, height, width);
        if image < smallest {
            smallest = image;
        }
    }

    smallest
}

/// Keeps one representative per symmetry class of solutions.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    board: Board,
    symmetries: Vec<Symmetry>,
    seen: FxHashSet<GridKey>,
}

impl Canonicalizer {
    pub fn new(board: &Board) -> Self {
        Self {
            board: board.clone(),
            symmetries: board_symmetries(board),
            seen: FxHashSet::default(),
        }
    }

    pub fn symmetries(&self) -> &[Symmetry] {
        &self.symmetries
    }

    /// Records the solution's class; returns `true` if it was not seen before.
    pub fn insert(&mut self, solution: &[Placement]) -> bool {
        let grid = solution_to_grid(&self.board, solution);
        let key = canonical_key(
            &grid,
            &self.symmetries,
            self.board.height(),
            self.board.width(),
        );
        self.seen.insert(key)
    }

    /// Number of distinct classes recorded.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Formats a solution as one line of labels per board row.
pub fn format_solution(board: &Board, solution: &[Placement]) -> String {
    let grid = solution_to_grid(board, solution);
    let mut output = String::with_capacity(grid.len() + board.height());
    for row in grid.chunks(board.width().max(1)) {
        output.extend(row);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize_to_origin;

    fn placement(label: char, cells: &[Cell]) -> Placement {
        let anchor = (
            cells.iter().map(|&(r, _)| r).min().unwrap(),
            cells.iter().map(|&(_, c)| c).min().unwrap(),
        );
        Placement {
            label,
            orientation: normalize_to_origin(cells.to_vec()),
            anchor,
        }
    }

    /// Two L trominoes filling a 2x3 rectangle, optionally mirrored left to right.
    fn two_by_three(flipped: bool) -> Vec<Placement> {
        if flipped {
            vec![
                placement('A', &[(0, 2), (1, 2), (1, 1)]),
                placement('B', &[(0, 0), (0, 1), (1, 0)]),
            ]
        } else {
            vec![
                placement('A', &[(0, 0), (1, 0), (1, 1)]),
                placement('B', &[(0, 1), (0, 2), (1, 2)]),
            ]
        }
    }

    #[test]
    fn test_rectangle_has_all_four_symmetries() {
        let board = Board::rectangle(3, 4).unwrap();
        assert_eq!(board_symmetries(&board), Symmetry::ALL.to_vec());
    }

    #[test]
    fn test_irregular_board_keeps_only_its_own_symmetries() {
        // an L-shaped board is mapped onto itself by the identity alone
        let board: Board = "#..\n#..\n###\n".parse().unwrap();
        assert_eq!(board_symmetries(&board), vec![Symmetry::Identity]);

        // a T-shaped board is symmetric left to right
        let board: Board = "###\n.#.\n.#.\n".parse().unwrap();
        assert_eq!(
            board_symmetries(&board),
            vec![Symmetry::Identity, Symmetry::FlipHorizontal]
        );
    }

    #[test]
    fn test_solution_to_grid_marks_holes() {
        let board: Board = "##\n.#\n".parse().unwrap();
        let solution = vec![placement('Q', &[(0, 0), (0, 1), (1, 1)])];
        assert_eq!(
            solution_to_grid(&board, &solution),
            vec!['Q', 'Q', '.', 'Q']
        );
    }

    #[test]
    fn test_symmetric_images_share_a_key() {
        let board = Board::rectangle(2, 3).unwrap();
        let symmetries = board_symmetries(&board);
        let grid = solution_to_grid(&board, &two_by_three(false));
        let key = canonical_key(&grid, &symmetries, 2, 3);
        for symmetry in Symmetry::ALL {
            let image = transform(&grid, symmetry, 2, 3);
            assert_eq!(canonical_key(&image, &symmetries, 2, 3), key);
        }
        assert_eq!(key.iter().collect::<String>(), "AABABB");
    }

    #[test]
    fn test_canonicalizer_collapses_mirror_images() {
        let board = Board::rectangle(2, 3).unwrap();
        let mut canonicalizer = Canonicalizer::new(&board);
        assert!(canonicalizer.insert(&two_by_three(false)));
        assert!(!canonicalizer.insert(&two_by_three(true)));
        assert_eq!(canonicalizer.len(), 1);
    }

    #[test]
    fn test_canonicalizer_without_symmetry_keeps_both() {
        // the extra cell breaks the horizontal mirror of the 2x3 block
        let board: Board = "###.\n####\n".parse().unwrap();
        let mut canonicalizer = Canonicalizer::new(&board);
        assert_eq!(canonicalizer.symmetries(), &[Symmetry::Identity]);
        assert!(canonicalizer.insert(&two_by_three(false)));
        assert!(canonicalizer.insert(&two_by_three(true)));
    }

    #[test]
    fn test_format_solution() {
        let board = Board::rectangle(2, 3).unwrap();
        assert_eq!(format_solution(&board, &two_by_three(false)), "ABB\nAAB\n");
    }
}
