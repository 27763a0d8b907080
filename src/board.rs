//! Board shapes.
//!
//! A board is an arbitrary finite set of cells, normalized so the minimum
//! row and column are zero. The order in which cells are supplied is kept:
//! it fixes the order of the cell columns in the exact-cover matrix and
//! therefore the order in which solutions are found.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::pieces::{Catalog, Cell};

/// A normalized set of board cells with a cell-to-index lookup.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Cell>,
    index: FxHashMap<Cell, usize>,
    height: usize,
    width: usize,
}

/// Whether a board's size is compatible with a catalog.
///
/// Informational only: the solver accepts any board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardFit {
    Fits,
    /// Fewer cells than the smallest piece; no solution is possible.
    TooSmall { cells: usize, min: usize },
    /// More cells than all pieces together can fill.
    ExceedsCatalog { cells: usize, capacity: usize },
}

impl Board {
    /// Builds a board from cells, shifting it so the minimum row and column
    /// are zero. Duplicate cells are dropped.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Result<Self, Error> {
        let raw: Vec<Cell> = cells.into_iter().collect();
        let (Some(min_row), Some(min_column)) = (
            raw.iter().map(|&(r, _)| r).min(),
            raw.iter().map(|&(_, c)| c).min(),
        ) else {
            return Err(Error::EmptyBoard);
        };

        let mut board_cells = Vec::with_capacity(raw.len());
        let mut index = FxHashMap::default();
        let mut height = 0;
        let mut width = 0;

        for (r, c) in raw {
            let cell = (r - min_row, c - min_column);
            if index.contains_key(&cell) {
                continue;
            }
            index.insert(cell, board_cells.len());
            board_cells.push(cell);
            height = height.max(cell.0 as usize + 1);
            width = width.max(cell.1 as usize + 1);
        }

        Ok(Self {
            cells: board_cells,
            index,
            height,
            width,
        })
    }

    /// A full `height` x `width` rectangle, cells in row-major order.
    pub fn rectangle(height: usize, width: usize) -> Result<Self, Error> {
        Self::from_cells(
            (0..height as i32).flat_map(|r| (0..width as i32).map(move |c| (r, c))),
        )
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of `cell` in board order.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Number of rows in the bounding box.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns in the bounding box.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if the board fills its whole bounding box.
    pub fn is_rectangle(&self) -> bool {
        self.len() == self.height * self.width
    }

    /// Compares the board size against what the catalog can fill.
    pub fn fit(&self, catalog: &Catalog) -> BoardFit {
        let cells = self.len();
        let min = catalog.smallest_piece().unwrap_or(0);
        let capacity = catalog.total_cells();
        if cells < min || capacity == 0 {
            BoardFit::TooSmall {
                cells,
                min: min.max(1),
            }
        } else if cells > capacity {
            BoardFit::ExceedsCatalog { cells, capacity }
        } else {
            BoardFit::Fits
        }
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses a picture of the board: `#` or `X` marks a cell, `.` or a
    /// space marks a hole.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        for (line_index, line) in text.lines().enumerate() {
            for (column_index, found) in line.chars().enumerate() {
                match found {
                    '#' | 'X' | 'x' => cells.push((line_index as i32, column_index as i32)),
                    '.' | ' ' | '\t' | '\r' => {}
                    _ => {
                        return Err(Error::UnexpectedBoardChar {
                            line: line_index + 1,
                            column: column_index + 1,
                            found,
                        })
                    }
                }
            }
        }
        Self::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height as i32 {
            for c in 0..self.width as i32 {
                let symbol = if self.contains((r, c)) { '#' } else { '.' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_normalizes_and_dedups() {
        let board = Board::from_cells([(3, 5), (4, 5), (3, 5), (4, 7)]).unwrap();
        assert_eq!(board.cells(), &[(0, 0), (1, 0), (1, 2)]);
        assert_eq!(board.height(), 2);
        assert_eq!(board.width(), 3);
        assert_eq!(board.index_of((1, 2)), Some(2));
        assert_eq!(board.index_of((0, 1)), None);
        assert!(!board.is_rectangle());
    }

    #[test]
    fn test_empty_board_is_rejected() {
        assert!(matches!(
            Board::from_cells(Vec::new()),
            Err(Error::EmptyBoard)
        ));
        assert!(matches!(Board::rectangle(0, 4), Err(Error::EmptyBoard)));
    }

    #[test]
    fn test_rectangle_is_row_major() {
        let board = Board::rectangle(2, 3).unwrap();
        assert_eq!(
            board.cells(),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert!(board.is_rectangle());
    }

    #[test]
    fn test_parse_board_picture() {
        let board: Board = ".#.\n###\n.#.\n".parse().unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(board.cells()[0], (0, 1));
        assert_eq!(board.to_string(), ".#.\n###\n.#.\n");
    }

    #[test]
    fn test_parse_reports_position_of_bad_char() {
        let error = "##\n#?".parse::<Board>().unwrap_err();
        assert!(matches!(
            error,
            Error::UnexpectedBoardChar {
                line: 2,
                column: 2,
                found: '?'
            }
        ));
    }

    #[test]
    fn test_fit_against_pentominoes() {
        let catalog = Catalog::pentominoes();
        let tiny = Board::from_cells([(0, 0), (0, 2), (2, 0), (2, 2)]).unwrap();
        assert_eq!(tiny.fit(&catalog), BoardFit::TooSmall { cells: 4, min: 5 });
        assert_eq!(Board::rectangle(6, 10).unwrap().fit(&catalog), BoardFit::Fits);
        assert_eq!(
            Board::rectangle(8, 8).unwrap().fit(&catalog),
            BoardFit::ExceedsCatalog {
                cells: 64,
                capacity: 60
            }
        );
    }
}
