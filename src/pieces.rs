//! Piece definitions and coordinate types.
//!
//! Each piece is defined as a set of cells in 2D space given as
//! `(row, column)` offsets for one fixed orientation.

use std::collections::BTreeMap;

/// A 2D coordinate `(row, column)` of a board cell or a piece offset.
pub type Cell = (i32, i32);

/// A labelled piece shape in one fixed orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    pub label: char,
    pub cells: Vec<Cell>,
}

/// The set of pieces available to a tiling, each usable at most once.
///
/// Labels are kept in sorted order, which fixes the order of the piece
/// columns in the exact-cover matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pieces: BTreeMap<char, Vec<Cell>>,
}

/// The twelve free pentominoes.
pub const PENTOMINOES: &[(char, &[Cell])] = &[
    ('F', &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)]),
    ('I', &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    ('L', &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)]),
    ('N', &[(0, 1), (1, 1), (2, 0), (2, 1), (3, 0)]),
    ('P', &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]),
    ('T', &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)]),
    ('U', &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]),
    ('V', &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]),
    ('W', &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]),
    ('X', &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]),
    ('Y', &[(0, 1), (1, 0), (1, 1), (2, 1), (3, 1)]),
    ('Z', &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]),
];

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog of twelve pentominoes.
    pub fn pentominoes() -> Self {
        PENTOMINOES
            .iter()
            .map(|&(label, cells)| PieceShape {
                label,
                cells: cells.to_vec(),
            })
            .collect()
    }

    /// Adds a piece, replacing any piece with the same label.
    pub fn insert(&mut self, piece: PieceShape) {
        self.pieces.insert(piece.label, piece.cells);
    }

    /// Returns the offsets of the piece with the given label.
    pub fn get(&self, label: char) -> Option<&[Cell]> {
        self.pieces.get(&label).map(Vec::as_slice)
    }

    /// Piece labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.pieces.keys().copied()
    }

    /// Pieces as `(label, offsets)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[Cell])> + '_ {
        self.pieces
            .iter()
            .map(|(&label, cells)| (label, cells.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total number of cells covered if every piece is placed.
    pub fn total_cells(&self) -> usize {
        self.pieces.values().map(Vec::len).sum()
    }

    /// Size of the smallest piece, or `None` for an empty catalog.
    pub fn smallest_piece(&self) -> Option<usize> {
        self.pieces.values().map(Vec::len).min()
    }
}

impl FromIterator<PieceShape> for Catalog {
    fn from_iter<T: IntoIterator<Item = PieceShape>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for piece in iter {
            catalog.insert(piece);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_twelve_pentominoes() {
        let catalog = Catalog::pentominoes();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.total_cells(), 60);
        assert_eq!(catalog.smallest_piece(), Some(5));
        let labels: String = catalog.labels().collect();
        assert_eq!(labels, "FILNPTUVWXYZ");
    }

    #[test]
    fn test_insert_replaces_same_label() {
        let mut catalog = Catalog::new();
        catalog.insert(PieceShape {
            label: 'A',
            cells: vec![(0, 0)],
        });
        catalog.insert(PieceShape {
            label: 'A',
            cells: vec![(0, 0), (0, 1)],
        });
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get('A'), Some(&[(0, 0), (0, 1)][..]));
    }
}
