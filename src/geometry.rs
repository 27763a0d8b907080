//! Rotation and reflection utilities for flat pieces.
//!
//! A square has 8 symmetries (the dihedral group D4): four quarter turns,
//! each with or without a mirror reflection.

use crate::pieces::Cell;

/// A piece orientation: offsets after rotation and normalization, sorted.
pub type Orientation = Vec<Cell>;

/// Quarter turn: `(r, c) -> (-c, r)`.
pub fn rotate_90((row, column): Cell) -> Cell {
    (-column, row)
}

/// Mirror across the horizontal axis: `(r, c) -> (-r, c)`.
pub fn reflect((row, column): Cell) -> Cell {
    (-row, column)
}

/// Generates all distinct orientations of a piece.
///
/// Applies four quarter turns to the piece, then to its mirror image,
/// normalizing each result so the minimum row and column are zero, and
/// removes duplicates. Symmetric pieces have fewer than 8 orientations.
/// The result is sorted, so the order is deterministic.
pub fn all_orientations(piece: &[Cell]) -> Vec<Orientation> {
    let mut orientations = Vec::with_capacity(8);
    let mut shape: Vec<Cell> = piece.to_vec();

    for _ in 0..2 {
        let mut turned = shape.clone();
        for _ in 0..4 {
            orientations.push(normalize_to_origin(turned.clone()));
            turned = turned.into_iter().map(rotate_90).collect();
        }
        shape = shape.into_iter().map(reflect).collect();
    }

    // remove duplicate orientations (symmetric pieces produce duplicates)
    orientations.sort();
    orientations.dedup();
    orientations
}

/// Translates cells so the minimum row and column are both zero, then sorts them.
///
/// Two orientations that differ only by translation or cell order compare equal
/// after normalization.
pub fn normalize_to_origin(mut cells: Vec<Cell>) -> Vec<Cell> {
    let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_column = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);

    for (r, c) in &mut cells {
        *r -= min_row;
        *c -= min_column;
    }

    cells.sort_unstable();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PENTOMINOES;

    #[test]
    fn test_pentomino_orientation_counts() {
        let counts: Vec<(char, usize)> = PENTOMINOES
            .iter()
            .map(|&(label, cells)| (label, all_orientations(cells).len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ('F', 8),
                ('I', 2),
                ('L', 8),
                ('N', 8),
                ('P', 8),
                ('T', 4),
                ('U', 4),
                ('V', 4),
                ('W', 4),
                ('X', 1),
                ('Y', 8),
                ('Z', 4),
            ]
        );
    }

    #[test]
    fn test_orientations_closed_under_rotation_and_reflection() {
        for &(label, cells) in PENTOMINOES {
            let orientations = all_orientations(cells);
            assert!((1..=8).contains(&orientations.len()));
            for orientation in &orientations {
                let turned = normalize_to_origin(orientation.iter().map(|&c| rotate_90(c)).collect());
                assert!(
                    orientations.contains(&turned),
                    "piece {label}: rotation of {orientation:?} missing"
                );
                let mirrored = normalize_to_origin(orientation.iter().map(|&c| reflect(c)).collect());
                assert!(
                    orientations.contains(&mirrored),
                    "piece {label}: reflection of {orientation:?} missing"
                );
            }
        }
    }

    #[test]
    fn test_orientations_are_normalized() {
        for &(_, cells) in PENTOMINOES {
            for orientation in all_orientations(cells) {
                assert_eq!(orientation.iter().map(|&(r, _)| r).min(), Some(0));
                assert_eq!(orientation.iter().map(|&(_, c)| c).min(), Some(0));
                assert!(orientation.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }

    #[test]
    fn test_empty_piece_has_single_empty_orientation() {
        assert_eq!(all_orientations(&[]), vec![Vec::<Cell>::new()]);
    }
}
