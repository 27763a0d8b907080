//! Toroidal doubly-linked representation of an exact-cover matrix.
//!
//! All nodes live in one arena and refer to their neighbours by index.
//! Index 0 is the root, indices `1..=columns` are the column headers and
//! the remaining nodes are the 1s of the matrix, one per (row, column)
//! incidence. Every node sits in two rings: the horizontal ring of its row
//! and the vertical ring of its column, whose header acts as sentinel.
//!
//! Invariant: for every header, `size` equals the number of nodes reachable
//! in its vertical ring. `cover` and `uncover` are exact inverses when
//! applied in LIFO order.

use log::debug;

use crate::placement::ExactCoverMatrix;
use crate::solver::CancelToken;

/// Arena index of the root header.
pub const ROOT: usize = 0;

/// Row id stored in header nodes.
const NO_ROW: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header of the column this node belongs to (itself for headers).
    header: usize,
    /// Matrix row this node belongs to.
    row: usize,
}

impl Node {
    const fn header(index: usize) -> Self {
        Self {
            left: index,
            right: index,
            up: index,
            down: index,
            header: index,
            row: NO_ROW,
        }
    }
}

/// Dancing-links structure built fresh for each solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DancingLinks {
    nodes: Vec<Node>,
    /// Live node count per header, indexed by header node index.
    sizes: Vec<usize>,
}

impl DancingLinks {
    /// Links the matrix into rings.
    ///
    /// With `optional_pieces` set, the piece columns stay out of the root
    /// ring: they are still covered when a row using them is chosen, so
    /// each piece is placed at most once, but the search does not require
    /// them to be covered.
    ///
    /// Returns `None` if `cancel` fires while rows are being linked.
    pub fn build(
        matrix: &ExactCoverMatrix,
        optional_pieces: bool,
        cancel: &CancelToken,
    ) -> Option<Self> {
        let column_count = matrix.columns.len();
        let node_count = 1 + column_count + matrix.rows.iter().map(Vec::len).sum::<usize>();

        let mut nodes = Vec::with_capacity(node_count);
        nodes.push(Node::header(ROOT));
        nodes.extend((1..=column_count).map(Node::header));
        let mut links = Self {
            nodes,
            sizes: vec![0; column_count + 1],
        };

        for column in 0..column_count {
            if optional_pieces && column < matrix.piece_columns {
                continue;
            }
            links.append_header(Self::header(column));
        }

        for (row_index, row) in matrix.rows.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!("link construction cancelled at row {row_index}");
                return None;
            }
            links.append_row(row_index, row);
        }

        debug!(
            "linked {} nodes across {} columns",
            links.nodes.len() - column_count - 1,
            column_count
        );
        Some(links)
    }

    /// Arena index of the header for matrix column `column`.
    #[inline]
    pub const fn header(column: usize) -> usize {
        column + 1
    }

    fn append_header(&mut self, header: usize) {
        let last = self.nodes[ROOT].left;
        self.nodes[header].left = last;
        self.nodes[header].right = ROOT;
        self.nodes[last].right = header;
        self.nodes[ROOT].left = header;
    }

    fn append_row(&mut self, row_index: usize, row: &[usize]) {
        let mut first: Option<usize> = None;

        for &column in row {
            let header = Self::header(column);
            let id = self.nodes.len();
            let up = self.nodes[header].up;
            let (left, right) = match first {
                Some(first) => (self.nodes[first].left, first),
                None => (id, id),
            };

            self.nodes.push(Node {
                left,
                right,
                up,
                down: header,
                header,
                row: row_index,
            });

            // vertical: append at the bottom of the column
            self.nodes[up].down = id;
            self.nodes[header].up = id;
            self.sizes[header] += 1;

            // horizontal: append at the end of the row
            match first {
                Some(first) => {
                    self.nodes[left].right = id;
                    self.nodes[first].left = id;
                }
                None => first = Some(id),
            }
        }
    }

    /// True when no required column remains uncovered.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Picks the uncovered required column with the fewest live nodes.
    ///
    /// Ties go to the first column in ring order. Returns `None` when every
    /// required column is covered.
    pub fn choose_column(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut column = self.nodes[ROOT].right;
        while column != ROOT {
            if best.map_or(true, |best| self.sizes[column] < self.sizes[best]) {
                best = Some(column);
            }
            column = self.nodes[column].right;
        }
        best
    }

    #[inline]
    pub fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    #[inline]
    pub fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    #[inline]
    pub fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// Header of the column containing `node`.
    #[inline]
    pub fn header_of(&self, node: usize) -> usize {
        self.nodes[node].header
    }

    /// Matrix row of a non-header node.
    #[inline]
    pub fn row(&self, node: usize) -> usize {
        self.nodes[node].row
    }

    /// Live node count of the column with header `header`.
    #[inline]
    pub fn size(&self, header: usize) -> usize {
        self.sizes[header]
    }

    /// Removes `header` from the header ring and every row that uses it from
    /// the other columns. The column's own vertical ring is left intact.
    pub fn cover(&mut self, header: usize) {
        let Node { left, right, .. } = self.nodes[header];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[header].down;
        while i != header {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node {
                    up,
                    down,
                    header: column,
                    ..
                } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Restores what [`cover`](Self::cover) removed, in reverse order.
    pub fn uncover(&mut self, header: usize) {
        let mut i = self.nodes[header].up;
        while i != header {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node {
                    up,
                    down,
                    header: column,
                    ..
                } = self.nodes[j];
                self.sizes[column] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[header];
        self.nodes[right].left = header;
        self.nodes[left].right = header;
    }

    /// Counts the nodes reachable in a column's vertical ring.
    #[cfg(test)]
    fn live_count(&self, header: usize) -> usize {
        let mut count = 0;
        let mut node = self.nodes[header].down;
        while node != header {
            count += 1;
            node = self.nodes[node].down;
        }
        count
    }

    #[cfg(test)]
    fn assert_sizes_consistent(&self) {
        for header in 1..self.sizes.len() {
            assert_eq!(
                self.live_count(header),
                self.sizes[header],
                "column header {header} size does not match its ring"
            );
        }
    }
}
