//! Lattice coordinates and the square grid that stores node values.
//!
//! A node is addressed by `(level, step)`: `level` counts up-moves and
//! `step` is the time index. Only the triangle `level <= step` is populated;
//! the rest of the `(h + 1) x (h + 1)` grid is zero padding.

use std::ops::Index;

use lattice_core::types::LatticeError;

/// Named lattice coordinate.
///
/// # Examples
/// ```
/// use lattice_pricing::lattice::Node;
///
/// let node = Node::new(1, 3);
/// assert_eq!(node.down_moves(), 2);
/// assert_eq!(node.up(), Node::new(2, 4));
/// assert_eq!(node.down(), Node::new(1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    /// Number of up-moves taken to reach the node.
    pub level: usize,
    /// Time index.
    pub step: usize,
}

impl Node {
    /// The node at time zero.
    pub const ROOT: Node = Node { level: 0, step: 0 };

    /// Creates a node.
    ///
    /// Callers must keep `level <= step`.
    #[inline]
    pub fn new(level: usize, step: usize) -> Self {
        debug_assert!(level <= step, "level {} above step {}", level, step);
        Self { level, step }
    }

    /// Number of down-moves taken to reach the node.
    #[inline]
    pub fn down_moves(&self) -> usize {
        self.step - self.level
    }

    /// Successor after an up-move.
    #[inline]
    pub fn up(&self) -> Node {
        Node {
            level: self.level + 1,
            step: self.step + 1,
        }
    }

    /// Successor after a down-move.
    #[inline]
    pub fn down(&self) -> Node {
        Node {
            level: self.level,
            step: self.step + 1,
        }
    }
}

/// Square `(h + 1) x (h + 1)` grid of node values.
///
/// Stored row-major by level. Values are written once while the pricer
/// builds the result and are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: usize,
    cells: Vec<f64>,
}

impl Lattice {
    /// Zero-initialised grid of side `size`.
    ///
    /// Fails with `AllocationFailed` instead of aborting when the allocator
    /// cannot provide the grid.
    pub(crate) fn zeros(size: usize) -> Result<Self, LatticeError> {
        let steps = size.saturating_sub(1);
        let len = size.checked_mul(size).ok_or(LatticeError::AllocationFailed {
            steps,
            bytes: usize::MAX,
        })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LatticeError::AllocationFailed {
                steps,
                bytes: len.saturating_mul(std::mem::size_of::<f64>()),
            })?;
        cells.resize(len, 0.0);

        Ok(Self { size, cells })
    }

    #[inline]
    fn offset(&self, node: Node) -> usize {
        node.level * self.size + node.step
    }

    #[inline]
    pub(crate) fn set(&mut self, node: Node, value: f64) {
        let offset = self.offset(node);
        self.cells[offset] = value;
    }

    /// Side length of the grid (`h + 1`).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of time steps `h`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.size - 1
    }

    /// Returns `true` if `node` lies in the populated triangle.
    #[inline]
    pub fn contains(&self, node: Node) -> bool {
        node.level <= node.step && node.step < self.size
    }

    /// Value at `node`, or `None` for padding and out-of-range coordinates.
    pub fn get(&self, node: Node) -> Option<f64> {
        self.contains(node).then(|| self.cells[self.offset(node)])
    }

    /// Values at every node of one time step, ordered by level.
    ///
    /// Steps past the end of the lattice yield an empty column.
    pub fn column(&self, step: usize) -> Vec<f64> {
        if step > self.steps() {
            return Vec::new();
        }
        (0..=step)
            .map(|level| self[Node::new(level, step)])
            .collect()
    }

    /// Full grid row for one level, padding included.
    ///
    /// `None` for levels past the end of the lattice.
    pub fn row(&self, level: usize) -> Option<&[f64]> {
        let start = level.checked_mul(self.size)?;
        self.cells.get(start..start.checked_add(self.size)?)
    }

    /// Iterates over every populated node, step by step.
    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        let size = self.size;
        (0..size).flat_map(|step| (0..=step).map(move |level| Node { level, step }))
    }
}

impl Index<Node> for Lattice {
    type Output = f64;

    #[inline]
    fn index(&self, node: Node) -> &f64 {
        debug_assert!(self.contains(node), "{:?} outside lattice", node);
        &self.cells[self.offset(node)]
    }
}
