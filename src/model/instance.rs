//! Distance and visiting-cost model.

use crate::error::{Error, Result};

/// A point of the problem: coordinate and non-negative visiting cost.
///
/// The node's id is its index in the slice passed to
/// [`Instance::from_nodes`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Cost paid once when the node is part of the tour.
    pub cost: i64,
}

impl Node {
    /// Creates a node.
    pub fn new(x: f64, y: f64, cost: i64) -> Self {
        Self { x, y, cost }
    }
}

/// Read-only problem data: an N×N symmetric distance matrix and the
/// per-node visiting costs.
///
/// Distances are rounded Euclidean distances stored row-major, so both
/// [`distance`](Self::distance) and [`cost`](Self::cost) are O(1).
///
/// # Examples
///
/// ```
/// use u_tour_search::model::{Instance, Node};
///
/// let nodes = [
///     Node::new(0.0, 0.0, 5),
///     Node::new(3.0, 4.0, 1),
/// ];
/// let instance = Instance::from_nodes(&nodes).unwrap();
/// assert_eq!(instance.distance(0, 1), 5);
/// assert_eq!(instance.cost(0), 5);
/// assert_eq!(instance.selection_size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    size: usize,
    distances: Vec<i64>,
    costs: Vec<i64>,
}

impl Instance {
    /// Builds an instance from node coordinates and costs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] for an empty node list, a
    /// non-finite coordinate, or a negative cost.
    pub fn from_nodes(nodes: &[Node]) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::InvalidInstance("no nodes".into()));
        }
        for (id, node) in nodes.iter().enumerate() {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(Error::InvalidInstance(format!(
                    "node {id} has a non-finite coordinate"
                )));
            }
            if node.cost < 0 {
                return Err(Error::InvalidInstance(format!(
                    "node {id} has negative cost {}",
                    node.cost
                )));
            }
        }

        let size = nodes.len();
        let mut distances = vec![0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let dx = nodes[i].x - nodes[j].x;
                let dy = nodes[i].y - nodes[j].y;
                let d = (dx * dx + dy * dy).sqrt().round() as i64;
                distances[i * size + j] = d;
                distances[j * size + i] = d;
            }
        }

        Ok(Self {
            size,
            distances,
            costs: nodes.iter().map(|n| n.cost).collect(),
        })
    }

    /// Builds an instance from an explicit distance matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] unless the matrix is square,
    /// matches `costs` in size, is symmetric, has a zero diagonal, and all
    /// entries and costs are non-negative.
    pub fn from_matrix(matrix: Vec<Vec<i64>>, costs: Vec<i64>) -> Result<Self> {
        let size = matrix.len();
        if size == 0 {
            return Err(Error::InvalidInstance("no nodes".into()));
        }
        if costs.len() != size {
            return Err(Error::InvalidInstance(format!(
                "{} costs for {size} nodes",
                costs.len()
            )));
        }
        if let Some((id, &c)) = costs.iter().enumerate().find(|(_, &c)| c < 0) {
            return Err(Error::InvalidInstance(format!(
                "node {id} has negative cost {c}"
            )));
        }

        if let Some((i, row)) = matrix.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(Error::InvalidInstance(format!(
                "row {i} has {} entries, expected {size}",
                row.len()
            )));
        }

        let mut distances = Vec::with_capacity(size * size);
        for (i, row) in matrix.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                if d < 0 {
                    return Err(Error::InvalidInstance(format!(
                        "negative distance {d} between {i} and {j}"
                    )));
                }
                if i == j && d != 0 {
                    return Err(Error::InvalidInstance(format!(
                        "non-zero diagonal entry at {i}"
                    )));
                }
                if matrix[j][i] != d {
                    return Err(Error::InvalidInstance(format!(
                        "asymmetric distance between {i} and {j}"
                    )));
                }
            }
            distances.extend_from_slice(row);
        }

        Ok(Self {
            size,
            distances,
            costs,
        })
    }

    /// Number of nodes N.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false; instances hold at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between two nodes.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> i64 {
        self.distances[i * self.size + j]
    }

    /// Visiting cost of a node.
    #[inline]
    pub fn cost(&self, i: usize) -> i64 {
        self.costs[i]
    }

    /// Distance to `j` plus the cost of visiting `j`.
    #[inline]
    pub fn objective(&self, i: usize, j: usize) -> i64 {
        self.distance(i, j) + self.cost(j)
    }

    /// Number of nodes a tour must select: ⌈N/2⌉.
    #[inline]
    pub fn selection_size(&self) -> usize {
        self.size.div_ceil(2)
    }

    /// All node ids, `0..N`.
    pub fn node_ids(&self) -> std::ops::Range<usize> {
        0..self.size
    }
}
