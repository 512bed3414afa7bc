//! Closed tour over a subset of the instance's nodes.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::Instance;

/// A closed cycle over the selected nodes.
///
/// The path is stored with the first node repeated at the end, so
/// `path()[0] == path()[len()]` always holds. A position index over all N
/// node ids gives O(1) membership, position, predecessor, and successor
/// lookups.
///
/// [`replace_at`](Self::replace_at) and
/// [`reverse_segment`](Self::reverse_segment) are the only mutations; both
/// keep the closure and the index in sync.
///
/// # Examples
///
/// ```
/// use u_tour_search::model::Tour;
///
/// let mut tour = Tour::new(vec![4, 1, 3, 0], 6).unwrap();
/// assert_eq!(tour.path(), &[4, 1, 3, 0, 4]);
/// assert_eq!(tour.position_of(3), Some(2));
/// assert!(!tour.is_selected(5));
///
/// tour.reverse_segment(0, 1).unwrap();
/// assert_eq!(tour.path(), &[1, 4, 3, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    path: Vec<usize>,
    positions: Vec<Option<usize>>,
}

impl Tour {
    /// Creates a tour visiting `nodes` in order, over a universe of
    /// `universe` node ids.
    ///
    /// # Errors
    ///
    /// Fails when fewer than two nodes are given, a node id is not below
    /// `universe`, or a node repeats.
    pub fn new(nodes: Vec<usize>, universe: usize) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(Error::TourTooShort { len: nodes.len() });
        }
        let mut positions = vec![None; universe];
        for (pos, &node) in nodes.iter().enumerate() {
            let slot = positions.get_mut(node).ok_or(Error::NodeOutOfRange {
                node,
                size: universe,
            })?;
            if slot.is_some() {
                return Err(Error::DuplicateNode { node });
            }
            *slot = Some(pos);
        }

        let mut path = nodes;
        path.push(path[0]);
        Ok(Self { path, positions })
    }

    /// Creates a tour from a closed path (first node repeated at the end).
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotClosed`] if the path does not end where it
    /// starts, plus every error of [`Tour::new`].
    pub fn from_closed(mut path: Vec<usize>, universe: usize) -> Result<Self> {
        match (path.first(), path.last()) {
            (Some(&first), Some(&last)) if first == last && path.len() > 1 => {
                path.pop();
                Self::new(path, universe)
            }
            (Some(&first), Some(&last)) => Err(Error::NotClosed { first, last }),
            _ => Err(Error::TourTooShort { len: 0 }),
        }
    }

    /// Number of selected nodes M.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    /// Always false; tours hold at least two nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of node ids in the universe N.
    #[inline]
    pub fn universe(&self) -> usize {
        self.positions.len()
    }

    /// The closed path, `len() + 1` entries.
    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The selected nodes in tour order, without the closing repeat.
    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.path[..self.len()]
    }

    /// Node at `pos`; positions wrap modulo `len()`.
    #[inline]
    pub fn node_at(&self, pos: usize) -> usize {
        self.path[pos % self.len()]
    }

    /// Position of `node`, or `None` if it is not selected.
    #[inline]
    pub fn position_of(&self, node: usize) -> Option<usize> {
        self.positions.get(node).copied().flatten()
    }

    /// Whether `node` is part of the tour.
    #[inline]
    pub fn is_selected(&self, node: usize) -> bool {
        self.position_of(node).is_some()
    }

    /// Position preceding `pos` in cyclic order.
    #[inline]
    pub fn prev_pos(&self, pos: usize) -> usize {
        if pos == 0 {
            self.len() - 1
        } else {
            pos - 1
        }
    }

    /// Position following `pos` in cyclic order.
    #[inline]
    pub fn next_pos(&self, pos: usize) -> usize {
        if pos + 1 == self.len() {
            0
        } else {
            pos + 1
        }
    }

    /// Predecessor of a selected node.
    #[inline]
    pub fn pred(&self, node: usize) -> Option<usize> {
        self.position_of(node)
            .map(|pos| self.path[self.prev_pos(pos)])
    }

    /// Successor of a selected node.
    #[inline]
    pub fn succ(&self, node: usize) -> Option<usize> {
        // path[pos + 1] is valid for every pos < len thanks to the closing repeat.
        self.position_of(node).map(|pos| self.path[pos + 1])
    }

    /// Whether `from` is immediately followed by `to`.
    #[inline]
    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        self.succ(from) == Some(to)
    }

    /// Whether `u` and `v` are adjacent in either direction.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.has_arc(u, v) || self.has_arc(v, u)
    }

    /// Node ids not part of the tour, ascending.
    pub fn unselected(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(node, _)| node)
    }

    /// Replaces the node at `pos` with the unselected `node`, returning the
    /// node that was removed.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is out of range, `node` is out of range, or `node` is
    /// already selected.
    pub fn replace_at(&mut self, pos: usize, node: usize) -> Result<usize> {
        let len = self.len();
        if pos >= len {
            return Err(Error::PositionOutOfRange { position: pos, len });
        }
        match self.positions.get(node) {
            None => {
                return Err(Error::NodeOutOfRange {
                    node,
                    size: self.universe(),
                })
            }
            Some(Some(_)) => return Err(Error::DuplicateNode { node }),
            Some(None) => {}
        }

        let old = self.path[pos];
        self.positions[old] = None;
        self.positions[node] = Some(pos);
        self.path[pos] = node;
        if pos == 0 {
            self.path[len] = node;
        }
        Ok(old)
    }

    /// Reverses the nodes at positions `from..=to`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::PositionOutOfRange`] unless `from <= to < len()`.
    pub fn reverse_segment(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.len();
        if to >= len || from > to {
            return Err(Error::PositionOutOfRange {
                position: if to >= len { to } else { from },
                len,
            });
        }

        self.path[from..=to].reverse();
        for pos in from..=to {
            self.positions[self.path[pos]] = Some(pos);
        }
        if from == 0 {
            self.path[len] = self.path[0];
        }
        Ok(())
    }

    /// Swaps the nodes at positions `p` and `q`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::PositionOutOfRange`] if either position is not
    /// below `len()`.
    pub fn swap_positions(&mut self, p: usize, q: usize) -> Result<()> {
        let len = self.len();
        if let Some(&position) = [p, q].iter().find(|&&pos| pos >= len) {
            return Err(Error::PositionOutOfRange { position, len });
        }
        self.path.swap(p, q);
        self.positions[self.path[p]] = Some(p);
        self.positions[self.path[q]] = Some(q);
        self.path[len] = self.path[0];
        Ok(())
    }

    /// Sum of edge distances around the cycle.
    pub fn distance(&self, instance: &Instance) -> i64 {
        self.path
            .windows(2)
            .map(|w| instance.distance(w[0], w[1]))
            .sum()
    }

    /// Sum of the visiting costs of the selected nodes.
    pub fn visiting_cost(&self, instance: &Instance) -> i64 {
        self.nodes().iter().map(|&n| instance.cost(n)).sum()
    }

    /// Objective value: distance plus visiting costs.
    pub fn cost(&self, instance: &Instance) -> i64 {
        self.distance(instance) + self.visiting_cost(instance)
    }

    /// Checks closure, duplicate-freedom, and the position index.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<()> {
        let len = self.len();
        if len < 2 {
            return Err(Error::TourTooShort { len });
        }
        if self.path[0] != self.path[len] {
            return Err(Error::NotClosed {
                first: self.path[0],
                last: self.path[len],
            });
        }

        let mut seen = vec![false; self.universe()];
        for (pos, &node) in self.nodes().iter().enumerate() {
            let flag = seen.get_mut(node).ok_or(Error::NodeOutOfRange {
                node,
                size: self.universe(),
            })?;
            if *flag {
                return Err(Error::DuplicateNode { node });
            }
            *flag = true;
            if self.positions[node] != Some(pos) {
                return Err(Error::PositionMismatch { node });
            }
        }

        let indexed = self.positions.iter().filter(|p| p.is_some()).count();
        if indexed != len {
            let node = self
                .positions
                .iter()
                .enumerate()
                .find(|(n, p)| p.is_some() && !seen[*n])
                .map_or(0, |(n, _)| n);
            return Err(Error::PositionMismatch { node });
        }
        Ok(())
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.path.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join(" -> "))
    }
}
