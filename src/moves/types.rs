//! Move and signature types.

use std::fmt;

/// A local-search move on a [`Tour`](crate::model::Tour).
///
/// - `InterSwap` replaces the selected node `inside` with the unselected
///   node `outside`, keeping its position.
/// - `EdgeExchange` is a 2-opt move: it removes the edges leaving `a` and
///   `b` in traversal order, connects `a` to `b` and their former successors
///   to each other, and reverses the path between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Swap a selected node with an unselected one.
    InterSwap {
        /// Selected node leaving the tour.
        inside: usize,
        /// Unselected node entering the tour.
        outside: usize,
    },
    /// 2-opt exchange of the edges leaving `a` and `b`.
    EdgeExchange {
        /// Tail of the first removed edge.
        a: usize,
        /// Tail of the second removed edge.
        b: usize,
    },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::InterSwap { inside, outside } => write!(f, "swap({inside} -> {outside})"),
            Move::EdgeExchange { a, b } => write!(f, "2opt({a}, {b})"),
        }
    }
}

/// Undirected edge with its endpoints in ascending order.
pub type EdgeKey = (usize, usize);

/// Normalizes an edge so that `(u, v)` and `(v, u)` compare equal.
#[inline]
pub fn edge_key(u: usize, v: usize) -> EdgeKey {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

#[inline]
fn edge_pair(e1: EdgeKey, e2: EdgeKey) -> [EdgeKey; 2] {
    if e1 <= e2 {
        [e1, e2]
    } else {
        [e2, e1]
    }
}

/// Canonical identity of a logical move, used to deduplicate cached moves.
///
/// An inter swap is identified by its ordered `(inside, outside)` pair. An
/// edge exchange is identified by the edges it removes and the edges it
/// adds, both order-normalized, so that the same reconnection reached from
/// either endpoint or either traversal direction maps to one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKey {
    /// Key of [`Move::InterSwap`].
    InterSwap {
        /// Node leaving the tour.
        inside: usize,
        /// Node entering the tour.
        outside: usize,
    },
    /// Key of [`Move::EdgeExchange`].
    EdgeExchange {
        /// Removed edges, normalized.
        removed: [EdgeKey; 2],
        /// Added edges, normalized.
        added: [EdgeKey; 2],
    },
}

impl MoveKey {
    /// Key for an inter swap.
    pub fn inter_swap(inside: usize, outside: usize) -> Self {
        MoveKey::InterSwap { inside, outside }
    }

    /// Key for the 2-opt removing `a -> a_next` and `b -> b_next`.
    pub fn edge_exchange(a: usize, a_next: usize, b: usize, b_next: usize) -> Self {
        MoveKey::EdgeExchange {
            removed: edge_pair(edge_key(a, a_next), edge_key(b, b_next)),
            added: edge_pair(edge_key(a, b), edge_key(a_next, b_next)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_order_free() {
        assert_eq!(edge_key(3, 1), edge_key(1, 3));
        assert_eq!(edge_key(2, 2), (2, 2));
    }

    #[test]
    fn test_edge_exchange_key_symmetric_in_endpoints() {
        // Same reconnection described from b's side.
        let k1 = MoveKey::edge_exchange(1, 2, 5, 6);
        let k2 = MoveKey::edge_exchange(5, 6, 1, 2);
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_edge_exchange_key_symmetric_in_direction() {
        // Both edges traversed the other way: removes the same edges and
        // adds (2, 6) + (1, 5), the same reconnection.
        let forward = MoveKey::edge_exchange(1, 2, 5, 6);
        let backward = MoveKey::edge_exchange(6, 5, 2, 1);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_other_reconnection_has_other_key() {
        // Same removed edges, added (1, 6) + (2, 5) instead.
        let one = MoveKey::edge_exchange(1, 2, 5, 6);
        let other = MoveKey::edge_exchange(1, 2, 6, 5);
        assert_ne!(one, other);
    }

    #[test]
    fn test_keys_order_deterministically() {
        let a = MoveKey::inter_swap(1, 2);
        let b = MoveKey::inter_swap(1, 3);
        assert!(a < b);
        assert!(MoveKey::inter_swap(9, 9) < MoveKey::edge_exchange(0, 1, 2, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Move::InterSwap {
                inside: 3,
                outside: 7
            }
            .to_string(),
            "swap(3 -> 7)"
        );
        assert_eq!(Move::EdgeExchange { a: 1, b: 4 }.to_string(), "2opt(1, 4)");
    }
}
