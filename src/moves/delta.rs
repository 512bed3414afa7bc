//! O(1) delta evaluation and application of moves.
//!
//! # Formulas
//!
//! Inter swap of `old` (between `pred` and `succ`) with `new`:
//!
//! ```text
//! delta = d(pred, new) + c(new) + d(new, succ) - d(pred, old) - c(old) - d(old, succ)
//! ```
//!
//! Edge exchange of `a -> a'` and `b -> b'`:
//!
//! ```text
//! delta = d(a, b) + d(a', b') - d(a, a') - d(b, b')
//! ```
//!
//! Node exchange of `u` and `v` inside the tour, when they are not
//! neighbors:
//!
//! ```text
//! delta = d(u-, v) + d(v, u+) + d(v-, u) + d(u, v+)
//!       - d(u-, u) - d(u, u+) - d(v-, v) - d(v, v+)
//! ```
//!
//! Neighbors `A, u, v, B` only change their outer edges:
//! `d(A, v) + d(u, B) - d(A, u) - d(v, B)`.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::types::{Move, MoveKey};
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};

/// Cost change of replacing `old` by `new` between `pred` and `succ`.
#[inline]
pub fn inter_swap_delta(
    instance: &Instance,
    pred: usize,
    old: usize,
    new: usize,
    succ: usize,
) -> i64 {
    let added = instance.distance(pred, new) + instance.cost(new) + instance.distance(new, succ);
    let removed = instance.distance(pred, old) + instance.cost(old) + instance.distance(old, succ);
    added - removed
}

/// Cost change of the 2-opt removing `a -> a_next` and `b -> b_next`.
#[inline]
pub fn edge_exchange_delta(
    instance: &Instance,
    a: usize,
    a_next: usize,
    b: usize,
    b_next: usize,
) -> i64 {
    let added = instance.distance(a, b) + instance.distance(a_next, b_next);
    let removed = instance.distance(a, a_next) + instance.distance(b, b_next);
    added - removed
}

/// Cost change of swapping the nodes at positions `p` and `q`.
///
/// Visiting costs are unaffected; only the edges around the two positions
/// change. `None` if the positions coincide or either is out of range.
pub fn node_exchange_delta(tour: &Tour, instance: &Instance, p: usize, q: usize) -> Option<i64> {
    let m = tour.len();
    if p == q || p >= m || q >= m {
        return None;
    }
    if m == 2 {
        return Some(0);
    }
    let (p, q) = if p < q { (p, q) } else { (q, p) };
    let u = tour.node_at(p);
    let v = tour.node_at(q);
    let d = |i: usize, j: usize| instance.distance(i, j);

    let delta = if q == p + 1 {
        let before = tour.node_at(tour.prev_pos(p));
        let after = tour.node_at(q + 1);
        d(before, v) + d(u, after) - d(before, u) - d(v, after)
    } else if p == 0 && q == m - 1 {
        // v precedes u across the closing edge.
        let before = tour.node_at(q - 1);
        let after = tour.node_at(1);
        d(before, u) + d(v, after) - d(before, v) - d(u, after)
    } else {
        let (u_pred, u_succ) = (tour.node_at(tour.prev_pos(p)), tour.node_at(p + 1));
        let (v_pred, v_succ) = (tour.node_at(q - 1), tour.node_at(q + 1));
        d(u_pred, v) + d(v, u_succ) + d(v_pred, u) + d(u, v_succ)
            - d(u_pred, u)
            - d(u, u_succ)
            - d(v_pred, v)
            - d(v, v_succ)
    };
    Some(delta)
}

/// Endpoints of an applicable edge exchange: `(a, a_next, b, b_next)`.
///
/// `None` if either tail is unselected, the tails coincide, or the two
/// edges share a node.
#[inline]
pub(crate) fn exchange_endpoints(
    tour: &Tour,
    a: usize,
    b: usize,
) -> Option<(usize, usize, usize, usize)> {
    if a == b {
        return None;
    }
    let a_next = tour.succ(a)?;
    let b_next = tour.succ(b)?;
    if a_next == b || b_next == a {
        return None;
    }
    Some((a, a_next, b, b_next))
}

impl Move {
    /// Evaluates the move against the current tour.
    ///
    /// Returns `None` if the move is not applicable: the inside node is not
    /// selected, the outside node is, or the exchanged edges are adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour_search::model::{Instance, Node, Tour};
    /// use u_tour_search::moves::Move;
    ///
    /// // Unit square visited in crossing order 0, 2, 1, 3.
    /// let inst = Instance::from_nodes(&[
    ///     Node::new(0.0, 0.0, 0),
    ///     Node::new(0.0, 10.0, 0),
    ///     Node::new(10.0, 10.0, 0),
    ///     Node::new(10.0, 0.0, 0),
    /// ]).unwrap();
    /// let tour = Tour::new(vec![0, 2, 1, 3], 4).unwrap();
    ///
    /// let mv = Move::EdgeExchange { a: 0, b: 1 };
    /// assert_eq!(mv.evaluate(&tour, &inst), Some(-8));
    /// ```
    pub fn evaluate(&self, tour: &Tour, instance: &Instance) -> Option<i64> {
        match *self {
            Move::InterSwap { inside, outside } => {
                if outside >= tour.universe() || tour.is_selected(outside) {
                    return None;
                }
                let pos = tour.position_of(inside)?;
                let pred = tour.node_at(tour.prev_pos(pos));
                let succ = tour.node_at(pos + 1);
                Some(inter_swap_delta(instance, pred, inside, outside, succ))
            }
            Move::EdgeExchange { a, b } => {
                let (a, a_next, b, b_next) = exchange_endpoints(tour, a, b)?;
                Some(edge_exchange_delta(instance, a, a_next, b, b_next))
            }
        }
    }

    /// Signature of the move in the context of the current tour.
    ///
    /// `None` when the move is not applicable.
    pub fn key(&self, tour: &Tour) -> Option<MoveKey> {
        match *self {
            Move::InterSwap { inside, outside } => Some(MoveKey::inter_swap(inside, outside)),
            Move::EdgeExchange { a, b } => {
                let (a, a_next, b, b_next) = exchange_endpoints(tour, a, b)?;
                Some(MoveKey::edge_exchange(a, a_next, b, b_next))
            }
        }
    }

    /// Applies the move to the tour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the move is not applicable, leaving
    /// the tour untouched.
    pub fn apply(&self, tour: &mut Tour) -> Result<()> {
        match *self {
            Move::InterSwap { inside, outside } => {
                let pos = tour
                    .position_of(inside)
                    .ok_or_else(|| Error::IllegalMove(self.to_string()))?;
                if outside >= tour.universe() || tour.is_selected(outside) {
                    return Err(Error::IllegalMove(self.to_string()));
                }
                tour.replace_at(pos, outside)?;
                Ok(())
            }
            Move::EdgeExchange { a, b } => {
                exchange_endpoints(tour, a, b)
                    .ok_or_else(|| Error::IllegalMove(self.to_string()))?;
                let (p1, p2) = ordered_positions(tour, a, b)?;
                tour.reverse_segment(p1 + 1, p2)
            }
        }
    }

    /// The move that undoes `self` once applied to `before`.
    ///
    /// `before` is the tour as it was prior to applying `self`. Returns
    /// `None` if `self` is not applicable to `before`.
    pub fn inverse(&self, before: &Tour) -> Option<Move> {
        match *self {
            Move::InterSwap { inside, outside } => {
                before.position_of(inside)?;
                Some(Move::InterSwap {
                    inside: outside,
                    outside: inside,
                })
            }
            Move::EdgeExchange { a, b } => {
                exchange_endpoints(before, a, b)?;
                let (p1, _) = ordered_positions(before, a, b).ok()?;
                let first = before.node_at(p1);
                Some(Move::EdgeExchange {
                    a: first,
                    b: before.node_at(p1 + 1),
                })
            }
        }
    }
}

/// Positions of `a` and `b`, smaller first.
fn ordered_positions(tour: &Tour, a: usize, b: usize) -> Result<(usize, usize)> {
    let pa = tour.position_of(a).ok_or(Error::PositionMismatch { node: a })?;
    let pb = tour.position_of(b).ok_or(Error::PositionMismatch { node: b })?;
    Ok(if pa < pb { (pa, pb) } else { (pb, pa) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    fn square() -> Instance {
        Instance::from_nodes(&[
            Node::new(0.0, 0.0, 0),
            Node::new(0.0, 10.0, 0),
            Node::new(10.0, 10.0, 0),
            Node::new(10.0, 0.0, 0),
        ])
        .unwrap()
    }

    /// Six points on a line with costs; distances are |i - j| * 10.
    fn line() -> Instance {
        let nodes: Vec<Node> = (0..6)
            .map(|i| Node::new(i as f64 * 10.0, 0.0, i as i64))
            .collect();
        Instance::from_nodes(&nodes).unwrap()
    }

    #[test]
    fn test_inter_swap_delta_matches_full_cost() {
        let inst = line();
        let mut tour = Tour::new(vec![0, 2, 4], 6).unwrap();
        let before = tour.cost(&inst);

        let mv = Move::InterSwap {
            inside: 4,
            outside: 1,
        };
        let delta = mv.evaluate(&tour, &inst).unwrap();
        mv.apply(&mut tour).unwrap();

        assert_eq!(tour.cost(&inst), before + delta);
        assert_eq!(tour.nodes(), &[0, 2, 1]);
    }

    #[test]
    fn test_inter_swap_at_first_position() {
        let inst = line();
        let mut tour = Tour::new(vec![3, 1, 5], 6).unwrap();
        let before = tour.cost(&inst);
        let mv = Move::InterSwap {
            inside: 3,
            outside: 0,
        };
        let delta = mv.evaluate(&tour, &inst).unwrap();
        mv.apply(&mut tour).unwrap();
        assert_eq!(tour.path(), &[0, 1, 5, 0]);
        assert_eq!(tour.cost(&inst), before + delta);
    }

    #[test]
    fn test_inter_swap_not_applicable() {
        let inst = line();
        let tour = Tour::new(vec![0, 2, 4], 6).unwrap();
        let selected_outside = Move::InterSwap {
            inside: 0,
            outside: 2,
        };
        let unselected_inside = Move::InterSwap {
            inside: 1,
            outside: 3,
        };
        assert_eq!(selected_outside.evaluate(&tour, &inst), None);
        assert_eq!(unselected_inside.evaluate(&tour, &inst), None);

        let mut copy = tour.clone();
        assert!(selected_outside.apply(&mut copy).is_err());
        assert_eq!(copy, tour);
    }

    #[test]
    fn test_crossing_exchange_improves_and_uncrosses() {
        let inst = square();
        // 0 -> 2 and 1 -> 3 are the two diagonals.
        let mut tour = Tour::new(vec![0, 2, 1, 3], 4).unwrap();
        assert_eq!(tour.cost(&inst), 48);

        let mv = Move::EdgeExchange { a: 0, b: 1 };
        let delta = mv.evaluate(&tour, &inst).unwrap();
        assert!(delta < 0);

        mv.apply(&mut tour).unwrap();
        assert_eq!(tour.cost(&inst), 48 + delta);
        assert_eq!(tour.cost(&inst), 40);
        assert!(!(tour.has_edge(0, 2) && tour.has_edge(1, 3)));
        assert!(!tour.has_edge(0, 2));
        assert!(!tour.has_edge(1, 3));
    }

    #[test]
    fn test_exchange_rejects_adjacent_edges() {
        let inst = line();
        let tour = Tour::new(vec![0, 1, 2, 3, 4], 6).unwrap();
        // Consecutive positions.
        assert_eq!(Move::EdgeExchange { a: 1, b: 2 }.evaluate(&tour, &inst), None);
        // Wrap-around pair (first, last).
        assert_eq!(Move::EdgeExchange { a: 0, b: 4 }.evaluate(&tour, &inst), None);
        assert_eq!(Move::EdgeExchange { a: 4, b: 0 }.evaluate(&tour, &inst), None);
        // Same node.
        assert_eq!(Move::EdgeExchange { a: 2, b: 2 }.evaluate(&tour, &inst), None);
        // Unselected node.
        assert_eq!(Move::EdgeExchange { a: 0, b: 5 }.evaluate(&tour, &inst), None);
        // Legal.
        assert!(Move::EdgeExchange { a: 0, b: 2 }.evaluate(&tour, &inst).is_some());
    }

    #[test]
    fn test_exchange_order_of_tails_is_irrelevant() {
        let inst = line();
        let tour = Tour::new(vec![0, 3, 1, 4, 2], 6).unwrap();
        let ab = Move::EdgeExchange { a: 3, b: 4 };
        let ba = Move::EdgeExchange { a: 4, b: 3 };
        assert_eq!(ab.evaluate(&tour, &inst), ba.evaluate(&tour, &inst));
        assert_eq!(ab.key(&tour), ba.key(&tour));

        let mut t1 = tour.clone();
        let mut t2 = tour.clone();
        ab.apply(&mut t1).unwrap();
        ba.apply(&mut t2).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_exchange_through_closing_edge() {
        let inst = line();
        let mut tour = Tour::new(vec![0, 3, 1, 4, 2], 6).unwrap();
        let before = tour.cost(&inst);
        // Second edge is the closing edge 2 -> 0.
        let mv = Move::EdgeExchange { a: 3, b: 2 };
        let delta = mv.evaluate(&tour, &inst).unwrap();
        mv.apply(&mut tour).unwrap();
        assert!(tour.check_invariants().is_ok());
        assert_eq!(tour.cost(&inst), before + delta);
        assert!(tour.has_edge(3, 2));
        assert!(tour.has_edge(1, 0));
    }

    #[test]
    fn test_inverse_restores_cost() {
        let inst = line();
        let tour = Tour::new(vec![5, 0, 3, 1, 4], 6).unwrap();
        let original = tour.cost(&inst);

        for mv in [
            Move::InterSwap {
                inside: 3,
                outside: 2,
            },
            Move::EdgeExchange { a: 5, b: 3 },
            Move::EdgeExchange { a: 4, b: 0 },
        ] {
            let mut t = tour.clone();
            let delta = mv.evaluate(&t, &inst).unwrap();
            let inverse = mv.inverse(&t).unwrap();
            mv.apply(&mut t).unwrap();
            let back = inverse.evaluate(&t, &inst).unwrap();
            assert_eq!(back, -delta, "{mv} inverse {inverse}");
            inverse.apply(&mut t).unwrap();
            assert_eq!(t.cost(&inst), original);
        }
    }

    #[test]
    fn test_node_exchange_delta_matches_full_cost() {
        let nodes: Vec<Node> = (0..9)
            .map(|i| Node::new((i * 37 % 11) as f64 * 7.0, (i * 13 % 7) as f64 * 9.0, i as i64))
            .collect();
        let inst = Instance::from_nodes(&nodes).unwrap();
        let tour = Tour::new(vec![3, 0, 7, 5, 1, 8, 2], 9).unwrap();
        let before = tour.cost(&inst);

        // Adjacent, non-adjacent, sharing a neighbor, and across the closing edge.
        for (p, q) in [(1, 2), (2, 1), (0, 4), (2, 4), (0, 6), (6, 0), (5, 6), (0, 1)] {
            let delta = node_exchange_delta(&tour, &inst, p, q).unwrap();
            let mut swapped = tour.clone();
            swapped.swap_positions(p, q).unwrap();
            assert!(swapped.check_invariants().is_ok());
            assert_eq!(
                delta,
                swapped.cost(&inst) - before,
                "exchange of positions {p} and {q}"
            );
        }
    }

    #[test]
    fn test_node_exchange_small_tours() {
        let inst = square();
        let pair = Tour::new(vec![0, 2], 4).unwrap();
        assert_eq!(node_exchange_delta(&pair, &inst, 0, 1), Some(0));

        let triangle = Tour::new(vec![0, 1, 2], 4).unwrap();
        for (p, q) in [(0, 1), (1, 2), (0, 2)] {
            assert_eq!(node_exchange_delta(&triangle, &inst, p, q), Some(0));
        }
    }

    #[test]
    fn test_node_exchange_rejects_bad_positions() {
        let inst = square();
        let tour = Tour::new(vec![0, 1, 2, 3], 4).unwrap();
        assert_eq!(node_exchange_delta(&tour, &inst, 1, 1), None);
        assert_eq!(node_exchange_delta(&tour, &inst, 0, 4), None);
    }
}
