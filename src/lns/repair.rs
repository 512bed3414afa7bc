//! Greedy regret insertion.

use crate::error::{Error, Result};
use crate::model::{Instance, Tour};

/// Rebuilds a tour of `target` nodes by inserting unselected nodes into the
/// cycle formed by `partial`.
///
/// For every unselected node `x` the cheapest and second cheapest insertion
/// costs `d(u, x) + d(x, v) - d(u, v) + c(x)` over the cycle edges `(u, v)`
/// are computed. The node minimizing
/// `score_weight * best - regret_weight * (second - best)` is inserted at
/// its cheapest edge, ties going to the lower id. A node with a single
/// insertion edge has no regret.
///
/// # Errors
///
/// Fails with [`Error::TourTooShort`] on an empty `partial`, with
/// [`Error::NodeOutOfRange`] or [`Error::DuplicateNode`] on malformed input,
/// and if the rebuilt tour is shorter than two nodes.
///
/// # Examples
///
/// ```
/// use u_tour_search::lns::repair;
/// use u_tour_search::model::{Instance, Node};
///
/// let inst = Instance::from_nodes(&[
///     Node::new(0.0, 0.0, 0),
///     Node::new(10.0, 0.0, 0),
///     Node::new(20.0, 0.0, 90),
///     Node::new(30.0, 0.0, 0),
/// ]).unwrap();
/// let tour = repair(&inst, vec![0, 3], 3, 0.5, 0.5).unwrap();
/// assert_eq!(tour.len(), 3);
/// assert!(tour.is_selected(1));
/// ```
pub fn repair(
    instance: &Instance,
    mut path: Vec<usize>,
    target: usize,
    score_weight: f64,
    regret_weight: f64,
) -> Result<Tour> {
    let n = instance.len();
    if path.is_empty() {
        return Err(Error::TourTooShort { len: 0 });
    }
    let mut selected = vec![false; n];
    for &node in &path {
        let flag = selected
            .get_mut(node)
            .ok_or(Error::NodeOutOfRange { node, size: n })?;
        if *flag {
            return Err(Error::DuplicateNode { node });
        }
        *flag = true;
    }

    while path.len() < target.min(n) {
        let mut choice: Option<(f64, usize, usize)> = None;
        for node in (0..n).filter(|&x| !selected[x]) {
            let (best, slot, second) = insertion_costs(instance, &path, node);
            let regret = second.map_or(0, |second| second - best);
            let score = score_weight * best as f64 - regret_weight * regret as f64;
            if choice.map_or(true, |(current, _, _)| score < current) {
                choice = Some((score, node, slot));
            }
        }
        let Some((_, node, slot)) = choice else {
            break;
        };
        path.insert(slot, node);
        selected[node] = true;
    }

    Tour::new(path, n)
}

/// Cheapest insertion cost of `node` with its slot in `path`, and the
/// second cheapest cost if there is more than one edge.
fn insertion_costs(instance: &Instance, path: &[usize], node: usize) -> (i64, usize, Option<i64>) {
    let len = path.len();
    let mut best = (i64::MAX, len);
    let mut second: Option<i64> = None;
    for i in 0..len {
        let u = path[i];
        let v = path[(i + 1) % len];
        let cost = instance.distance(u, node) + instance.distance(node, v)
            - instance.distance(u, v)
            + instance.cost(node);
        if cost < best.0 {
            if best.0 != i64::MAX {
                second = Some(best.0);
            }
            best = (cost, i + 1);
        } else if second.map_or(true, |s| cost < s) {
            second = Some(cost);
        }
    }
    (best.0, best.1, second)
}
