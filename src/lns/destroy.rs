//! Roulette-wheel segment removal.

use rand::Rng;

use crate::model::{Instance, Tour};

/// Removes `⌊remove_fraction · M⌋ / segment_length` segments of
/// `segment_length` consecutive positions from `tour`.
///
/// Segments may wrap around the closing edge and never overlap. Each one is
/// drawn by roulette wheel among the segments still fully present, weighted
/// by the visiting costs of its nodes plus the lengths of the edges leaving
/// them, so expensive stretches are cut more often.
///
/// Returns the remaining nodes in tour order.
pub fn destroy<R: Rng>(
    tour: &Tour,
    instance: &Instance,
    remove_fraction: f64,
    segment_length: usize,
    rng: &mut R,
) -> Vec<usize> {
    let m = tour.len();
    if segment_length == 0 || segment_length > m {
        return tour.nodes().to_vec();
    }
    let wanted = (remove_fraction * m as f64) as usize / segment_length;

    let weights: Vec<i64> = (0..m)
        .map(|start| {
            (start..start + segment_length)
                .map(|pos| {
                    let node = tour.node_at(pos);
                    instance.cost(node) + instance.distance(node, tour.node_at(pos + 1))
                })
                .sum()
        })
        .collect();

    let mut removed = vec![false; m];
    let mut available: Vec<usize> = (0..m).collect();
    for _ in 0..wanted {
        available.retain(|&start| (start..start + segment_length).all(|pos| !removed[pos % m]));
        if available.is_empty() {
            break;
        }
        let start = roulette_select(&available, &weights, rng);
        for pos in start..start + segment_length {
            removed[pos % m] = true;
        }
    }

    tour.nodes()
        .iter()
        .zip(&removed)
        .filter(|&(_, &gone)| !gone)
        .map(|(&node, _)| node)
        .collect()
}

/// Picks an entry of `starts` with probability proportional to its weight.
fn roulette_select<R: Rng>(starts: &[usize], weights: &[i64], rng: &mut R) -> usize {
    let total: i64 = starts.iter().map(|&s| weights[s]).sum();
    if total <= 0 {
        return starts[rng.random_range(0..starts.len())];
    }

    let mut roll = rng.random_range(0..total);
    for &start in starts {
        roll -= weights[start];
        if roll < 0 {
            return start;
        }
    }
    starts[starts.len() - 1]
}
