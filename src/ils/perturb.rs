//! Random perturbation of a tour.

use rand::Rng;

use crate::error::Result;
use crate::model::Tour;

/// Perturbs `tour` in place.
///
/// Performs `reversals` random 2-opt reconnections (reversing the segment
/// between two non-adjacent positions), then `swaps` replacements of a
/// random selected node, other than the one at position 0, by a random
/// unselected node. Reversals are skipped on tours of fewer than four
/// nodes, swaps when every node is selected.
///
/// # Errors
///
/// Only fails if the tour's invariants were already broken.
pub fn perturb<R: Rng>(tour: &mut Tour, reversals: usize, swaps: usize, rng: &mut R) -> Result<()> {
    let m = tour.len();
    if m >= 4 {
        for _ in 0..reversals {
            let first = rng.random_range(0..m);
            // Offsets 2..=m-2 exclude the position itself and both neighbors.
            let second = (first + rng.random_range(2..=m - 2)) % m;
            let (p1, p2) = if first < second {
                (first, second)
            } else {
                (second, first)
            };
            tour.reverse_segment(p1 + 1, p2)?;
        }
    }

    for _ in 0..swaps {
        let outside: Vec<usize> = tour.unselected().collect();
        if outside.is_empty() {
            break;
        }
        let pos = rng.random_range(1..m);
        let node = outside[rng.random_range(0..outside.len())];
        tour.replace_at(pos, node)?;
    }
    Ok(())
}
