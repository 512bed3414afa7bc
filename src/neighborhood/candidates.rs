//! k-nearest candidate lists.

use tracing::debug;

use crate::model::Instance;

/// Per-node candidate lists.
///
/// `nearest(i)` holds the `k` nodes minimizing `distance(i, j) + cost(j)`,
/// best first with ties broken by id. `links(i)` is the symmetric closure:
/// every `j` with `j ∈ nearest(i)` or `i ∈ nearest(j)`, ascending. An edge
/// `(u, v)` is a candidate edge when `v ∈ links(u)`.
///
/// The closure is wider than walking `nearest` of the selected nodes only:
/// a swap bringing in `x` next to `u` is a candidate as soon as `u` is
/// among `x`'s nearest nodes, even if `x` is not among `u`'s.
///
/// Lists depend only on the instance, never on a tour, so one set serves
/// every descent on that instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLists {
    k: usize,
    nearest: Vec<Vec<usize>>,
    links: Vec<Vec<usize>>,
}

impl CandidateLists {
    /// Builds lists of length `k`, clamped to `1..=N−1`.
    pub fn build(instance: &Instance, k: usize) -> Self {
        let n = instance.len();
        let effective = k.max(1).min(n.saturating_sub(1));
        if effective != k {
            debug!(
                event = "candidates_clamped",
                requested = k,
                effective,
                nodes = n
            );
        }

        let mut nearest = Vec::with_capacity(n);
        let mut scored: Vec<(i64, usize)> = Vec::with_capacity(n);
        for i in 0..n {
            scored.clear();
            scored.extend(
                (0..n)
                    .filter(|&j| j != i)
                    .map(|j| (instance.objective(i, j), j)),
            );
            if effective < scored.len() && effective > 0 {
                scored.select_nth_unstable(effective - 1);
            }
            scored.truncate(effective);
            scored.sort_unstable();
            nearest.push(scored.iter().map(|&(_, j)| j).collect::<Vec<_>>());
        }

        let mut links: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, list) in nearest.iter().enumerate() {
            for &j in list {
                links[i].push(j);
                links[j].push(i);
            }
        }
        for list in &mut links {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            k: effective,
            nearest,
            links,
        }
    }

    /// Effective list length after clamping.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The `k` nearest nodes of `node`, best first.
    #[inline]
    pub fn nearest(&self, node: usize) -> &[usize] {
        &self.nearest[node]
    }

    /// Nodes joined to `node` by a candidate edge, ascending.
    #[inline]
    pub fn links(&self, node: usize) -> &[usize] {
        &self.links[node]
    }

    /// Whether `(u, v)` is a candidate edge.
    #[inline]
    pub fn is_candidate_edge(&self, u: usize, v: usize) -> bool {
        self.links[u].binary_search(&v).is_ok()
    }
}
