//! Move enumeration.

use super::candidates::CandidateLists;
use super::config::NeighborhoodMode;
use crate::model::{Instance, Tour};
use crate::moves::{exchange_endpoints, Move};

/// Enumerates the moves of a neighborhood over a tour.
///
/// Generated moves may include ones that are not applicable (for example
/// an edge exchange between adjacent edges); consumers filter them with
/// [`Move::evaluate`]. Duplicates are possible and are resolved by
/// [`MoveKey`](crate::moves::MoveKey).
///
/// Two enumerations are offered: [`generate`](Self::generate) lists the
/// whole neighborhood, and [`generate_around`](Self::generate_around) lists
/// every move of the neighborhood whose delta, applicability, or membership
/// depends on one node's position and neighbors. The incremental descent
/// relies on the second being a superset of what changes when that node's
/// tour context changes.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    candidates: Option<CandidateLists>,
}

impl Neighborhood {
    /// Builds a neighborhood for `instance` in the given mode.
    pub fn new(instance: &Instance, mode: NeighborhoodMode) -> Self {
        match mode {
            NeighborhoodMode::Exhaustive => Self::exhaustive(),
            NeighborhoodMode::Candidates { k } => Self::with_candidates(instance, k),
        }
    }

    /// The exhaustive neighborhood.
    pub fn exhaustive() -> Self {
        Self { candidates: None }
    }

    /// The candidate-restricted neighborhood with lists of length `k`.
    pub fn with_candidates(instance: &Instance, k: usize) -> Self {
        Self {
            candidates: Some(CandidateLists::build(instance, k)),
        }
    }

    /// Mode in effect, with `k` after clamping.
    pub fn mode(&self) -> NeighborhoodMode {
        match &self.candidates {
            None => NeighborhoodMode::Exhaustive,
            Some(lists) => NeighborhoodMode::Candidates { k: lists.k() },
        }
    }

    /// Candidate lists, if restricted.
    pub fn candidate_lists(&self) -> Option<&CandidateLists> {
        self.candidates.as_ref()
    }

    /// Appends every move of the neighborhood to `out`.
    pub fn generate(&self, tour: &Tour, out: &mut Vec<Move>) {
        match &self.candidates {
            None => exhaustive_all(tour, out),
            Some(lists) => candidate_all(tour, lists, out),
        }
    }

    /// Appends every move anchored at `node` to `out`.
    pub fn generate_around(&self, tour: &Tour, node: usize, out: &mut Vec<Move>) {
        match &self.candidates {
            None => exhaustive_around(tour, node, out),
            Some(lists) => candidate_around(tour, lists, node, out),
        }
    }

    /// Whether `mv` is applicable to `tour` and belongs to the neighborhood.
    pub fn contains(&self, tour: &Tour, mv: &Move) -> bool {
        match *mv {
            Move::InterSwap { inside, outside } => {
                if outside >= tour.universe() || tour.is_selected(outside) {
                    return false;
                }
                let (Some(pred), Some(succ)) = (tour.pred(inside), tour.succ(inside)) else {
                    return false;
                };
                match &self.candidates {
                    None => true,
                    Some(lists) => {
                        lists.is_candidate_edge(pred, outside)
                            || lists.is_candidate_edge(succ, outside)
                    }
                }
            }
            Move::EdgeExchange { a, b } => match exchange_endpoints(tour, a, b) {
                Some((a, a_next, b, b_next)) => match &self.candidates {
                    None => true,
                    Some(lists) => {
                        lists.is_candidate_edge(a, b) || lists.is_candidate_edge(a_next, b_next)
                    }
                },
                None => false,
            },
        }
    }
}

fn exhaustive_all(tour: &Tour, out: &mut Vec<Move>) {
    for &inside in tour.nodes() {
        out.extend(tour.unselected().map(|outside| Move::InterSwap { inside, outside }));
    }

    let m = tour.len();
    for i in 0..m {
        for j in (i + 2)..m {
            if i == 0 && j == m - 1 {
                continue;
            }
            out.push(Move::EdgeExchange {
                a: tour.node_at(i),
                b: tour.node_at(j),
            });
        }
    }
}

fn exhaustive_around(tour: &Tour, node: usize, out: &mut Vec<Move>) {
    let (Some(pred), Some(succ)) = (tour.pred(node), tour.succ(node)) else {
        out.extend(tour.nodes().iter().map(|&inside| Move::InterSwap {
            inside,
            outside: node,
        }));
        return;
    };

    // Swaps of `node` and of both neighbors, whose deltas read `node`.
    for inside in [pred, node, succ] {
        out.extend(tour.unselected().map(|outside| Move::InterSwap { inside, outside }));
    }
    // 2-opts removing pred -> node or node -> succ.
    for tail in [pred, node] {
        out.extend(
            tour.nodes()
                .iter()
                .map(|&other| Move::EdgeExchange { a: tail, b: other }),
        );
    }
}

fn candidate_all(tour: &Tour, lists: &CandidateLists, out: &mut Vec<Move>) {
    for &node in tour.nodes() {
        let (Some(pred), Some(succ)) = (tour.pred(node), tour.succ(node)) else {
            continue;
        };
        for &c in lists.links(node) {
            match tour.pred(c) {
                // c is outside: bring it next to `node` from either side.
                None => {
                    out.push(Move::InterSwap {
                        inside: pred,
                        outside: c,
                    });
                    out.push(Move::InterSwap {
                        inside: succ,
                        outside: c,
                    });
                }
                // c is inside: both 2-opts that create the edge (node, c).
                Some(c_pred) => {
                    out.push(Move::EdgeExchange { a: node, b: c });
                    out.push(Move::EdgeExchange { a: pred, b: c_pred });
                }
            }
        }
    }
}

/// Swaps of `inside` whose entering node links to one of its neighbors.
fn candidate_swaps_of(tour: &Tour, lists: &CandidateLists, inside: usize, out: &mut Vec<Move>) {
    let (Some(pred), Some(succ)) = (tour.pred(inside), tour.succ(inside)) else {
        return;
    };
    for &outside in lists.links(pred).iter().chain(lists.links(succ)) {
        if !tour.is_selected(outside) {
            out.push(Move::InterSwap { inside, outside });
        }
    }
}

fn candidate_around(tour: &Tour, lists: &CandidateLists, node: usize, out: &mut Vec<Move>) {
    let (Some(pred), Some(succ)) = (tour.pred(node), tour.succ(node)) else {
        // Unselected: every swap that would place `node` next to one of
        // its linked nodes.
        for &n in lists.links(node) {
            if let (Some(p), Some(s)) = (tour.pred(n), tour.succ(n)) {
                out.push(Move::InterSwap {
                    inside: p,
                    outside: node,
                });
                out.push(Move::InterSwap {
                    inside: s,
                    outside: node,
                });
            }
        }
        return;
    };

    for inside in [pred, node, succ] {
        candidate_swaps_of(tour, lists, inside, out);
    }
    // 2-opts removing an edge incident to `node`, adding a candidate edge
    // at either end.
    for (tail, head) in [(pred, node), (node, succ)] {
        for &b in lists.links(tail) {
            if tour.is_selected(b) {
                out.push(Move::EdgeExchange { a: tail, b });
            }
        }
        for &b_next in lists.links(head) {
            if let Some(b) = tour.pred(b_next) {
                out.push(Move::EdgeExchange { a: tail, b });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::Node;
    use crate::moves::MoveKey;

    fn grid(n: usize) -> Instance {
        let nodes: Vec<Node> = (0..n)
            .map(|i| Node::new((i % 4) as f64 * 7.0, (i / 4) as f64 * 5.0, (i * 3 % 7) as i64))
            .collect();
        Instance::from_nodes(&nodes).unwrap()
    }

    fn applicable_keys(nh: &Neighborhood, tour: &Tour, inst: &Instance) -> BTreeSet<MoveKey> {
        let mut moves = Vec::new();
        nh.generate(tour, &mut moves);
        moves
            .iter()
            .filter(|mv| mv.evaluate(tour, inst).is_some())
            .filter_map(|mv| mv.key(tour))
            .collect()
    }

    #[test]
    fn test_exhaustive_size() {
        let inst = grid(10);
        let tour = Tour::new(vec![0, 3, 5, 7, 9], 10).unwrap();
        let keys = applicable_keys(&Neighborhood::exhaustive(), &tour, &inst);
        let m = 5;
        let swaps = m * (10 - m);
        let two_opts = m * (m - 3) / 2;
        assert_eq!(keys.len(), swaps + two_opts);
    }

    #[test]
    fn test_exhaustive_generates_only_applicable_exchanges() {
        let inst = grid(8);
        let tour = Tour::new(vec![0, 1, 2, 3, 4, 5], 8).unwrap();
        let mut moves = Vec::new();
        Neighborhood::exhaustive().generate(&tour, &mut moves);
        for mv in moves {
            assert!(mv.evaluate(&tour, &inst).is_some(), "{mv}");
        }
    }

    #[test]
    fn test_full_candidates_equal_exhaustive() {
        let inst = grid(9);
        let tour = Tour::new(vec![8, 0, 4, 2, 6], 9).unwrap();
        let full = Neighborhood::with_candidates(&inst, 100);
        assert_eq!(full.mode(), NeighborhoodMode::Candidates { k: 8 });
        assert_eq!(
            applicable_keys(&full, &tour, &inst),
            applicable_keys(&Neighborhood::exhaustive(), &tour, &inst)
        );
    }

    #[test]
    fn test_candidate_moves_belong_to_neighborhood() {
        let inst = grid(12);
        let tour = Tour::new(vec![0, 5, 10, 3, 8, 1], 12).unwrap();
        let nh = Neighborhood::with_candidates(&inst, 3);
        let mut moves = Vec::new();
        nh.generate(&tour, &mut moves);
        assert!(!moves.is_empty());
        for mv in moves.iter().filter(|mv| mv.evaluate(&tour, &inst).is_some()) {
            assert!(nh.contains(&tour, mv), "{mv}");
        }
    }

    #[test]
    fn test_candidate_generation_is_complete() {
        // Every applicable exhaustive move passing the membership test must
        // be produced by the candidate generator.
        let inst = grid(12);
        let tour = Tour::new(vec![0, 5, 10, 3, 8, 1], 12).unwrap();
        let nh = Neighborhood::with_candidates(&inst, 3);
        let generated = applicable_keys(&nh, &tour, &inst);

        let mut all = Vec::new();
        Neighborhood::exhaustive().generate(&tour, &mut all);
        for mv in all.iter().filter(|mv| nh.contains(&tour, mv)) {
            let key = mv.key(&tour).unwrap();
            assert!(generated.contains(&key), "missing {mv}");
        }
    }

    #[test]
    fn test_around_covers_every_move_touching_node() {
        let inst = grid(12);
        let tour = Tour::new(vec![0, 5, 10, 3, 8, 1], 12).unwrap();

        for nh in [
            Neighborhood::exhaustive(),
            Neighborhood::with_candidates(&inst, 3),
        ] {
            let mut all = Vec::new();
            nh.generate(&tour, &mut all);

            for node in 0..12 {
                let mut around = Vec::new();
                nh.generate_around(&tour, node, &mut around);
                let around: BTreeSet<MoveKey> = around
                    .iter()
                    .filter(|mv| mv.evaluate(&tour, &inst).is_some())
                    .filter_map(|mv| mv.key(&tour))
                    .collect();

                for mv in all.iter().filter(|mv| mv.evaluate(&tour, &inst).is_some()) {
                    let touches = match *mv {
                        Move::InterSwap { inside, outside } => {
                            inside == node
                                || outside == node
                                || tour.pred(inside) == Some(node)
                                || tour.succ(inside) == Some(node)
                        }
                        Move::EdgeExchange { a, b } => {
                            [a, b, tour.succ(a).unwrap(), tour.succ(b).unwrap()].contains(&node)
                        }
                    };
                    if touches {
                        assert!(
                            around.contains(&mv.key(&tour).unwrap()),
                            "{:?}: {mv} not anchored at {node}",
                            nh.mode()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_contains_exhaustive_rejects_inapplicable() {
        let tour = Tour::new(vec![0, 1, 2, 3], 6).unwrap();
        let nh = Neighborhood::exhaustive();
        assert!(nh.contains(&tour, &Move::EdgeExchange { a: 0, b: 2 }));
        assert!(!nh.contains(&tour, &Move::EdgeExchange { a: 0, b: 1 }));
    }
}
