//! Steepest-descent execution loop.

use tracing::{debug, info, trace};

use super::cache::MoveCache;
use super::config::{DescentConfig, IntraRoute};
use super::record::{CachedMove, Validity};
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};
use crate::moves::Move;
use crate::neighborhood::Neighborhood;

/// Lifecycle of a [`Descent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescentPhase {
    /// Created; the cache has not been built yet.
    Initialized,
    /// At least one step has run and improving moves may remain.
    Searching,
    /// No improving move remains: the tour is a local optimum.
    Converged,
}

/// Counters describing how cached records were handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescentStats {
    /// Records applied.
    pub applied: usize,
    /// Records discarded as invalid.
    pub removed: usize,
    /// Records re-evaluated against the current tour.
    pub recalculated: usize,
    /// Records set aside.
    pub skipped: usize,
    /// Periodic full rebuilds of the cache.
    pub rebuilds: usize,
}

/// Result of a steepest-descent run.
#[derive(Debug, Clone)]
pub struct DescentResult {
    /// The final tour.
    pub tour: Tour,

    /// Cost of the final tour.
    pub cost: i64,

    /// Cost of the starting tour.
    pub initial_cost: i64,

    /// Number of accepted moves.
    pub moves: usize,

    /// Whether the run ended in a local optimum rather than on the move
    /// limit.
    pub converged: bool,

    /// Record handling counters.
    pub stats: DescentStats,

    /// Cost after each accepted move, starting with the initial cost.
    pub cost_history: Vec<i64>,
}

/// Incremental steepest descent over one tour.
///
/// Improving moves are kept in a [`MoveCache`] across iterations. After an
/// accepted move only the moves anchored at the nodes whose tour context
/// changed are regenerated; stale records left in the cache are resolved by
/// [`CachedMove::classify`] when they reach the front.
///
/// Records whose edges were reversed together are parked and offered again
/// after the next accepted move. Regeneration around a reversed segment
/// usually re-keys such records first, so parking rarely happens in a plain
/// run; it matters for records outside the regenerated area.
///
/// # Examples
///
/// ```
/// use u_tour_search::descent::{Descent, DescentConfig, DescentPhase};
/// use u_tour_search::model::{Instance, Node, Tour};
/// use u_tour_search::neighborhood::Neighborhood;
///
/// let inst = Instance::from_nodes(&[
///     Node::new(0.0, 0.0, 0),
///     Node::new(0.0, 10.0, 0),
///     Node::new(10.0, 10.0, 0),
///     Node::new(10.0, 0.0, 0),
/// ]).unwrap();
/// let nh = Neighborhood::exhaustive();
/// let tour = Tour::new(vec![0, 2, 1, 3], 4).unwrap();
///
/// let mut descent = Descent::new(&inst, &nh, tour, DescentConfig::default()).unwrap();
/// while descent.step().unwrap().is_some() {}
/// assert_eq!(descent.phase(), DescentPhase::Converged);
/// assert_eq!(descent.cost(), 40);
/// ```
pub struct Descent<'a> {
    instance: &'a Instance,
    neighborhood: &'a Neighborhood,
    config: DescentConfig,
    tour: Tour,
    cost: i64,
    initial_cost: i64,
    cache: MoveCache,
    phase: DescentPhase,
    moves: usize,
    since_rebuild: usize,
    stats: DescentStats,
    cost_history: Vec<i64>,
    scratch: Vec<Move>,
}

impl<'a> Descent<'a> {
    /// Prepares a descent starting from `tour`.
    ///
    /// # Errors
    ///
    /// Fails if the tour violates its invariants or was built for a
    /// different number of nodes than `instance` has, and with
    /// [`Error::InvalidConfig`] for [`IntraRoute::NodeExchange`], which only
    /// [`GreedyDescent`](super::GreedyDescent) supports.
    pub fn new(
        instance: &'a Instance,
        neighborhood: &'a Neighborhood,
        tour: Tour,
        config: DescentConfig,
    ) -> Result<Self> {
        check_tour(instance, &tour)?;
        if config.intra_route != IntraRoute::EdgeExchange {
            return Err(Error::InvalidConfig(
                "steepest descent caches edge exchanges only".into(),
            ));
        }
        let cost = tour.cost(instance);
        Ok(Self {
            instance,
            neighborhood,
            config,
            tour,
            cost,
            initial_cost: cost,
            cache: MoveCache::new(),
            phase: DescentPhase::Initialized,
            moves: 0,
            since_rebuild: 0,
            stats: DescentStats::default(),
            cost_history: vec![cost],
            scratch: Vec::new(),
        })
    }

    pub fn phase(&self) -> DescentPhase {
        self.phase
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Current tour cost, maintained from move deltas.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn stats(&self) -> DescentStats {
        self.stats
    }

    /// Number of records currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Applies the best valid improving move.
    ///
    /// Returns the applied move, or `None` once the descent has converged or
    /// reached its move limit.
    ///
    /// # Errors
    ///
    /// Fails on an invariant violation, or on a delta mismatch when
    /// [`DescentConfig::verify_deltas`] is set.
    pub fn step(&mut self) -> Result<Option<Move>> {
        match self.phase {
            DescentPhase::Converged => return Ok(None),
            DescentPhase::Initialized => {
                info!(
                    event = "descent_start",
                    cost = self.cost,
                    selected = self.tour.len(),
                    nodes = self.instance.len(),
                    neighborhood = ?self.neighborhood.mode(),
                );
                self.rebuild();
                self.phase = DescentPhase::Searching;
            }
            DescentPhase::Searching => {}
        }

        if self.config.max_moves > 0 && self.moves >= self.config.max_moves {
            return Ok(None);
        }

        while let Some(record) = self.cache.pop_best() {
            let validity = record.classify(&self.tour);
            trace!(
                event = "classify",
                mv = %record.mv,
                delta = record.delta,
                validity = ?validity,
            );
            match validity {
                Validity::InvalidRemove => self.stats.removed += 1,
                Validity::ValidSkip => {
                    self.stats.skipped += 1;
                    self.cache.park(record);
                }
                Validity::Recalculate => {
                    self.stats.recalculated += 1;
                    let mv = record.recalculated(&self.tour);
                    if self.neighborhood.contains(&self.tour, &mv) {
                        self.cache.offer_move(mv, &self.tour, self.instance);
                    }
                }
                Validity::ValidApply => {
                    self.apply(&record)?;
                    return Ok(Some(record.mv));
                }
            }
        }

        self.phase = DescentPhase::Converged;
        info!(
            event = "descent_end",
            cost = self.cost,
            initial_cost = self.initial_cost,
            moves = self.moves,
            rebuilds = self.stats.rebuilds,
        );
        Ok(None)
    }

    /// Runs to convergence or the move limit.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`step`](Self::step).
    pub fn run(mut self) -> Result<DescentResult> {
        while self.step()?.is_some() {}
        Ok(self.into_result())
    }

    /// Final state without running further.
    pub fn into_result(self) -> DescentResult {
        DescentResult {
            converged: self.phase == DescentPhase::Converged,
            tour: self.tour,
            cost: self.cost,
            initial_cost: self.initial_cost,
            moves: self.moves,
            stats: self.stats,
            cost_history: self.cost_history,
        }
    }

    fn apply(&mut self, record: &CachedMove) -> Result<()> {
        if self.config.verify_deltas {
            let actual = record
                .mv
                .evaluate(&self.tour, self.instance)
                .ok_or_else(|| Error::IllegalMove(record.mv.to_string()))?;
            if actual != record.delta {
                return Err(Error::DeltaMismatch {
                    mv: record.mv.to_string(),
                    cached: record.delta,
                    actual,
                });
            }
        }

        let affected = affected_nodes(&self.tour, &record.mv);
        record.mv.apply(&mut self.tour)?;
        self.cost += record.delta;
        self.moves += 1;
        self.since_rebuild += 1;
        self.stats.applied += 1;
        self.cost_history.push(self.cost);

        if self.config.verify_deltas {
            self.tour.check_invariants()?;
            let full = self.tour.cost(self.instance);
            if full != self.cost {
                return Err(Error::DeltaMismatch {
                    mv: record.mv.to_string(),
                    cached: record.delta,
                    actual: record.delta + full - self.cost,
                });
            }
        }

        if self.config.rebuild_interval > 0 && self.since_rebuild >= self.config.rebuild_interval {
            self.stats.rebuilds += 1;
            self.rebuild();
            return Ok(());
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        for node in affected {
            scratch.clear();
            self.neighborhood
                .generate_around(&self.tour, node, &mut scratch);
            for &mv in &scratch {
                self.cache.offer_move(mv, &self.tour, self.instance);
            }
        }
        self.scratch = scratch;
        self.cache.restore_parked();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.cache.clear();
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        self.neighborhood.generate(&self.tour, &mut scratch);
        for &mv in &scratch {
            self.cache.offer_move(mv, &self.tour, self.instance);
        }
        self.scratch = scratch;
        self.since_rebuild = 0;
        debug!(
            event = "cache_rebuilt",
            moves = self.moves,
            cached = self.cache.len(),
            cost = self.cost,
        );
    }
}

/// Checks that `tour` is well formed and built over `instance`'s nodes.
pub(crate) fn check_tour(instance: &Instance, tour: &Tour) -> Result<()> {
    tour.check_invariants()?;
    if tour.universe() != instance.len() {
        return Err(Error::InvalidInstance(format!(
            "tour spans {} nodes, instance has {}",
            tour.universe(),
            instance.len()
        )));
    }
    Ok(())
}

/// Nodes whose tour context changes when `mv` is applied to `tour`.
///
/// For a swap: the leaving and entering nodes and the two neighbors. For an
/// exchange: the reversed segment, the tails bounding it, and their outer
/// neighbors.
fn affected_nodes(tour: &Tour, mv: &Move) -> Vec<usize> {
    let mut nodes = match *mv {
        Move::InterSwap { inside, outside } => {
            let mut nodes = vec![inside, outside];
            nodes.extend(tour.pred(inside));
            nodes.extend(tour.succ(inside));
            nodes
        }
        Move::EdgeExchange { a, b } => {
            let (Some(pa), Some(pb)) = (tour.position_of(a), tour.position_of(b)) else {
                return Vec::new();
            };
            let (p1, p2) = if pa < pb { (pa, pb) } else { (pb, pa) };
            (p1..=p2 + 2)
                .map(|pos| tour.node_at(pos))
                .chain(std::iter::once(tour.node_at(tour.prev_pos(p1))))
                .collect()
        }
    };
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Drives a [`Descent`] to convergence.
pub struct DescentRunner;

impl DescentRunner {
    /// Runs steepest descent from `tour`.
    ///
    /// # Errors
    ///
    /// Fails if `tour` is malformed or an invariant is violated during the
    /// search.
    pub fn run(
        instance: &Instance,
        neighborhood: &Neighborhood,
        tour: Tour,
        config: &DescentConfig,
    ) -> Result<DescentResult> {
        Descent::new(instance, neighborhood, tour, *config)?.run()
    }
}

/// Runs steepest descent with the default configuration and returns the
/// local optimum.
///
/// # Errors
///
/// See [`DescentRunner::run`].
pub fn steepest_descent(
    instance: &Instance,
    neighborhood: &Neighborhood,
    tour: Tour,
) -> Result<Tour> {
    DescentRunner::run(instance, neighborhood, tour, &DescentConfig::default())
        .map(|result| result.tour)
}
