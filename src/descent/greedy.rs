//! First-improvement descent.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use super::config::{DescentConfig, IntraRoute};
use super::runner::{check_tour, DescentResult, DescentStats};
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};
use crate::moves::{node_exchange_delta, Move};
use crate::neighborhood::Neighborhood;

/// One entry of a greedy scan.
#[derive(Debug, Clone, Copy)]
enum Step {
    Move(Move),
    /// Positions of two selected nodes to swap.
    NodeExchange(usize, usize),
}

impl Step {
    fn evaluate(&self, tour: &Tour, instance: &Instance) -> Option<i64> {
        match *self {
            Step::Move(mv) => mv.evaluate(tour, instance),
            Step::NodeExchange(p, q) => node_exchange_delta(tour, instance, p, q),
        }
    }

    fn apply(&self, tour: &mut Tour) -> Result<()> {
        match *self {
            Step::Move(mv) => mv.apply(tour),
            Step::NodeExchange(p, q) => tour.swap_positions(p, q),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Move(mv) => write!(f, "{mv}"),
            Step::NodeExchange(p, q) => write!(f, "exchange(@{p}, @{q})"),
        }
    }
}

/// Descent that applies the first improving move of a shuffled scan.
///
/// Each pass enumerates the full neighborhood, shuffles it, and applies the
/// first move with a negative delta. The search ends when a whole pass
/// finds none. No moves are cached between passes, so
/// [`DescentConfig::rebuild_interval`] is ignored.
///
/// With [`IntraRoute::NodeExchange`] the neighborhood's edge exchanges are
/// replaced by swaps of every pair of tour positions.
pub struct GreedyDescent;

impl GreedyDescent {
    /// Runs first-improvement descent from `tour`.
    ///
    /// # Errors
    ///
    /// Fails if `tour` is malformed, or on a delta mismatch when
    /// [`DescentConfig::verify_deltas`] is set.
    pub fn run<R: Rng>(
        instance: &Instance,
        neighborhood: &Neighborhood,
        mut tour: Tour,
        config: &DescentConfig,
        rng: &mut R,
    ) -> Result<DescentResult> {
        check_tour(instance, &tour)?;
        let initial_cost = tour.cost(instance);
        let mut cost = initial_cost;
        let mut cost_history = vec![cost];
        let mut stats = DescentStats::default();
        let mut moves = Vec::new();
        let mut steps = Vec::new();
        let mut converged = false;

        loop {
            if config.max_moves > 0 && stats.applied >= config.max_moves {
                break;
            }

            moves.clear();
            neighborhood.generate(&tour, &mut moves);
            steps.clear();
            match config.intra_route {
                IntraRoute::EdgeExchange => steps.extend(moves.iter().map(|&mv| Step::Move(mv))),
                IntraRoute::NodeExchange => {
                    steps.extend(
                        moves
                            .iter()
                            .filter(|mv| matches!(mv, Move::InterSwap { .. }))
                            .map(|&mv| Step::Move(mv)),
                    );
                    let m = tour.len();
                    for p in 0..m {
                        steps.extend((p + 1..m).map(|q| Step::NodeExchange(p, q)));
                    }
                }
            }
            steps.shuffle(rng);

            let improving = steps.iter().find_map(|step| match step.evaluate(&tour, instance) {
                Some(delta) if delta < 0 => Some((*step, delta)),
                _ => None,
            });
            let Some((step, delta)) = improving else {
                converged = true;
                break;
            };

            step.apply(&mut tour)?;
            cost += delta;
            stats.applied += 1;
            cost_history.push(cost);

            if config.verify_deltas {
                tour.check_invariants()?;
                let full = tour.cost(instance);
                if full != cost {
                    return Err(Error::DeltaMismatch {
                        mv: step.to_string(),
                        cached: delta,
                        actual: delta + full - cost,
                    });
                }
            }
        }

        info!(
            event = "greedy_descent_end",
            cost,
            initial_cost,
            moves = stats.applied,
            intra_route = ?config.intra_route,
        );

        Ok(DescentResult {
            tour,
            cost,
            initial_cost,
            moves: stats.applied,
            converged,
            stats,
            cost_history,
        })
    }
}
