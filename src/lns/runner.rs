//! LNS execution loop.
//!
//! # Algorithm
//!
//! 1. Descend from the initial tour; the result is the incumbent.
//! 2. Until the iteration cap or time budget is reached:
//!    a. Remove costly segments from the incumbent.
//!    b. Reinsert nodes by weighted regret until the tour is whole again.
//!    c. Optionally descend from the repaired tour.
//!    d. Replace the incumbent if the result is strictly cheaper.
//! 3. Return the incumbent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::config::LnsConfig;
use super::destroy::destroy;
use super::repair::repair;
use crate::descent::DescentRunner;
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};
use crate::neighborhood::Neighborhood;

/// Result of a Large Neighborhood Search run.
#[derive(Debug, Clone)]
pub struct LnsResult {
    /// Best tour found.
    pub best: Tour,

    /// Cost of the best tour.
    pub best_cost: i64,

    /// Destroy + repair rounds executed.
    pub iterations: usize,

    /// Round in which the best tour was found (0 = initial descent).
    pub best_iteration: usize,

    /// Accepted descent moves over all rounds.
    pub descent_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost after each round, starting with the initial descent.
    pub cost_history: Vec<i64>,
}

/// Executes Large Neighborhood Search.
pub struct LnsRunner;

impl LnsRunner {
    /// Runs LNS from `initial`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a malformed tour.
    pub fn run(
        instance: &Instance,
        neighborhood: &Neighborhood,
        initial: Tour,
        config: &LnsConfig,
    ) -> Result<LnsResult> {
        Self::run_with_cancel(instance, neighborhood, initial, config, None)
    }

    /// Runs LNS with an optional cancellation token, checked between
    /// rounds.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a malformed tour.
    pub fn run_with_cancel(
        instance: &Instance,
        neighborhood: &Neighborhood,
        initial: Tour,
        config: &LnsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LnsResult> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let started = Instant::now();

        let first = DescentRunner::run(instance, neighborhood, initial, &config.descent)?;
        let mut descent_moves = first.moves;
        let mut best_cost = first.cost;
        let mut best = first.tour;
        let mut best_iteration = 0;
        let mut iterations = 0;
        let mut cancelled = false;
        let mut cost_history = vec![best_cost];

        info!(
            event = "lns_start",
            cost = best_cost,
            max_iterations = config.max_iterations,
            time_limit_ms = config.time_limit.map(|t| t.as_millis() as u64),
            remove_fraction = config.remove_fraction,
            local_search = config.local_search_after_repair,
        );

        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break;
            }
            if config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                break;
            }

            let partial = destroy(
                &best,
                instance,
                config.remove_fraction,
                config.segment_length,
                &mut rng,
            );
            trace!(
                event = "lns_destroy",
                iteration = iterations,
                removed = best.len() - partial.len(),
            );
            let repaired = repair(
                instance,
                partial,
                best.len(),
                config.score_weight,
                config.regret_weight,
            )?;

            let (candidate, cost) = if config.local_search_after_repair {
                let result = DescentRunner::run(instance, neighborhood, repaired, &config.descent)?;
                descent_moves += result.moves;
                (result.tour, result.cost)
            } else {
                let cost = repaired.cost(instance);
                (repaired, cost)
            };
            iterations += 1;

            if cost < best_cost {
                best_cost = cost;
                best = candidate;
                best_iteration = iterations;
                debug!(event = "lns_improved", iteration = iterations, cost = best_cost);
            }
            cost_history.push(best_cost);
        }

        info!(
            event = "lns_end",
            cost = best_cost,
            iterations,
            best_iteration,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(LnsResult {
            best,
            best_cost,
            iterations,
            best_iteration,
            descent_moves,
            cancelled,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{InitialTour, RandomTour};
    use crate::descent::steepest_descent;
    use crate::model::Node;

    fn clustered(n: usize) -> Instance {
        let nodes: Vec<Node> = (0..n)
            .map(|i| {
                let cluster = (i % 4) as f64;
                let jitter = (i * 7919 % 97) as f64;
                Node::new(
                    cluster * 300.0 + jitter,
                    (i * 104729 % 89) as f64 + cluster * 50.0,
                    (i * 31 % 50) as i64,
                )
            })
            .collect();
        Instance::from_nodes(&nodes).unwrap()
    }

    fn start(inst: &Instance) -> Tour {
        RandomTour
            .initial_tour(inst, 0, &mut StdRng::seed_from_u64(17))
            .unwrap()
    }

    #[test]
    fn test_lns_best_cost_never_rises() {
        let inst = clustered(40);
        let nh = Neighborhood::with_candidates(&inst, 8);
        let config = LnsConfig::default().with_max_iterations(25).with_seed(42);
        let result = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();

        assert_eq!(result.iterations, 25);
        assert_eq!(result.cost_history.len(), 26);
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0], "best cost rose from {} to {}", w[0], w[1]);
        }
        assert_eq!(result.best_cost, *result.cost_history.last().unwrap());
        assert_eq!(result.best_cost, result.best.cost(&inst));
        assert_eq!(result.best.len(), inst.selection_size());
        assert!(result.best.check_invariants().is_ok());
    }

    #[test]
    fn test_lns_never_worse_than_single_descent() {
        let inst = clustered(36);
        let nh = Neighborhood::exhaustive();
        let single = steepest_descent(&inst, &nh, start(&inst)).unwrap();
        let config = LnsConfig::default().with_max_iterations(15).with_seed(7);
        let result = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();
        assert!(result.best_cost <= single.cost(&inst));
    }

    #[test]
    fn test_lns_without_local_search() {
        let inst = clustered(40);
        let nh = Neighborhood::with_candidates(&inst, 6);
        let config = LnsConfig::default()
            .with_max_iterations(20)
            .with_local_search_after_repair(false)
            .with_seed(3);
        let result = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();

        let single = steepest_descent(&inst, &nh, start(&inst)).unwrap();
        assert_eq!(result.cost_history[0], single.cost(&inst));
        assert!(result.best_cost <= result.cost_history[0]);
        assert_eq!(result.best_cost, result.best.cost(&inst));
        assert_eq!(result.best.len(), inst.selection_size());
    }

    #[test]
    fn test_lns_reproducible_with_seed() {
        let inst = clustered(30);
        let nh = Neighborhood::with_candidates(&inst, 5);
        let config = LnsConfig::default().with_max_iterations(10).with_seed(5);
        let a = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();
        let b = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_lns_time_limit() {
        let inst = clustered(30);
        let nh = Neighborhood::with_candidates(&inst, 5);
        let config = LnsConfig::default()
            .with_max_iterations(0)
            .with_time_limit(std::time::Duration::from_millis(50))
            .with_seed(3);
        let started = Instant::now();
        let result = LnsRunner::run(&inst, &nh, start(&inst), &config).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert!(!result.cancelled);
    }

    #[test]
    fn test_lns_cancellation() {
        let inst = clustered(20);
        let nh = Neighborhood::exhaustive();
        let config = LnsConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            LnsRunner::run_with_cancel(&inst, &nh, start(&inst), &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_lns_invalid_config() {
        let inst = clustered(20);
        let nh = Neighborhood::exhaustive();
        let config = LnsConfig::default().with_remove_fraction(1.5);
        assert!(matches!(
            LnsRunner::run(&inst, &nh, start(&inst), &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
