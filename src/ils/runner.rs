//! ILS execution loop.
//!
//! # Algorithm
//!
//! 1. Descend from the initial tour; this is both current and best.
//! 2. Until the iteration cap or time budget is reached:
//!    a. Perturb a copy of the current tour.
//!    b. Descend from it; the result becomes the current tour.
//!    c. Keep it as best if it improves on the best cost.
//! 3. Return the best tour.
//!
//! The current tour is replaced unconditionally, so the search keeps
//! drifting instead of restarting from the incumbent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::config::IlsConfig;
use super::perturb::perturb;
use crate::descent::DescentRunner;
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};
use crate::neighborhood::Neighborhood;

/// Result of an Iterated Local Search run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    /// Best tour found.
    pub best: Tour,

    /// Cost of the best tour.
    pub best_cost: i64,

    /// Perturbation + descent rounds executed.
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

/// Executes Iterated Local Search.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs ILS from `initial`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a malformed tour.
    pub fn run(
        instance: &Instance,
        neighborhood: &Neighborhood,
        initial: Tour,
        config: &IlsConfig,
    ) -> Result<IlsResult> {
        Self::run_with_cancel(instance, neighborhood, initial, config, None)
    }

    /// Runs ILS with an optional cancellation token, checked between
    /// descents.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or a malformed tour.
    pub fn run_with_cancel(
        instance: &Instance,
        neighborhood: &Neighborhood,
        initial: Tour,
        config: &IlsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<IlsResult> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let started = Instant::now();

        let first = DescentRunner::run(instance, neighborhood, initial, &config.descent)?;
        let mut descent_moves = first.moves;
        let mut best_cost = first.cost;
        let mut best = first.tour.clone();
        let mut current = first.tour;
        let mut best_iteration = 0;
        let mut iterations = 0;
        let mut cancelled = false;
        let mut cost_history = vec![best_cost];

        info!(
            event = "ils_start",
            cost = best_cost,
            max_iterations = config.max_iterations,
            time_limit_ms = config.time_limit.map(|t| t.as_millis() as u64),
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

            let mut candidate = current.clone();
            perturb(&mut candidate, config.reversals, config.swaps, &mut rng)?;
            let result = DescentRunner::run(instance, neighborhood, candidate, &config.descent)?;
            iterations += 1;
            descent_moves += result.moves;

            if result.cost < best_cost {
                best_cost = result.cost;
                best = result.tour.clone();
                best_iteration = iterations;
                debug!(event = "ils_improved", iteration = iterations, cost = best_cost);
            }
            current = result.tour;
            cost_history.push(best_cost);
        }

        info!(
            event = "ils_end",
            cost = best_cost,
            iterations,
            best_iteration,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(IlsResult {
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
