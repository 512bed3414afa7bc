//! MSLS execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::config::MslsConfig;
use crate::construction::InitialTour;
use crate::descent::DescentRunner;
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};
use crate::neighborhood::Neighborhood;

/// Result of a Multi-start Local Search run.
#[derive(Debug, Clone)]
pub struct MslsResult {
    /// Best local optimum found.
    pub best: Tour,

    /// Cost of the best tour.
    pub best_cost: i64,

    /// Descents completed.
    pub starts: usize,

    /// Index of the start that produced the best tour.
    pub best_start: usize,

    /// Mean local optimum cost over all starts.
    pub mean_cost: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Local optimum cost of each start.
    pub cost_history: Vec<i64>,
}

/// Executes Multi-start Local Search.
pub struct MslsRunner;

impl MslsRunner {
    /// Runs MSLS, building each start with `construction`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, or when `construction` or a
    /// descent fails.
    pub fn run<C: InitialTour>(
        instance: &Instance,
        neighborhood: &Neighborhood,
        construction: &C,
        config: &MslsConfig,
    ) -> Result<MslsResult> {
        Self::run_with_cancel(instance, neighborhood, construction, config, None)
    }

    /// Runs MSLS with an optional cancellation token, checked between
    /// starts. At least one start always completes.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with_cancel<C: InitialTour>(
        instance: &Instance,
        neighborhood: &Neighborhood,
        construction: &C,
        config: &MslsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<MslsResult> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let started = Instant::now();
        let mut best: Option<(Tour, i64, usize)> = None;
        let mut cost_history = Vec::with_capacity(config.starts);
        let mut cancelled = false;

        for start in 0..config.starts {
            if start > 0 {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
            }

            let tour = construction.initial_tour(instance, config.start_node, &mut rng)?;
            let result = DescentRunner::run(instance, neighborhood, tour, &config.descent)?;
            cost_history.push(result.cost);

            if best.as_ref().is_none_or(|&(_, cost, _)| result.cost < cost) {
                debug!(event = "msls_improved", start, cost = result.cost);
                best = Some((result.tour, result.cost, start));
            }
        }

        let Some((best, best_cost, best_start)) = best else {
            return Err(Error::InvalidConfig("no start completed".into()));
        };
        let mean_cost =
            cost_history.iter().map(|&c| c as f64).sum::<f64>() / cost_history.len() as f64;

        info!(
            event = "msls_end",
            cost = best_cost,
            starts = cost_history.len(),
            best_start,
            mean_cost,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(MslsResult {
            best,
            best_cost,
            starts: cost_history.len(),
            best_start,
            mean_cost,
            cancelled,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::RandomTour;
    use crate::descent::DescentConfig;
    use crate::model::Node;

    fn grid(n: usize) -> Instance {
        let nodes: Vec<Node> = (0..n)
            .map(|i| {
                Node::new(
                    (i % 6) as f64 * 40.0 + (i * 13 % 7) as f64,
                    (i / 6) as f64 * 40.0,
                    (i * 17 % 60) as i64,
                )
            })
            .collect();
        Instance::from_nodes(&nodes).unwrap()
    }

    #[test]
    fn test_msls_best_is_minimum_of_starts() {
        let inst = grid(30);
        let nh = Neighborhood::with_candidates(&inst, 6);
        let config = MslsConfig::default().with_starts(15).with_seed(42);
        let result = MslsRunner::run(&inst, &nh, &RandomTour, &config).unwrap();

        assert_eq!(result.starts, 15);
        assert_eq!(result.cost_history.len(), 15);
        assert_eq!(Some(&result.best_cost), result.cost_history.iter().min());
        assert_eq!(result.cost_history[result.best_start], result.best_cost);
        assert_eq!(result.best.cost(&inst), result.best_cost);
        assert!(result.mean_cost >= result.best_cost as f64);
    }

    #[test]
    fn test_msls_start_node_respected() {
        let inst = grid(18);
        let nh = Neighborhood::exhaustive();
        let config = MslsConfig::default()
            .with_starts(3)
            .with_start_node(5)
            .with_descent(DescentConfig::default().with_verify_deltas(true))
            .with_seed(1);
        let result = MslsRunner::run(&inst, &nh, &RandomTour, &config).unwrap();
        assert!(result.best.check_invariants().is_ok());
        assert_eq!(result.best.len(), 9);
    }

    #[test]
    fn test_msls_cancellation_keeps_first_start() {
        let inst = grid(18);
        let nh = Neighborhood::exhaustive();
        let config = MslsConfig::default().with_starts(50).with_seed(1);
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            MslsRunner::run_with_cancel(&inst, &nh, &RandomTour, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.starts, 1);
    }

    #[test]
    fn test_msls_bad_start_node() {
        let inst = grid(10);
        let nh = Neighborhood::exhaustive();
        let config = MslsConfig::default().with_starts(2).with_start_node(10);
        assert!(matches!(
            MslsRunner::run(&inst, &nh, &RandomTour, &config),
            Err(Error::NodeOutOfRange { .. })
        ));
    }
}
