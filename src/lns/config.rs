//! LNS configuration.

use std::time::Duration;

use crate::descent::DescentConfig;

/// Configuration for Large Neighborhood Search.
///
/// At least one of `max_iterations` and `time_limit` must bound the run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour_search::lns::LnsConfig;
///
/// let config = LnsConfig::default()
///     .with_time_limit(Duration::from_secs(1))
///     .with_remove_fraction(0.2)
///     .with_local_search_after_repair(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.segment_length, 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LnsConfig {
    /// Maximum number of destroy + repair rounds. 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget, checked between rounds.
    pub time_limit: Option<Duration>,

    /// Share of the tour positions to remove, in `[0, 1)`.
    pub remove_fraction: f64,

    /// Consecutive positions per removed segment.
    pub segment_length: usize,

    /// Run steepest descent on every repaired tour.
    pub local_search_after_repair: bool,

    /// Weight of the best insertion cost in the repair score.
    pub score_weight: f64,

    /// Weight of the 2-regret in the repair score.
    pub regret_weight: f64,

    /// Configuration of every descent.
    pub descent: DescentConfig,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            time_limit: None,
            remove_fraction: 0.3,
            segment_length: 5,
            local_search_after_repair: true,
            score_weight: 0.5,
            regret_weight: 0.5,
            descent: DescentConfig::default(),
            seed: None,
        }
    }
}

impl LnsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_remove_fraction(mut self, fraction: f64) -> Self {
        self.remove_fraction = fraction;
        self
    }

    pub fn with_segment_length(mut self, n: usize) -> Self {
        self.segment_length = n;
        self
    }

    pub fn with_local_search_after_repair(mut self, enabled: bool) -> Self {
        self.local_search_after_repair = enabled;
        self
    }

    pub fn with_weights(mut self, score: f64, regret: f64) -> Self {
        self.score_weight = score;
        self.regret_weight = regret;
        self
    }

    pub fn with_descent(mut self, descent: DescentConfig) -> Self {
        self.descent = descent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 && self.time_limit.is_none() {
            return Err("either max_iterations or time_limit must bound the search".into());
        }
        if !(0.0..1.0).contains(&self.remove_fraction) {
            return Err(format!(
                "remove_fraction must be in [0, 1), got {}",
                self.remove_fraction
            ));
        }
        if self.segment_length == 0 {
            return Err("segment_length must be at least 1".into());
        }
        if !self.score_weight.is_finite() || !self.regret_weight.is_finite() {
            return Err("repair weights must be finite".into());
        }
        Ok(())
    }
}
