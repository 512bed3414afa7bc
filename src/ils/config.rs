//! ILS configuration.

use std::time::Duration;

use crate::descent::DescentConfig;

/// Configuration for Iterated Local Search.
///
/// At least one of `max_iterations` and `time_limit` must bound the run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour_search::ils::IlsConfig;
///
/// let config = IlsConfig::default()
///     .with_max_iterations(0)
///     .with_time_limit(Duration::from_secs(2))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsConfig {
    /// Maximum number of perturbation + descent rounds. 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget, checked between descents.
    pub time_limit: Option<Duration>,

    /// Random segment reversals per perturbation.
    pub reversals: usize,

    /// Random selected/unselected swaps per perturbation.
    pub swaps: usize,

    /// Configuration of every descent.
    pub descent: DescentConfig,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            time_limit: None,
            reversals: 5,
            swaps: 1,
            descent: DescentConfig::default(),
            seed: None,
        }
    }
}

impl IlsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_reversals(mut self, n: usize) -> Self {
        self.reversals = n;
        self
    }

    pub fn with_swaps(mut self, n: usize) -> Self {
        self.swaps = n;
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
        if self.reversals == 0 && self.swaps == 0 {
            return Err("perturbation must contain at least one reversal or swap".into());
        }
        Ok(())
    }
}
