//! MSLS configuration.

use crate::descent::DescentConfig;

/// Configuration for Multi-start Local Search.
///
/// # Examples
///
/// ```
/// use u_tour_search::msls::MslsConfig;
///
/// let config = MslsConfig::default().with_starts(50).with_seed(7);
/// assert_eq!(config.starts, 50);
/// assert_eq!(config.start_node, 0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MslsConfig {
    /// Number of constructed starting tours.
    pub starts: usize,

    /// Node every constructed tour begins at.
    pub start_node: usize,

    /// Configuration of every descent.
    pub descent: DescentConfig,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for MslsConfig {
    fn default() -> Self {
        Self {
            starts: 200,
            start_node: 0,
            descent: DescentConfig::default(),
            seed: None,
        }
    }
}

impl MslsConfig {
    pub fn with_starts(mut self, n: usize) -> Self {
        self.starts = n;
        self
    }

    pub fn with_start_node(mut self, node: usize) -> Self {
        self.start_node = node;
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
        if self.starts == 0 {
            return Err("starts must be at least 1".into());
        }
        Ok(())
    }
}
