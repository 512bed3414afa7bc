//! Descent configuration.

/// Intra-route move family scanned next to the inter-route swaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntraRoute {
    /// 2-opt edge exchange.
    #[default]
    EdgeExchange,
    /// Swap of the positions of two selected nodes.
    ///
    /// Only [`GreedyDescent`](super::GreedyDescent) scans it; the cached
    /// descent rejects it.
    NodeExchange,
}

/// Configuration for [`Descent`](super::Descent).
///
/// # Examples
///
/// ```
/// use u_tour_search::descent::DescentConfig;
///
/// let config = DescentConfig::default()
///     .with_rebuild_interval(50)
///     .with_verify_deltas(true);
/// assert_eq!(config.max_moves, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentConfig {
    /// Accepted moves between full cache rebuilds. 0 = never rebuild,
    /// 1 = rebuild after every move.
    pub rebuild_interval: usize,

    /// Re-evaluate every applied move from scratch and fail on a mismatch.
    ///
    /// Costs O(M) per move; meant for tests and debugging.
    pub verify_deltas: bool,

    /// Maximum number of accepted moves. 0 = no limit.
    pub max_moves: usize,

    /// Intra-route move family.
    pub intra_route: IntraRoute,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            rebuild_interval: 25,
            verify_deltas: false,
            max_moves: 0,
            intra_route: IntraRoute::EdgeExchange,
        }
    }
}

impl DescentConfig {
    pub fn with_rebuild_interval(mut self, n: usize) -> Self {
        self.rebuild_interval = n;
        self
    }

    pub fn with_verify_deltas(mut self, verify: bool) -> Self {
        self.verify_deltas = verify;
        self
    }

    pub fn with_max_moves(mut self, n: usize) -> Self {
        self.max_moves = n;
        self
    }

    pub fn with_intra_route(mut self, intra_route: IntraRoute) -> Self {
        self.intra_route = intra_route;
        self
    }
}
