//! Neighborhood selection.

/// Which moves the neighborhood contains.
///
/// # Examples
///
/// ```
/// use u_tour_search::neighborhood::NeighborhoodMode;
///
/// let mode = NeighborhoodMode::default();
/// assert_eq!(mode, NeighborhoodMode::Candidates { k: 10 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborhoodMode {
    /// Every (selected, unselected) swap and every non-adjacent 2-opt.
    ///
    /// Size O(M·(N−M) + M²).
    Exhaustive,
    /// Only moves that add at least one candidate edge, where a candidate
    /// edge joins a node to one of its `k` nearest neighbors by
    /// `distance + cost(neighbor)`.
    ///
    /// Size O(N·k). `k` is clamped to `1..=N−1`.
    Candidates {
        /// Candidate list length per node.
        k: usize,
    },
}

impl Default for NeighborhoodMode {
    fn default() -> Self {
        NeighborhoodMode::Candidates { k: 10 }
    }
}

impl NeighborhoodMode {
    /// Validates the mode.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            NeighborhoodMode::Exhaustive => Ok(()),
            NeighborhoodMode::Candidates { k } if k == 0 => {
                Err("candidate list length must be positive".into())
            }
            NeighborhoodMode::Candidates { .. } => Ok(()),
        }
    }
}
