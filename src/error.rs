//! Error types for tour search.
//!
//! Only invariant violations are surfaced as errors. Stale cache entries are
//! absorbed by the descent's validity classification, and an out-of-range
//! candidate list length is clamped rather than rejected.

use thiserror::Error;

/// Main error type for tour search operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The instance data is malformed.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tour needs at least two selected nodes to form a cycle.
    #[error("tour has {len} nodes, at least 2 are required")]
    TourTooShort {
        /// Number of selected nodes.
        len: usize,
    },

    /// A node id does not exist in the instance.
    #[error("node {node} is out of range for {size} nodes")]
    NodeOutOfRange {
        /// Offending node id.
        node: usize,
        /// Number of nodes in the instance.
        size: usize,
    },

    /// A node appears more than once in the tour interior.
    #[error("node {node} appears more than once in the tour")]
    DuplicateNode {
        /// Offending node id.
        node: usize,
    },

    /// A tour position is outside `0..len`.
    #[error("position {position} is out of range for a tour of {len} nodes")]
    PositionOutOfRange {
        /// Offending position.
        position: usize,
        /// Number of selected nodes.
        len: usize,
    },

    /// The closing node differs from the first node.
    #[error("tour is not closed: starts at {first}, ends at {last}")]
    NotClosed {
        /// First node of the path.
        first: usize,
        /// Last node of the path.
        last: usize,
    },

    /// The position index disagrees with the path.
    #[error("position index out of sync for node {node}")]
    PositionMismatch {
        /// Node whose indexed position is wrong.
        node: usize,
    },

    /// A move cannot be applied to the current tour.
    #[error("move {0} is not applicable to the current tour")]
    IllegalMove(String),

    /// A cached delta disagrees with a from-scratch evaluation.
    #[error("cached delta {cached} for {mv} disagrees with evaluated delta {actual}")]
    DeltaMismatch {
        /// Rendered move.
        mv: String,
        /// Delta stored in the cache.
        cached: i64,
        /// Delta evaluated against the current tour.
        actual: i64,
    },
}

/// Result type alias for tour search operations.
pub type Result<T> = std::result::Result<T, Error>;
