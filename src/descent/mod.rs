//! Incremental steepest descent.
//!
//! Repeatedly applies the best improving move of the neighborhood until none
//! remains. Rather than rescanning the neighborhood after every move, the
//! descent keeps the improving moves in an ordered cache and repairs it.
//!
//! # Algorithm
//!
//! 1. Build the cache from the full neighborhood.
//! 2. Pop the best record and classify it against the current tour:
//!    - invalid: discard;
//!    - shifted context: re-evaluate and re-insert if still improving;
//!    - edges reversed together: set aside until the next accepted move;
//!    - exact: apply it, then regenerate the moves anchored at every node
//!      whose neighbors changed.
//! 3. Every `rebuild_interval` accepted moves, rebuild the cache from
//!    scratch.
//! 4. Stop when the cache holds no improving move.
//!
//! Ties between equal deltas are broken by [`MoveKey`](crate::moves::MoveKey),
//! so the incremental search follows exactly the path of a search that
//! rebuilds after every move.
//!
//! # References
//!
//! - Lin & Kernighan (1973), "An Effective Heuristic Algorithm for the
//!   Traveling-Salesman Problem" (don't-look bits and neighbor lists)
//! - Bentley (1992), "Fast Algorithms for Geometric Traveling Salesman
//!   Problems"

mod cache;
mod config;
mod greedy;
mod record;
mod runner;

pub use cache::MoveCache;
pub use config::{DescentConfig, IntraRoute};
pub use greedy::GreedyDescent;
pub use record::{CachedMove, MoveContext, TrackedEdge, Validity};
pub use runner::{
    steepest_descent, Descent, DescentPhase, DescentResult, DescentRunner, DescentStats,
};
