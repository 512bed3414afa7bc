//! Move catalog: inter-route node swaps and intra-route 2-opt exchanges.
//!
//! Every move is evaluated in O(1) from the tour's local context, without
//! touching the rest of the cycle.
//!
//! # References
//!
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//! - Gendreau, Laporte & Semet (1998), "A tabu search heuristic for the
//!   undirected selective travelling salesman problem"

mod delta;
mod types;

pub(crate) use delta::exchange_endpoints;
pub use delta::{edge_exchange_delta, inter_swap_delta, node_exchange_delta};
pub use types::{edge_key, EdgeKey, Move, MoveKey};
