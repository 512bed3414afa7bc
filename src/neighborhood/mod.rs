//! Neighborhood generation.
//!
//! The exhaustive neighborhood lists every swap of a selected node with an
//! unselected one and every non-adjacent 2-opt. The candidate-restricted
//! neighborhood keeps only moves that add an edge between a node and one of
//! its k nearest neighbors, shrinking the scan from O(M·N) to O(N·k).
//!
//! # References
//!
//! - Johnson & McGeoch (1997), "The Traveling Salesman Problem: A Case Study
//!   in Local Optimization"

mod candidates;
mod config;
mod generator;

pub use candidates::CandidateLists;
pub use config::NeighborhoodMode;
pub use generator::Neighborhood;
