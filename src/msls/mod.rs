//! Multi-start Local Search (MSLS).
//!
//! Runs an independent steepest descent from each of many constructed
//! starting tours and keeps the best local optimum. Serves as the baseline
//! that perturbation-based searches are measured against.
//!
//! # References
//!
//! - Martí, R., Resende, M.G.C. & Ribeiro, C.C. (2013). "Multi-start
//!   methods for combinatorial optimization", *European Journal of
//!   Operational Research* 226(1), 1-8.

mod config;
mod runner;

pub use config::MslsConfig;
pub use runner::{MslsResult, MslsRunner};
