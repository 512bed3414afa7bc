//! Large Neighborhood Search (LNS).
//!
//! Destroys part of the best tour by cutting out costly segments, rebuilds
//! it with greedy regret insertion, and optionally polishes the result with
//! steepest descent. Only strict improvements are kept.
//!
//! # References
//!
//! - Shaw, P. (1998). "Using Constraint Programming and Local Search Methods
//!   to Solve Vehicle Routing Problems", *CP-98*, 417-431.
//! - Ropke & Pisinger (2006), "An Adaptive Large Neighborhood Search
//!   Heuristic for the Pickup and Delivery Problem with Time Windows"
//!   (segment removal and regret insertion)

mod config;
mod destroy;
mod repair;
mod runner;

pub use config::LnsConfig;
pub use destroy::destroy;
pub use repair::repair;
pub use runner::{LnsResult, LnsRunner};
