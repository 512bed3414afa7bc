//! Initial tour construction.
//!
//! Descents and perturbation wrappers obtain their starting tours through
//! [`InitialTour`], so any construction heuristic (nearest neighbor, greedy
//! cycle, regret insertion) can be plugged in. The crate ships the random
//! construction used for multi-start search.

mod random;
mod types;

pub use random::RandomTour;
pub use types::InitialTour;
