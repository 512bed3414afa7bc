//! Iterated Local Search (ILS).
//!
//! Alternates a random perturbation of the current local optimum with a
//! steepest descent from the perturbed tour, keeping the best tour seen.
//! The perturbation reverses a few random segments and swaps one selected
//! node for an unselected one, a kick that a single 2-opt or swap descent
//! cannot undo in one move.
//!
//! # References
//!
//! - Lourenço, H.R., Martin, O.C. & Stützle, T. (2003). "Iterated Local
//!   Search", *Handbook of Metaheuristics*, 321-353.
//! - Martin, O., Otto, S.W. & Felten, E.W. (1991). "Large-step Markov chains
//!   for the traveling salesman problem", *Complex Systems* 5(3), 299-326.

mod config;
mod perturb;
mod runner;

pub use config::IlsConfig;
pub use perturb::perturb;
pub use runner::{IlsResult, IlsRunner};
