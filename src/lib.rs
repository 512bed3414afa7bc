//! Incremental local search for the selective Traveling Salesman Problem.
//!
//! Given N points with visiting costs, choose ⌈N/2⌉ of them and order them
//! into a closed cycle minimizing total edge length plus the visiting costs
//! of the chosen points.
//!
//! - **Model**: precomputed rounded-Euclidean [`Instance`](model::Instance)
//!   and the mutable [`Tour`](model::Tour) with O(1) position lookup.
//! - **Moves**: inter-route node swap and 2-opt edge exchange, each
//!   evaluated in O(1).
//! - **Neighborhood**: exhaustive, or restricted to k-nearest candidate
//!   lists.
//! - **Descent**: steepest descent that keeps improving moves in an ordered
//!   cache across iterations and repairs it after each move, plus a
//!   first-improvement variant.
//! - **Construction**: pluggable starting tours, with a random builder.
//! - **ILS / MSLS / LNS**: iterated, multi-start, and destroy/repair
//!   search on top of the descent.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_tour_search::construction::{InitialTour, RandomTour};
//! use u_tour_search::descent::steepest_descent;
//! use u_tour_search::model::{Instance, Node};
//! use u_tour_search::neighborhood::{Neighborhood, NeighborhoodMode};
//!
//! let nodes: Vec<Node> = (0..12)
//!     .map(|i| Node::new((i * 37 % 100) as f64, (i * 61 % 100) as f64, i as i64))
//!     .collect();
//! let instance = Instance::from_nodes(&nodes).unwrap();
//! let neighborhood = Neighborhood::new(&instance, NeighborhoodMode::Candidates { k: 5 });
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let start = RandomTour.initial_tour(&instance, 0, &mut rng).unwrap();
//! let initial_cost = start.cost(&instance);
//!
//! let tour = steepest_descent(&instance, &neighborhood, start).unwrap();
//! assert_eq!(tour.len(), 6);
//! assert!(tour.cost(&instance) <= initial_cost);
//! ```
//!
//! # Logging
//!
//! Progress is reported through `tracing` events; the crate installs no
//! subscriber.

pub mod construction;
pub mod descent;
pub mod error;
pub mod ils;
pub mod lns;
pub mod model;
pub mod moves;
pub mod msls;
pub mod neighborhood;

pub use error::{Error, Result};
