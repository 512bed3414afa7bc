//! Problem data and solution representation.
//!
//! - [`Instance`]: immutable distance matrix and visiting costs, shared
//!   read-only by every search.
//! - [`Tour`]: the mutable closed cycle owned by a single search.

mod instance;
mod tour;

pub use instance::{Instance, Node};
pub use tour::Tour;
