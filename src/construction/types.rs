//! Construction heuristic trait.

use rand::Rng;

use crate::error::Result;
use crate::model::{Instance, Tour};

/// Builds a starting tour for a descent.
///
/// Implementations select [`Instance::selection_size`] distinct nodes,
/// the first of which is `start`.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tour_search::construction::InitialTour;
/// use u_tour_search::model::{Instance, Tour};
/// use u_tour_search::Result;
///
/// /// Takes `start` and the nodes following it by id.
/// struct Consecutive;
///
/// impl InitialTour for Consecutive {
///     fn initial_tour<R: Rng>(&self, instance: &Instance, start: usize, _rng: &mut R) -> Result<Tour> {
///         let n = instance.len();
///         let nodes = (0..instance.selection_size()).map(|i| (start + i) % n).collect();
///         Tour::new(nodes, n)
///     }
/// }
/// ```
pub trait InitialTour {
    /// Builds a tour beginning at `start`.
    ///
    /// # Errors
    ///
    /// Fails when `start` is not a node of `instance` or the instance is too
    /// small to form a tour.
    fn initial_tour<R: Rng>(&self, instance: &Instance, start: usize, rng: &mut R) -> Result<Tour>;
}
