//! Uniform random construction.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::InitialTour;
use crate::error::{Error, Result};
use crate::model::{Instance, Tour};

/// Picks a uniformly random subset of the required size, in random order,
/// beginning at the start node.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTour;

impl InitialTour for RandomTour {
    fn initial_tour<R: Rng>(&self, instance: &Instance, start: usize, rng: &mut R) -> Result<Tour> {
        let n = instance.len();
        if start >= n {
            return Err(Error::NodeOutOfRange {
                node: start,
                size: n,
            });
        }

        let mut others: Vec<usize> = (0..n).filter(|&node| node != start).collect();
        others.shuffle(rng);
        others.truncate(instance.selection_size().saturating_sub(1));

        let mut nodes = Vec::with_capacity(others.len() + 1);
        nodes.push(start);
        nodes.append(&mut others);
        Tour::new(nodes, n)
    }
}
