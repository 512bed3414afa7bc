//! Cached move records and their validity classification.

use crate::model::{Instance, Tour};
use crate::moves::{exchange_endpoints, Move, MoveKey};

/// Outcome of checking a cached record against the current tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    /// A structural precondition no longer holds; discard the record.
    InvalidRemove,
    /// The captured context matches exactly; the cached delta is exact.
    ValidApply,
    /// The move's nodes are still in place but their surroundings moved;
    /// re-evaluate from the current tour.
    Recalculate,
    /// Both tracked edges exist but were reversed together; set the record
    /// aside until the next accepted move.
    ValidSkip,
}

/// A tour edge as seen when a record was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackedEdge {
    /// Node the edge leaves in traversal order.
    pub tail: usize,
    /// Node the edge enters.
    pub head: usize,
    /// Position of `tail`.
    pub position: usize,
}

/// Direction in which a tracked edge is currently traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reversed,
    Missing,
}

impl TrackedEdge {
    fn capture(tour: &Tour, tail: usize, head: usize) -> Option<Self> {
        Some(Self {
            tail,
            head,
            position: tour.position_of(tail)?,
        })
    }

    fn direction(&self, tour: &Tour) -> Direction {
        if tour.has_arc(self.tail, self.head) {
            Direction::Forward
        } else if tour.has_arc(self.head, self.tail) {
            Direction::Reversed
        } else {
            Direction::Missing
        }
    }

    /// Tail of the edge in the current traversal direction.
    fn current_tail(&self, tour: &Tour) -> usize {
        match self.direction(tour) {
            Direction::Reversed => self.head,
            _ => self.tail,
        }
    }
}

/// Tour context a record's delta was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveContext {
    /// Context of [`Move::InterSwap`].
    InterSwap {
        /// Position of the inside node.
        position: usize,
        /// Predecessor of the inside node.
        pred: usize,
        /// Successor of the inside node.
        succ: usize,
    },
    /// Context of [`Move::EdgeExchange`]: the two removed edges.
    EdgeExchange {
        /// Edge leaving `a`.
        first: TrackedEdge,
        /// Edge leaving `b`.
        second: TrackedEdge,
    },
}

/// A move with its delta, key, and the context it was evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedMove {
    /// The move.
    pub mv: Move,
    /// Cost change at capture time.
    pub delta: i64,
    /// Deduplication key.
    pub key: MoveKey,
    /// Captured context.
    pub context: MoveContext,
}

impl CachedMove {
    /// Evaluates `mv` on `tour` and records its context.
    ///
    /// Returns `None` if the move is not applicable.
    pub fn capture(mv: Move, tour: &Tour, instance: &Instance) -> Option<Self> {
        let delta = mv.evaluate(tour, instance)?;
        let key = mv.key(tour)?;
        let context = match mv {
            Move::InterSwap { inside, .. } => {
                let position = tour.position_of(inside)?;
                MoveContext::InterSwap {
                    position,
                    pred: tour.pred(inside)?,
                    succ: tour.succ(inside)?,
                }
            }
            Move::EdgeExchange { a, b } => {
                let (a, a_next, b, b_next) = exchange_endpoints(tour, a, b)?;
                MoveContext::EdgeExchange {
                    first: TrackedEdge::capture(tour, a, a_next)?,
                    second: TrackedEdge::capture(tour, b, b_next)?,
                }
            }
        };
        Some(Self {
            mv,
            delta,
            key,
            context,
        })
    }

    /// Checks the record against the current tour.
    pub fn classify(&self, tour: &Tour) -> Validity {
        match (self.mv, self.context) {
            (
                Move::InterSwap { inside, outside },
                MoveContext::InterSwap {
                    position,
                    pred,
                    succ,
                },
            ) => {
                if tour.is_selected(outside) || tour.position_of(inside) != Some(position) {
                    return Validity::InvalidRemove;
                }
                if tour.pred(inside) == Some(pred) && tour.succ(inside) == Some(succ) {
                    Validity::ValidApply
                } else {
                    Validity::Recalculate
                }
            }
            (Move::EdgeExchange { .. }, MoveContext::EdgeExchange { first, second }) => {
                match (first.direction(tour), second.direction(tour)) {
                    (Direction::Missing, _) | (_, Direction::Missing) => Validity::InvalidRemove,
                    (Direction::Forward, Direction::Forward) => {
                        if tour.position_of(first.tail) == Some(first.position)
                            && tour.position_of(second.tail) == Some(second.position)
                        {
                            Validity::ValidApply
                        } else {
                            Validity::Recalculate
                        }
                    }
                    (Direction::Reversed, Direction::Reversed) => Validity::ValidSkip,
                    _ => Validity::Recalculate,
                }
            }
            _ => Validity::InvalidRemove,
        }
    }

    /// The move to re-evaluate for a [`Validity::Recalculate`] record.
    ///
    /// For an edge exchange whose edges now run in opposite relative
    /// directions, this is the exchange between the current tails of the
    /// two tracked edges.
    pub fn recalculated(&self, tour: &Tour) -> Move {
        match self.context {
            MoveContext::EdgeExchange { first, second } => Move::EdgeExchange {
                a: first.current_tail(tour),
                b: second.current_tail(tour),
            },
            MoveContext::InterSwap { .. } => self.mv,
        }
    }
}
