/*
 * Error Module
 *
 * Errors raised while building a flock. Everything here is rejected at
 * initialization; a running simulation never produces an error.
 */

use thiserror::Error;

/// Errors that can occur when constructing a flock.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    /// The flock must contain at least one agent.
    #[error("population must contain at least one boid")]
    EmptyPopulation,
    /// More agents were requested than the store allows.
    #[error("too many boids: requested {requested}, max is {max}")]
    PopulationTooLarge { requested: usize, max: usize },
    /// Leader count outside 1..=MAX_LEADERS or larger than the population.
    #[error("leader count {requested} is invalid for a population of {population}")]
    LeaderCountOutOfRange { requested: usize, population: usize },
    /// A leader index does not name an agent.
    #[error("leader {leader} is not an agent index (population {population})")]
    LeaderOutOfRange { leader: usize, population: usize },
    /// An agent was assigned to an anchor point that does not exist.
    #[error("boid {agent} assigned to anchor {anchor}, but only {anchors} anchors are loaded")]
    AnchorOutOfRange { agent: usize, anchor: usize, anchors: usize },
    /// Anchor points must have finite coordinates.
    #[error("anchor point {index} has a non-finite coordinate")]
    NonFiniteAnchor { index: usize },
    /// Trails need at least one slot.
    #[error("trail length must be at least 1")]
    ZeroTrailLength,
}
