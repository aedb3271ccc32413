/*
 * Neighbor Query Module
 *
 * Brute-force range search over every agent. Each call is O(N) and the
 * results come back in ascending index order, so rules that fold over
 * neighbors produce reproducible sums. The query agent is part of its own
 * neighborhood because its distance to itself is zero.
 */

use nannou::prelude::Vec3;

use crate::geometry::distance;

// Iterate the indices of all agents within `radius` of agent `index`
pub fn in_range(positions: &[Vec3], index: usize, radius: f32) -> impl Iterator<Item = usize> + '_ {
    let origin = positions[index];
    positions
        .iter()
        .enumerate()
        .filter(move |&(_, &other)| distance(origin, other) <= radius)
        .map(|(j, _)| j)
}

// Collect the neighborhood of agent `index` into a new vector
pub fn neighbors(positions: &[Vec3], index: usize, radius: f32) -> Vec<usize> {
    in_range(positions, index, radius).collect()
}

// Count the neighborhood without allocating
pub fn count_in_range(positions: &[Vec3], index: usize, radius: f32) -> usize {
    in_range(positions, index, radius).count()
}
