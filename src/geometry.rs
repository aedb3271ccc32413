/*
 * Geometry Module
 *
 * Small vector helpers shared by the neighbor query, the rules and the
 * update pipeline: euclidean distance, the per-axis sign used by speed
 * shaping, the box containment nudge and averaging with an empty guard.
 */

use nannou::prelude::{vec3, Vec3};

// Euclidean distance between two points
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

// Sign with zero treated as positive
pub fn sign(x: f32) -> f32 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

// Compress one velocity component: sign(c) * sqrt(|c|)
pub fn shape_component(c: f32) -> f32 {
    sign(c) * c.abs().sqrt()
}

// Apply the compressive transform to every axis independently.
// Per axis, so the vector magnitude is not preserved.
pub fn shape_speed(velocity: Vec3) -> Vec3 {
    vec3(
        shape_component(velocity.x),
        shape_component(velocity.y),
        shape_component(velocity.z),
    )
}

// Unit push back toward the box for each axis where `position` lies outside [-bound, bound]
pub fn containment_nudge(position: Vec3, bound: f32) -> Vec3 {
    let axis = |p: f32| {
        if p < -bound {
            1.0
        } else if p > bound {
            -1.0
        } else {
            0.0
        }
    };
    vec3(axis(position.x), axis(position.y), axis(position.z))
}

// Average of an accumulated sum, or zero when nothing was accumulated
pub fn mean_or_zero(sum: Vec3, count: usize) -> Vec3 {
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

// Largest absolute coordinate over a set of points
pub fn max_abs_coordinate(points: &[Vec3]) -> f32 {
    points
        .iter()
        .map(|p| p.abs().max_element())
        .fold(0.0, f32::max)
}

// Whether a point lies inside the axis-aligned cube [-bound, bound]^3
pub fn inside_cube(position: Vec3, bound: f32) -> bool {
    position.abs().max_element() <= bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_treats_zero_as_positive() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn shaping_is_per_axis_square_root() {
        let shaped = shape_speed(vec3(4.0, -9.0, 0.0));
        assert_eq!(shaped, vec3(2.0, -3.0, 0.0));
    }

    #[test]
    fn shaping_keeps_component_signs() {
        let shaped = shape_speed(vec3(-0.25, 0.25, -16.0));
        assert_eq!(shaped, vec3(-0.5, 0.5, -4.0));
    }

    #[test]
    fn containment_pushes_inward_only_outside_the_box() {
        assert_eq!(containment_nudge(vec3(60.0, 0.0, -51.0), 50.0), vec3(-1.0, 0.0, 1.0));
        assert_eq!(containment_nudge(vec3(50.0, -50.0, 0.0), 50.0), Vec3::ZERO);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean_or_zero(vec3(1.0, 2.0, 3.0), 0), Vec3::ZERO);
        assert_eq!(mean_or_zero(vec3(2.0, 4.0, 6.0), 2), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn max_abs_coordinate_scans_every_axis() {
        let points = [vec3(1.0, -7.0, 2.0), vec3(3.0, 0.0, 6.5)];
        assert_eq!(max_abs_coordinate(&points), 7.0);
        assert_eq!(max_abs_coordinate(&[]), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(vec3(0.0, 0.0, 0.0), vec3(3.0, 4.0, 0.0)), 5.0);
    }
}
