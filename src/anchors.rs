/*
 * Anchor Points Module
 *
 * An immutable, ordered set of 3D points (a "shape") that boids can be
 * assigned to hover near. The set is produced outside the simulation, for
 * example from an imported model, and never changes during a run. An empty
 * set disables hovering entirely.
 */

use nannou::prelude::{vec3, Vec3};

use crate::error::FlockError;
use crate::geometry::max_abs_coordinate;
use crate::SPACE_SCALE;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    points: Vec<Vec3>,
}

impl AnchorSet {
    // Anchors at exactly the given coordinates
    pub fn from_points(points: Vec<Vec3>) -> Result<Self, FlockError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FlockError::NonFiniteAnchor { index });
        }
        Ok(Self { points })
    }

    pub fn from_arrays(points: &[[f32; 3]]) -> Result<Self, FlockError> {
        Self::from_points(points.iter().map(|&[x, y, z]| vec3(x, y, z)).collect())
    }

    // Rescale a raw point cloud so its largest coordinate sits at half the
    // spawn cube edge, which keeps the shape well inside the containment box.
    pub fn normalized(points: Vec<Vec3>) -> Result<Self, FlockError> {
        let set = Self::from_points(points)?;
        let extent = max_abs_coordinate(&set.points);
        if extent == 0.0 {
            return Ok(set);
        }
        let scale = SPACE_SCALE * 0.5 / extent;
        Ok(Self {
            points: set.points.into_iter().map(|p| p * scale).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}
