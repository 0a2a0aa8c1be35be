//! # Local Bounds
//!
//! Axis-aligned object-space bounds and their world-space center.
//!
//! The center is the mean of the 8 box corners after the world transform,
//! not the transform of the local center. For affine transforms the two
//! agree up to rounding; the corner mean is what the scene tool reports.

use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};

/// Object-space axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalBounds {
    /// Minimum corner [x, y, z]
    pub min: [f64; 3],
    /// Maximum corner [x, y, z]
    pub max: [f64; 3],
}

impl Default for LocalBounds {
    /// Degenerate box at the origin, as reported for meshes with no vertices
    fn default() -> Self {
        Self {
            min: [0.0; 3],
            max: [0.0; 3],
        }
    }
}

impl LocalBounds {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.to_array(),
            max: max.to_array(),
        }
    }

    /// Cube of the given half extent centered at the origin
    pub fn cube(half_extent: f64) -> Self {
        Self::new(DVec3::splat(-half_extent), DVec3::splat(half_extent))
    }

    pub fn min(&self) -> DVec3 {
        DVec3::from_array(self.min)
    }

    pub fn max(&self) -> DVec3 {
        DVec3::from_array(self.max)
    }

    /// The 8 corners in object space
    pub fn corners(&self) -> [DVec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            DVec3::new(lo.x, lo.y, lo.z), // 0: bottom-back-left
            DVec3::new(lo.x, lo.y, hi.z), // 1: top-back-left
            DVec3::new(lo.x, hi.y, hi.z), // 2: top-front-left
            DVec3::new(lo.x, hi.y, lo.z), // 3: bottom-front-left
            DVec3::new(hi.x, lo.y, lo.z), // 4: bottom-back-right
            DVec3::new(hi.x, lo.y, hi.z), // 5: top-back-right
            DVec3::new(hi.x, hi.y, hi.z), // 6: top-front-right
            DVec3::new(hi.x, hi.y, lo.z), // 7: bottom-front-right
        ]
    }

    /// Mean of the 8 corners transformed by `world`
    pub fn world_center(&self, world: &DAffine3) -> DVec3 {
        let sum = self
            .corners()
            .iter()
            .map(|corner| world.transform_point3(*corner))
            .fold(DVec3::ZERO, |acc, p| acc + p);
        sum / 8.0
    }
}
