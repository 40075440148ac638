use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used for obstacle queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full extents `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// A half-line starting at `origin`. `direction` is expected to be normalized
/// so that intersection distances are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against `aabb`.
    ///
    /// Returns the distance to the closest intersection on the positive side
    /// of the ray: the entry distance when the origin is outside the box, the
    /// exit distance when the origin is inside it. `None` if the box is missed
    /// or lies entirely behind the origin.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        // Near-zero components clamp to a huge inverse so axis-parallel rays
        // never hit 0 * inf.
        let inv = |d: f32| {
            if d.abs() < EPSILON {
                1.0 / EPSILON.copysign(d)
            } else {
                1.0 / d
            }
        };
        let inv_dir = Vec3::new(
            inv(self.direction.x),
            inv(self.direction.y),
            inv(self.direction.z),
        );

        let t0 = (aabb.min - self.origin) * inv_dir;
        let t1 = (aabb.max - self.origin) * inv_dir;

        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

/// Camera pose written to the scene once per frame.
///
/// `target` is the resolved gaze point the rotation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            target: Vec3::NEG_Z,
        }
    }
}

impl CameraPose {
    /// Local `-Z` axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}
