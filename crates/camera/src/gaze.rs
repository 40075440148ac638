use fpcam_common::{Aabb, Ray};
use glam::Vec3;

/// Obstacle the gaze ray stopped on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeHit {
    /// Index into the obstacle slice supplied for the frame.
    pub index: usize,
    pub distance: f32,
}

/// Resolved look-at point for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaze {
    pub point: Vec3,
    pub hit: Option<GazeHit>,
}

/// Cast `ray` against every obstacle and keep the nearest hit.
///
/// The default target is `look_distance` along the ray; only hits closer than
/// that replace it. Box order does not matter, and an empty slice always
/// yields the default.
pub fn resolve_gaze(ray: &Ray, look_distance: f32, obstacles: &[Aabb]) -> Gaze {
    let mut best = Gaze {
        point: ray.at(look_distance),
        hit: None,
    };
    let mut best_distance = look_distance;

    for (index, aabb) in obstacles.iter().enumerate() {
        let Some(distance) = ray.intersect_aabb(aabb) else {
            continue;
        };
        if distance < best_distance {
            best_distance = distance;
            best = Gaze {
                point: ray.at(distance),
                hit: Some(GazeHit { index, distance }),
            };
        }
    }

    best
}
