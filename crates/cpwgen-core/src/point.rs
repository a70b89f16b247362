use serde::{Deserialize, Serialize};

/// A planar pose: position in millimetres plus a rotation in degrees.
///
/// Placement points produced by the airbridge planner are poses: "stamp the
/// footprint here, rotated by `r` about its own origin, before translation".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub r: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
}

pub fn rotate_vec(v: [f64; 2], angle_deg: f64) -> [f64; 2] {
    let a = angle_deg.to_radians();
    let (s, c) = a.sin_cos();
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

pub fn rotate_point(p: [f64; 2], angle_deg: f64, origin: [f64; 2]) -> [f64; 2] {
    let translated = [p[0] - origin[0], p[1] - origin[1]];
    let rotated = rotate_vec(translated, angle_deg);
    [rotated[0] + origin[0], rotated[1] + origin[1]]
}
