//! Rigid transforms of polylines and coordinate lists.
//!
//! Rotation and translation leave arc bulges unchanged, so only vertex positions move.

use cpwgen_core::rotate_vec;

use crate::Polyline;

/// Rotate `pl` by `angle_deg` about the origin.
pub fn rotate(pl: &Polyline<f64>, angle_deg: f64) -> Polyline<f64> {
    let mut out = pl.clone();
    rotate_mut(&mut out, angle_deg);
    out
}

pub fn rotate_mut(pl: &mut Polyline<f64>, angle_deg: f64) {
    if angle_deg == 0.0 {
        return;
    }
    for v in &mut pl.vertex_data {
        let r = rotate_vec([v.x, v.y], angle_deg);
        v.x = r[0];
        v.y = r[1];
    }
}

pub fn translate(pl: &Polyline<f64>, dx: f64, dy: f64) -> Polyline<f64> {
    let mut out = pl.clone();
    translate_mut(&mut out, dx, dy);
    out
}

pub fn translate_mut(pl: &mut Polyline<f64>, dx: f64, dy: f64) {
    for v in &mut pl.vertex_data {
        v.x += dx;
        v.y += dy;
    }
}

/// Rotate about the origin, then translate. This is the order components and the
/// stamper apply their pose in.
pub fn place_points(points: &[(f64, f64)], angle_deg: f64, dx: f64, dy: f64) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&(x, y)| {
            let r = rotate_vec([x, y], angle_deg);
            (r[0] + dx, r[1] + dy)
        })
        .collect()
}
