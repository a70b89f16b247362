//! Closed outline of a trace of constant half-width around a polyline centerline.
//!
//! Ends are flat (butt) caps. Interior vertices are joined with a fillet arc when the
//! centerline fillet radius exceeds the half-width, matching how the rendered trace is
//! rounded; otherwise with a mitre.

use crate::{PlineVertex, Polyline};

const ANGLE_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
enum Join {
    Straight,
    Mitre,
    Arc { tangent: f64, bulge: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    at: (f64, f64),
    d_in: (f64, f64),
    d_out: (f64, f64),
    join: Join,
}

/// Counter-clockwise outline of the band `half_width` either side of `points`.
///
/// Returns `None` for fewer than two points, a zero-length segment, a non-positive
/// half-width, or a mitred U-turn.
pub fn band_outline(points: &[(f64, f64)], half_width: f64, fillet: f64) -> Option<Polyline<f64>> {
    if points.len() < 2 || half_width <= 0.0 || !half_width.is_finite() {
        return None;
    }

    let mut dirs = Vec::with_capacity(points.len() - 1);
    for w in points.windows(2) {
        let dx = w[1].0 - w[0].0;
        let dy = w[1].1 - w[0].1;
        let len = dx.hypot(dy);
        if len <= 0.0 || !len.is_finite() {
            return None;
        }
        dirs.push((dx / len, dy / len));
    }

    let mut corners = Vec::with_capacity(points.len().saturating_sub(2));
    for k in 1..points.len() - 1 {
        let d_in = dirs[k - 1];
        let d_out = dirs[k];
        let cross = d_in.0 * d_out.1 - d_in.1 * d_out.0;
        let dot = d_in.0 * d_out.0 + d_in.1 * d_out.1;
        let phi = cross.atan2(dot);

        let join = if phi.abs() < ANGLE_EPS {
            Join::Straight
        } else if fillet > half_width {
            Join::Arc {
                tangent: fillet * (phi.abs() / 2.0).tan(),
                bulge: (phi / 4.0).tan(),
            }
        } else if 1.0 + dot > 1e-9 {
            Join::Mitre
        } else {
            return None;
        };
        corners.push(Corner {
            at: points[k],
            d_in,
            d_out,
            join,
        });
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let d_first = dirs[0];
    let d_last = dirs[dirs.len() - 1];

    let mut pl = Polyline::new_closed();

    // Right side, walking forward.
    push(&mut pl, offset(first, d_first, -half_width), 0.0);
    for c in &corners {
        side_vertices(&mut pl, c, -half_width, true);
    }
    push(&mut pl, offset(last, d_last, -half_width), 0.0);

    // Left side, walking back.
    push(&mut pl, offset(last, d_last, half_width), 0.0);
    for c in corners.iter().rev() {
        side_vertices(&mut pl, c, half_width, false);
    }
    push(&mut pl, offset(first, d_first, half_width), 0.0);

    Some(pl)
}

fn side_vertices(pl: &mut Polyline<f64>, c: &Corner, h: f64, forward: bool) {
    match c.join {
        Join::Straight => {}
        Join::Mitre => {
            let n_in = left_normal(c.d_in);
            let n_out = left_normal(c.d_out);
            let denom = 1.0 + n_in.0 * n_out.0 + n_in.1 * n_out.1;
            let m = (
                c.at.0 + h * (n_in.0 + n_out.0) / denom,
                c.at.1 + h * (n_in.1 + n_out.1) / denom,
            );
            push(pl, m, 0.0);
        }
        Join::Arc { tangent, bulge } => {
            let start = (c.at.0 - c.d_in.0 * tangent, c.at.1 - c.d_in.1 * tangent);
            let end = (c.at.0 + c.d_out.0 * tangent, c.at.1 + c.d_out.1 * tangent);
            let start = offset(start, c.d_in, h);
            let end = offset(end, c.d_out, h);
            if forward {
                push(pl, start, bulge);
                push(pl, end, 0.0);
            } else {
                push(pl, end, -bulge);
                push(pl, start, 0.0);
            }
        }
    }
}

fn left_normal(d: (f64, f64)) -> (f64, f64) {
    (-d.1, d.0)
}

fn offset(p: (f64, f64), d: (f64, f64), h: f64) -> (f64, f64) {
    let n = left_normal(d);
    (p.0 + n.0 * h, p.1 + n.1 * h)
}

fn push(pl: &mut Polyline<f64>, p: (f64, f64), bulge: f64) {
    pl.vertex_data.push(PlineVertex::new(p.0, p.1, bulge));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::vertex_extents;
    use approx::assert_abs_diff_eq;
    use cavalier_contours::polyline::PlineSource;
    use std::f64::consts::PI;

    #[test]
    fn straight_band_is_a_rectangle() {
        let pl = band_outline(&[(0.0, 0.0), (10.0, 0.0)], 1.0, 0.0).unwrap();
        assert_eq!(pl.vertex_count(), 4);
        assert_abs_diff_eq!(pl.area(), 20.0, epsilon = 1e-9);
        assert_eq!(vertex_extents(&pl), Some((0.0, -1.0, 10.0, 1.0)));
    }

    #[test]
    fn mitred_right_angle_band_area() {
        let pl = band_outline(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)], 0.5, 0.0).unwrap();
        assert_abs_diff_eq!(pl.area(), 7.0, epsilon = 1e-9);
        let (_, min_y, max_x, _) = vertex_extents(&pl).unwrap();
        assert_abs_diff_eq!(max_x, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(min_y, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn filleted_band_area_follows_centerline_length() {
        let (r, h) = (1.0, 0.25);
        let pl = band_outline(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)], h, r).unwrap();
        let centerline = 4.0 + 3.0 - 2.0 * r + PI * r / 2.0;
        assert_abs_diff_eq!(pl.area(), 2.0 * h * centerline, epsilon = 1e-9);
    }

    #[test]
    fn right_turn_is_still_counter_clockwise() {
        let pl = band_outline(&[(0.0, 0.0), (4.0, 0.0), (4.0, -3.0)], 0.25, 1.0).unwrap();
        assert!(pl.area() > 0.0);
    }

    #[test]
    fn fillet_not_larger_than_half_width_falls_back_to_mitre() {
        let pl = band_outline(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)], 0.5, 0.5).unwrap();
        assert!(pl.vertex_data.iter().all(|v| v.bulge == 0.0));
    }

    #[test]
    fn collinear_vertex_is_dropped() {
        let pl = band_outline(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0)], 0.5, 0.2).unwrap();
        assert_eq!(pl.vertex_count(), 4);
    }

    #[test]
    fn degenerate_input_is_rejected() {
        assert!(band_outline(&[(0.0, 0.0)], 1.0, 0.0).is_none());
        assert!(band_outline(&[(0.0, 0.0), (0.0, 0.0)], 1.0, 0.0).is_none());
        assert!(band_outline(&[(0.0, 0.0), (1.0, 0.0)], 0.0, 0.0).is_none());
        assert!(band_outline(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], 0.1, 0.0).is_none());
    }
}
