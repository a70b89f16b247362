//! Placement of airbridges along a filleted CPW centerline.
//!
//! Every straight segment gets the largest run of bridges at `bridge_pitch` that fits
//! between its two clearance margins, centered on the segment midpoint. Every interior
//! vertex whose adjoining segments are long enough gets one extra bridge on the apex of
//! the fillet arc.

use cpwgen_core::Point;

use crate::error::AirbridgeError;

/// Quantization grid for path vertices, in millimetres (1 nm).
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Most bridges a single straight segment may carry.
pub const MAX_BRIDGES_PER_SEGMENT: usize = 100_000;

const EXACT_F64_INTEGERS: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanParams {
    pub fillet_radius: f64,
    /// Center-to-center distance between consecutive bridges.
    pub bridge_pitch: f64,
    /// Clearance kept free of bridges at both ends of every segment.
    pub min_spacing: f64,
    pub precision: f64,
}

impl PlanParams {
    pub fn new(fillet_radius: f64, bridge_pitch: f64, min_spacing: f64) -> Self {
        Self {
            fillet_radius,
            bridge_pitch,
            min_spacing,
            precision: DEFAULT_PRECISION,
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Length kept free at each end of a segment, and the minimum adjoining segment
    /// length for a corner bridge.
    pub fn margin(&self) -> f64 {
        self.fillet_radius.max(self.min_spacing)
    }

    pub fn validate(&self) -> Result<(), AirbridgeError> {
        if !self.bridge_pitch.is_finite() || self.bridge_pitch <= 0.0 {
            return Err(AirbridgeError::invalid_parameter(
                "bridge_pitch",
                format!("must be finite and > 0, got {}", self.bridge_pitch),
            ));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(AirbridgeError::invalid_parameter(
                "bridge_minimum_spacing",
                format!("must be finite and >= 0, got {}", self.min_spacing),
            ));
        }
        if !self.fillet_radius.is_finite() || self.fillet_radius < 0.0 {
            return Err(AirbridgeError::invalid_parameter(
                "fillet",
                format!("must be finite and >= 0, got {}", self.fillet_radius),
            ));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(AirbridgeError::invalid_parameter(
                "precision",
                format!("must be finite and > 0, got {}", self.precision),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: (f64, f64),
    end: (f64, f64),
    /// Radians.
    angle: f64,
    length: f64,
}

impl Segment {
    fn midpoint(&self) -> (f64, f64) {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }
}

fn quantize(v: f64, precision: f64) -> f64 {
    (v / precision).round_ties_even() * precision
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn segments(path: &[(f64, f64)], precision: f64) -> Result<Vec<Segment>, AirbridgeError> {
    if path.len() < 2 {
        return Err(AirbridgeError::invalid_path(format!(
            "need at least 2 vertices, got {}",
            path.len()
        )));
    }
    if let Some(i) = path.iter().position(|p| !p.0.is_finite() || !p.1.is_finite()) {
        return Err(AirbridgeError::invalid_path(format!("vertex {i} is not finite")));
    }

    let q = |p: (f64, f64)| (quantize(p.0, precision), quantize(p.1, precision));
    let mut out = Vec::with_capacity(path.len() - 1);
    for (i, w) in path.windows(2).enumerate() {
        let start = q(w[0]);
        let end = q(w[1]);
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let length = dx.hypot(dy);
        if length == 0.0 {
            return Err(AirbridgeError::invalid_path(format!(
                "segment {i} has zero length at precision {precision}"
            )));
        }
        out.push(Segment {
            start,
            end,
            angle: dy.atan2(dx),
            length,
        });
    }
    Ok(out)
}

/// Largest `n` with `n * pitch <= usable`; zero when `usable` is negative or NaN.
/// Saturates at `usize::MAX` once the ratio is past exact `f64` integers.
pub fn bridge_count(usable: f64, pitch: f64) -> usize {
    if usable.is_nan() || usable < 0.0 {
        return 0;
    }
    let estimate = (usable / pitch).floor();
    if !estimate.is_finite() || estimate >= EXACT_F64_INTEGERS {
        return usize::MAX;
    }
    let mut n = estimate as usize;
    while let Some(next) = n.checked_add(1) {
        if next as f64 * pitch > usable {
            break;
        }
        n = next;
    }
    while n > 0 && n as f64 * pitch > usable {
        n -= 1;
    }
    n
}

/// Placement points for one path: segment runs in path order, then corner points.
///
/// Fails on an invalid parameter, a pitch that would put more than
/// [`MAX_BRIDGES_PER_SEGMENT`] bridges on one segment, fewer than two vertices, or a
/// segment that vanishes after quantization. A segment too short for any bridge is not an error.
pub fn plan(path: &[(f64, f64)], params: &PlanParams) -> Result<Vec<Point>, AirbridgeError> {
    params.validate()?;
    let segs = segments(path, params.precision)?;
    let margin = params.margin();
    let pitch = params.bridge_pitch;

    let mut points = Vec::new();
    for (i, seg) in segs.iter().enumerate() {
        let usable = seg.length - 2.0 * margin;
        let n = bridge_count(usable, pitch);
        if n > MAX_BRIDGES_PER_SEGMENT {
            return Err(AirbridgeError::invalid_parameter(
                "bridge_pitch",
                format!(
                    "{pitch} places more than {MAX_BRIDGES_PER_SEGMENT} bridges on segment {i} \
                     ({usable} usable)"
                ),
            ));
        }
        tracing::trace!(segment = i, length = seg.length, usable, n, "planned segment");

        let (mx, my) = seg.midpoint();
        let (ux, uy) = (seg.angle.cos(), seg.angle.sin());
        let center = (n as f64 - 1.0) / 2.0;
        let deg = seg.angle.to_degrees();
        for k in 0..n {
            let t = (k as f64 - center) * pitch;
            points.push(Point::new(mx + t * ux, my + t * uy, deg));
        }
    }
    let straight = points.len();

    let r = params.fillet_radius;
    for (k, pair) in segs.windows(2).enumerate() {
        let (seg_in, seg_out) = (&pair[0], &pair[1]);
        if seg_in.length < margin || seg_out.length < margin {
            tracing::trace!(vertex = k + 1, "corner skipped, adjoining segment too short");
            continue;
        }
        let (t_in, t_out) = (seg_in.angle, seg_out.angle);
        let bisect = (t_in.sin() - t_out.sin()).atan2(t_in.cos() - t_out.cos());
        let (c, s) = (bisect.cos(), bisect.sin());
        let off_x = r * (1.0 - c.abs());
        let off_y = r * (1.0 - s.abs());
        let (vx, vy) = seg_in.end;
        points.push(Point::new(
            vx - off_x * sign(c),
            vy - off_y * sign(s),
            ((t_in + t_out) / 2.0).to_degrees(),
        ));
    }

    tracing::debug!(
        vertices = path.len(),
        straight,
        corners = points.len() - straight,
        "planned airbridges"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn xs(points: &[Point]) -> Vec<f64> {
        points.iter().map(|p| p.x).collect()
    }

    #[test]
    fn straight_path_gets_centered_maximal_run() {
        let points = plan(&[(0.0, 0.0), (10.0, 0.0)], &PlanParams::new(0.0, 2.0, 0.5)).unwrap();
        assert_eq!(points.len(), 4);
        let centroid = xs(&points).iter().sum::<f64>() / 4.0;
        assert_abs_diff_eq!(centroid, 5.0, epsilon = 1e-9);
        for (p, x) in points.iter().zip([2.0, 4.0, 6.0, 8.0]) {
            assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
            assert_eq!(p.r, 0.0);
        }
    }

    #[test]
    fn right_angle_turn_gets_one_corner_bridge() {
        let path = [(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)];
        let points = plan(&path, &PlanParams::new(1.0, 2.0, 0.0)).unwrap();
        assert_eq!(points.len(), 3);

        let corner = points[2];
        let off = 1.0 - std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(corner.x, 5.0 - off, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, off, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.r, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn right_turn_corner_sits_on_fillet_apex() {
        let path = [(0.0, 0.0), (5.0, 0.0), (5.0, -5.0)];
        let points = plan(&path, &PlanParams::new(1.0, 2.0, 0.0)).unwrap();
        let corner = points.last().unwrap();
        let off = 1.0 - std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(corner.x, 5.0 - off, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, -off, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.r, -45.0, epsilon = 1e-9);
    }

    #[test]
    fn short_segment_gives_no_points() {
        let points = plan(&[(0.0, 0.0), (0.3, 0.0)], &PlanParams::new(0.5, 2.0, 0.5)).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn usable_length_below_pitch_gives_no_points() {
        let points = plan(&[(0.0, 0.0), (2.5, 0.0)], &PlanParams::new(0.0, 2.0, 0.5)).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn margin_is_the_larger_of_fillet_and_spacing() {
        let params = PlanParams::new(2.0, 1.0, 0.5);
        assert_eq!(params.margin(), 2.0);
        // 10 - 2*2 = 6 usable.
        let points = plan(&[(0.0, 0.0), (10.0, 0.0)], &params).unwrap();
        assert_eq!(points.len(), 6);
    }

    #[test]
    fn corner_skipped_when_a_segment_is_shorter_than_margin() {
        let path = [(0.0, 0.0), (5.0, 0.0), (5.0, 0.8)];
        let points = plan(&path, &PlanParams::new(1.0, 2.0, 0.0)).unwrap();
        // Only the first segment's single bridge.
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].r, 0.0);
    }

    #[test]
    fn corners_follow_segments_in_vertex_order() {
        let path = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let points = plan(&path, &PlanParams::new(1.0, 3.0, 0.0)).unwrap();
        // 8 usable per segment, 2 bridges each, then 2 corners.
        assert_eq!(points.len(), 8);
        assert_abs_diff_eq!(points[6].r, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[7].r, 135.0, epsilon = 1e-9);
        assert!(points[7].x < 10.0 && points[7].y < 10.0);
    }

    #[test]
    fn two_vertex_path_has_no_corners() {
        let points = plan(&[(0.0, 0.0), (0.0, 10.0)], &PlanParams::new(1.0, 4.0, 0.0)).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| (p.r - 90.0).abs() < 1e-9));
    }

    #[test]
    fn quantization_removes_jitter() {
        let params = PlanParams::new(0.0, 2.0, 0.5);
        let clean = plan(&[(0.0, 0.0), (10.0, 0.0)], &params).unwrap();
        let noisy = plan(&[(1e-12, -1e-12), (10.0 + 3e-11, 2e-12)], &params).unwrap();
        assert_eq!(clean, noisy);
    }

    #[test]
    fn planning_is_deterministic() {
        let path = [(0.0, 0.0), (3.3, 0.1), (3.7, 4.2), (-1.0, 6.0)];
        let params = PlanParams::new(0.4, 0.7, 0.2);
        assert_eq!(plan(&path, &params).unwrap(), plan(&path, &params).unwrap());
    }

    #[test]
    fn invalid_paths_are_rejected() {
        let params = PlanParams::new(0.0, 1.0, 0.0);
        for path in [
            vec![],
            vec![(0.0, 0.0)],
            vec![(0.0, 0.0), (0.0, 0.0)],
            vec![(0.0, 0.0), (4e-7, 0.0), (1.0, 0.0)],
            vec![(0.0, 0.0), (f64::NAN, 1.0)],
        ] {
            assert!(
                matches!(plan(&path, &params), Err(AirbridgeError::InvalidPath { .. })),
                "{path:?}"
            );
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let path = [(0.0, 0.0), (10.0, 0.0)];
        for params in [
            PlanParams::new(0.0, 0.0, 0.0),
            PlanParams::new(0.0, -1.0, 0.0),
            PlanParams::new(0.0, f64::NAN, 0.0),
            PlanParams::new(0.0, 1.0, -0.1),
            PlanParams::new(-0.1, 1.0, 0.0),
            PlanParams::new(0.0, 1.0, 0.0).with_precision(0.0),
        ] {
            assert!(
                matches!(plan(&path, &params), Err(AirbridgeError::InvalidParameter { .. })),
                "{params:?}"
            );
        }
    }

    #[test]
    fn bridge_count_boundaries() {
        assert_eq!(bridge_count(-0.1, 1.0), 0);
        assert_eq!(bridge_count(0.0, 1.0), 0);
        assert_eq!(bridge_count(0.99, 1.0), 0);
        assert_eq!(bridge_count(1.0, 1.0), 1);
        assert_eq!(bridge_count(9.0, 2.0), 4);
        assert_eq!(bridge_count(0.3, 0.1), 2);
    }

    #[test]
    fn bridge_count_survives_tiny_pitch() {
        assert_eq!(bridge_count(10.0, 1e-300), usize::MAX);
        assert_eq!(bridge_count(f64::NAN, 1.0), 0);
        assert_eq!(bridge_count(1e6, 1e-9), 999_999_999_999_999);
    }

    #[test]
    fn pitch_beyond_the_bridge_limit_is_rejected() {
        let path = [(0.0, 0.0), (10.0, 0.0)];
        let err = plan(&path, &PlanParams::new(0.0, 1e-9, 0.0)).unwrap_err();
        match err {
            AirbridgeError::InvalidParameter { name, .. } => assert_eq!(name, "bridge_pitch"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(plan(&path, &PlanParams::new(0.0, 1e-300, 0.0)).is_err());

        // Just under the limit still plans.
        let pitch = 10.0 / MAX_BRIDGES_PER_SEGMENT as f64;
        let points = plan(&path, &PlanParams::new(0.0, pitch * 1.000_001, 0.0)).unwrap();
        assert_eq!(points.len(), MAX_BRIDGES_PER_SEGMENT - 1);
    }
}
