use cavalier_contours::polyline::PlineSource;
use cpwgen_core::rotate_point;

use crate::{PlineVertex, Polyline};

/// Axis-aligned rectangle of `size` centered on `center`, optionally rotated about its center.
/// Vertices are counter-clockwise.
pub fn rectangle(center: (f64, f64), size: (f64, f64), rotation_deg: f64) -> Polyline<f64> {
    let (cx, cy) = center;
    let (w, h) = size;
    let hw = w / 2.0;
    let hh = h / 2.0;

    let mut pts = vec![
        (cx - hw, cy - hh),
        (cx + hw, cy - hh),
        (cx + hw, cy + hh),
        (cx - hw, cy + hh),
    ];

    if rotation_deg != 0.0 {
        for p in &mut pts {
            let r = rotate_point([p.0, p.1], rotation_deg, [cx, cy]);
            *p = (r[0], r[1]);
        }
    }

    polygon(&pts)
}

/// Closed straight-edged polygon through `vertices`.
pub(crate) fn polygon(vertices: &[(f64, f64)]) -> Polyline<f64> {
    let mut pl = Polyline::new_closed();
    for &(x, y) in vertices {
        pl.vertex_data.push(PlineVertex::new(x, y, 0.0));
    }
    pl
}

pub(crate) fn is_valid_closed_polyline(pl: &Polyline<f64>) -> bool {
    pl.is_closed() && pl.vertex_count() >= 2
}

/// Vertex extents `(min_x, min_y, max_x, max_y)`. Arc bulges are not expanded.
pub fn vertex_extents(pl: &Polyline<f64>) -> Option<(f64, f64, f64, f64)> {
    let mut iter = pl.vertex_data.iter();
    let first = iter.next()?;
    let mut ext = (first.x, first.y, first.x, first.y);
    for v in iter {
        ext.0 = ext.0.min(v.x);
        ext.1 = ext.1.min(v.y);
        ext.2 = ext.2.max(v.x);
        ext.3 = ext.3.max(v.y);
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rectangle_is_centered_and_sized() {
        let r = rectangle((1.0, 2.0), (4.0, 2.0), 0.0);
        assert!(is_valid_closed_polyline(&r));
        assert_eq!(r.vertex_count(), 4);
        assert_eq!(vertex_extents(&r), Some((-1.0, 1.0, 3.0, 3.0)));
        assert_abs_diff_eq!(r.area(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn rotated_rectangle_keeps_center() {
        let r = rectangle((5.0, 5.0), (2.0, 2.0), 45.0);
        let (min_x, min_y, max_x, max_y) = vertex_extents(&r).unwrap();
        assert_abs_diff_eq!((min_x + max_x) / 2.0, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!((min_y + max_y) / 2.0, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max_x - min_x, 2.0 * 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn empty_polygon_has_no_extents() {
        assert_eq!(vertex_extents(&polygon(&[])), None);
    }
}
