use cpwgen_geometry::transform::place_points;
use serde::{Deserialize, Serialize};

/// A named directional contact on a component.
///
/// With `input_as_norm` the two points are a tail→head direction and the pin sits at
/// the head, facing away from the tail. Otherwise they are the two ends of the contact
/// edge; the pin sits at their midpoint and faces the edge direction turned clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub points: [(f64, f64); 2],
    pub width: f64,
    pub input_as_norm: bool,
}

impl Pin {
    #[must_use]
    pub fn from_norm(tail: (f64, f64), head: (f64, f64), width: f64) -> Self {
        Self {
            points: [tail, head],
            width,
            input_as_norm: true,
        }
    }

    #[must_use]
    pub fn middle(&self) -> (f64, f64) {
        let [a, b] = self.points;
        if self.input_as_norm {
            b
        } else {
            ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
        }
    }

    /// Unit outward direction, or `None` when both points coincide.
    #[must_use]
    pub fn normal(&self) -> Option<(f64, f64)> {
        let [a, b] = self.points;
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = dx.hypot(dy);
        if len == 0.0 {
            return None;
        }
        if self.input_as_norm {
            Some((dx / len, dy / len))
        } else {
            Some((dy / len, -dx / len))
        }
    }

    /// The pin's contact edge: `width` wide, centered on `middle`, across `normal`.
    #[must_use]
    pub fn edge(&self) -> Option<[(f64, f64); 2]> {
        let n = self.normal()?;
        let m = self.middle();
        let t = (-n.1 * self.width / 2.0, n.0 * self.width / 2.0);
        Some([(m.0 - t.0, m.1 - t.1), (m.0 + t.0, m.1 + t.1)])
    }

    /// Rotate about the origin by `angle_deg`, then translate.
    #[must_use]
    pub fn placed(&self, angle_deg: f64, dx: f64, dy: f64) -> Self {
        let pts = place_points(&self.points, angle_deg, dx, dy);
        Self {
            points: [pts[0], pts[1]],
            ..*self
        }
    }
}
