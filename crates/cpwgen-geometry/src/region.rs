use cavalier_contours::polyline::{
    BooleanOp, BooleanResultInfo, PlineOrientation, PlineSource, PlineSourceMut, Polyline,
};

use crate::primitives::{is_valid_closed_polyline, vertex_extents};
use crate::transform;

/// A planar shape: outer boundaries (`pos`, counter-clockwise) and holes (`neg`, clockwise).
#[derive(Debug, Clone, Default)]
pub struct Region {
    pub pos: Vec<Polyline<f64>>,
    pub neg: Vec<Polyline<f64>>,
}

impl Region {
    pub fn empty() -> Self {
        Self::default()
    }

    /// One closed outline, wound counter-clockwise.
    pub fn single(pl: Polyline<f64>) -> Self {
        Self {
            pos: normalize_winding(vec![pl], PlineOrientation::CounterClockwise),
            neg: vec![],
        }
    }

    pub fn union_all(mut plines: Vec<Polyline<f64>>) -> Self {
        plines.retain(is_valid_closed_polyline);
        plines = plines.into_iter().map(simplify).collect();
        let (pos, neg) = union_pline_set_with_holes(plines);
        Self {
            pos: normalize_winding(pos, PlineOrientation::CounterClockwise),
            neg: normalize_winding(neg, PlineOrientation::Clockwise),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline<f64>> {
        self.pos.iter().chain(self.neg.iter())
    }

    /// Enclosed area: outer areas minus hole areas.
    pub fn area(&self) -> f64 {
        let pos: f64 = self.pos.iter().map(|p| p.area().abs()).sum();
        let neg: f64 = self.neg.iter().map(|p| p.area().abs()).sum();
        pos - neg
    }

    /// Vertex extents over every outline.
    pub fn extents(&self) -> Option<(f64, f64, f64, f64)> {
        self.polylines()
            .filter_map(vertex_extents)
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    }

    /// Rotate every outline by `angle_deg` about the origin.
    pub fn rotated(&self, angle_deg: f64) -> Self {
        self.map(|p| transform::rotate(p, angle_deg))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        self.map(|p| transform::translate(p, dx, dy))
    }

    fn map(&self, f: impl Fn(&Polyline<f64>) -> Polyline<f64>) -> Self {
        Self {
            pos: self.pos.iter().map(&f).collect(),
            neg: self.neg.iter().map(&f).collect(),
        }
    }
}

fn union_pline_set(plines: Vec<Polyline<f64>>) -> Vec<Polyline<f64>> {
    union_pline_set_with_holes(plines).0
}

/// Pairwise merge until stable. Footprint shape counts are tiny, so O(n^2) is fine.
/// Holes produced by a merge are kept and unioned among themselves.
fn union_pline_set_with_holes(
    mut plines: Vec<Polyline<f64>>,
) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
    plines.retain(is_valid_closed_polyline);

    let mut holes: Vec<Polyline<f64>> = Vec::new();

    let mut i = 0usize;
    while i < plines.len() {
        let mut merged = false;
        let mut j = i + 1;
        while j < plines.len() {
            let res = plines[i].boolean(&plines[j], BooleanOp::Or);
            match res.result_info {
                BooleanResultInfo::Disjoint | BooleanResultInfo::InvalidInput => {
                    j += 1;
                }
                _ => {
                    let mut next: Vec<Polyline<f64>> = res
                        .pos_plines
                        .into_iter()
                        .map(|p| simplify(p.pline))
                        .collect();
                    holes.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));

                    plines.swap_remove(j);
                    plines.swap_remove(i);
                    plines.append(&mut next);
                    merged = true;
                    break;
                }
            }
        }
        if merged {
            i = 0;
        } else {
            i += 1;
        }
    }

    if holes.len() > 1 {
        holes = union_pline_set(holes);
    }
    (plines, holes)
}

fn normalize_winding(
    plines: Vec<Polyline<f64>>,
    desired: PlineOrientation,
) -> Vec<Polyline<f64>> {
    plines
        .into_iter()
        .map(|mut pl| {
            let orientation = pl.orientation();
            if orientation != PlineOrientation::Open && orientation != desired {
                pl.invert_direction_mut();
            }
            pl
        })
        .collect()
}

fn simplify(p: Polyline<f64>) -> Polyline<f64> {
    // Boolean results often carry collinear vertices; drop them.
    p.remove_redundant(1e-9).unwrap_or(p)
}
