//! Coupled-line tee: a straight primary CPW with a secondary CPW running alongside it
//! for `second_length`, which then bends away by `second_down_length`.
//!
//! ```text
//!        prime_in  ==========================  prime_out
//!                  ------------------+         coupling_space
//!                                    |
//!                                    |         second_out
//! ```
//!
//! Both lines carry a subtractive etch band of half-width `width/2 + gap`. An open
//! termination extends the band by one gap past the line end and removes that pin.

use cpwgen_geometry::band::band_outline;
use cpwgen_geometry::region::Region;
use cpwgen_geometry::transform::place_points;
use cpwgen_parser::{ScalarExpr, Units};
use serde::Deserialize;

use crate::error::ComponentError;
use crate::geometry::{ComponentGeometry, PathRecord};
use crate::options::{non_negative, positive};
use crate::pin::Pin;

pub const CLASS: &str = "coupled_line_tee";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoupledLineTeeOptions {
    pub prime_width: ScalarExpr,
    pub prime_gap: ScalarExpr,
    pub prime_length: ScalarExpr,
    pub prime_down_length: ScalarExpr,
    pub second_width: ScalarExpr,
    pub second_gap: ScalarExpr,
    pub second_length: ScalarExpr,
    pub second_down_length: ScalarExpr,
    pub coupling_space: ScalarExpr,
    pub coupling_shift: ScalarExpr,
    pub fillet: ScalarExpr,
    pub mirror: bool,
    pub second_open_termination: bool,
    pub prime_open_termination: bool,
    pub draw_prime: bool,
    /// `0` puts the primary stub at the start of the line, `1` at the end.
    pub prime_down_connection: ScalarExpr,
    pub pos_x: ScalarExpr,
    pub pos_y: ScalarExpr,
    pub orientation: ScalarExpr,
    pub layer: u32,
    pub make_airbridge: bool,
}

impl Default for CoupledLineTeeOptions {
    fn default() -> Self {
        Self {
            prime_width: ScalarExpr::expr("cpw_width"),
            prime_gap: ScalarExpr::expr("cpw_gap"),
            prime_length: ScalarExpr::expr("100um"),
            prime_down_length: ScalarExpr::expr("0um"),
            second_width: ScalarExpr::expr("cpw_width"),
            second_gap: ScalarExpr::expr("cpw_gap"),
            second_length: ScalarExpr::expr("100um"),
            second_down_length: ScalarExpr::expr("100um"),
            coupling_space: ScalarExpr::expr("3um"),
            coupling_shift: ScalarExpr::expr("0um"),
            fillet: ScalarExpr::expr("25um"),
            mirror: false,
            second_open_termination: true,
            prime_open_termination: false,
            draw_prime: true,
            prime_down_connection: ScalarExpr::Number(0.0),
            pos_x: ScalarExpr::Number(0.0),
            pos_y: ScalarExpr::Number(0.0),
            orientation: ScalarExpr::Number(0.0),
            layer: 1,
            make_airbridge: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownConnection {
    Start,
    End,
}

/// Resolved tee options, lengths in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct TeeParams {
    pub prime_width: f64,
    pub prime_gap: f64,
    pub prime_length: f64,
    pub prime_down_length: f64,
    pub second_width: f64,
    pub second_gap: f64,
    pub second_length: f64,
    pub second_down_length: f64,
    pub coupling_space: f64,
    pub coupling_shift: f64,
    pub fillet: f64,
    pub mirror: bool,
    pub second_open_termination: bool,
    pub prime_open_termination: bool,
    pub draw_prime: bool,
    pub prime_down_connection: DownConnection,
    pub pos: (f64, f64),
    pub orientation: f64,
    pub layer: u32,
    pub make_airbridge: bool,
}

impl CoupledLineTeeOptions {
    pub fn resolve(&self, units: &Units) -> Result<TeeParams, ComponentError> {
        let v = |key: &str, raw: &ScalarExpr| units.value(key, raw);

        let connection = v("prime_down_connection", &self.prime_down_connection)?;
        let prime_down_connection = if connection == 0.0 {
            DownConnection::Start
        } else if connection == 1.0 {
            DownConnection::End
        } else {
            return Err(ComponentError::invalid(
                "prime_down_connection",
                format!("must be 0 or 1, got {connection}"),
            ));
        };

        Ok(TeeParams {
            prime_width: positive("prime_width", v("prime_width", &self.prime_width)?)?,
            prime_gap: non_negative("prime_gap", v("prime_gap", &self.prime_gap)?)?,
            prime_length: positive("prime_length", v("prime_length", &self.prime_length)?)?,
            prime_down_length: non_negative(
                "prime_down_length",
                v("prime_down_length", &self.prime_down_length)?,
            )?,
            second_width: positive("second_width", v("second_width", &self.second_width)?)?,
            second_gap: non_negative("second_gap", v("second_gap", &self.second_gap)?)?,
            second_length: positive("second_length", v("second_length", &self.second_length)?)?,
            second_down_length: non_negative(
                "second_down_length",
                v("second_down_length", &self.second_down_length)?,
            )?,
            coupling_space: non_negative(
                "coupling_space",
                v("coupling_space", &self.coupling_space)?,
            )?,
            coupling_shift: v("coupling_shift", &self.coupling_shift)?,
            fillet: non_negative("fillet", v("fillet", &self.fillet)?)?,
            mirror: self.mirror,
            second_open_termination: self.second_open_termination,
            prime_open_termination: self.prime_open_termination,
            draw_prime: self.draw_prime,
            prime_down_connection,
            pos: (v("pos_x", &self.pos_x)?, v("pos_y", &self.pos_y)?),
            orientation: v("orientation", &self.orientation)?,
            layer: self.layer,
            make_airbridge: self.make_airbridge,
        })
    }
}

/// Centerline and etch centerline of one line of the tee, in the local frame.
struct Line {
    points: Vec<(f64, f64)>,
    etch: Vec<(f64, f64)>,
}

fn prime_line(p: &TeeParams) -> Line {
    let half = p.prime_length / 2.0;
    let down = p.prime_down_length;
    let term = if p.prime_open_termination { p.prime_gap } else { 0.0 };

    if down == 0.0 {
        return Line {
            points: vec![(-half, 0.0), (half, 0.0)],
            etch: vec![(-half - term, 0.0), (half, 0.0)],
        };
    }
    match p.prime_down_connection {
        DownConnection::Start => Line {
            points: vec![(-half, down), (-half, 0.0), (half, 0.0)],
            etch: vec![(-half, down), (-half, 0.0), (half + term, 0.0)],
        },
        DownConnection::End => Line {
            points: vec![(-half, 0.0), (half, 0.0), (half, down)],
            etch: vec![(-half - term, 0.0), (half, 0.0), (half, down)],
        },
    }
}

fn second_line(p: &TeeParams) -> Line {
    let flip = if p.mirror { -1.0 } else { 1.0 };
    let y = -p.prime_width / 2.0 - p.prime_gap - p.coupling_space - p.second_gap - p.second_width / 2.0;
    let start = -p.prime_length / 2.0 + p.coupling_shift;
    let bend = p.second_length - p.prime_length / 2.0 + p.coupling_shift;
    let term = if p.second_open_termination { p.second_gap } else { 0.0 };

    let mut points = vec![(flip * start, y), (flip * bend, y)];
    let mut etch = vec![(flip * (start - term), y), (flip * bend, y)];
    if p.second_down_length > 0.0 {
        points.push((flip * bend, y - p.second_down_length));
        etch.push((flip * bend, y - p.second_down_length));
    }
    Line { points, etch }
}

fn etch_region(name: &str, line: &Line, width: f64, gap: f64, fillet: f64) -> Result<Region, ComponentError> {
    band_outline(&line.etch, width / 2.0 + gap, fillet)
        .map(Region::single)
        .ok_or_else(|| ComponentError::Degenerate {
            name: name.to_string(),
            message: "etch band has no area".to_string(),
        })
}

pub fn make(options: &CoupledLineTeeOptions, units: &Units) -> Result<ComponentGeometry, ComponentError> {
    build(&options.resolve(units)?)
}

/// Paths, etch polys and pins of the tee, placed at its pose.
pub fn build(p: &TeeParams) -> Result<ComponentGeometry, ComponentError> {
    let (dx, dy) = p.pos;
    let place = |pts: &[(f64, f64)]| place_points(pts, p.orientation, dx, dy);
    let place_region = |r: Region| r.rotated(p.orientation).translated(dx, dy);
    let mut geom = ComponentGeometry::default();

    let prime = prime_line(p);
    let second = second_line(p);
    let second_etch = etch_region("second_cpw_sub", &second, p.second_width, p.second_gap, p.fillet)?;

    if p.draw_prime {
        let prime_etch = etch_region("prime_cpw_sub", &prime, p.prime_width, p.prime_gap, p.fillet)?;
        geom.add_path(PathRecord {
            name: "prime_cpw".to_string(),
            points: place(&prime.points),
            width: p.prime_width,
            fillet: p.fillet,
            layer: p.layer,
            make_airbridge: p.make_airbridge,
        });
        geom.add_poly("prime_cpw_sub", place_region(prime_etch), p.layer, true);
    }
    geom.add_path(PathRecord {
        name: "second_cpw".to_string(),
        points: place(&second.points),
        width: p.second_width,
        fillet: p.fillet,
        layer: p.layer,
        make_airbridge: p.make_airbridge,
    });
    geom.add_poly("second_cpw_sub", place_region(second_etch), p.layer, true);

    let pin = |a: (f64, f64), b: (f64, f64), width: f64| {
        Pin::from_norm(a, b, width).placed(p.orientation, dx, dy)
    };

    if p.draw_prime {
        let pts = &prime.points;
        // (out, in) as tail/head pairs; the stub end is always `prime_out`.
        let (out, inp) = if pts.len() == 2 {
            ((pts[0], pts[1]), (pts[1], pts[0]))
        } else {
            match p.prime_down_connection {
                DownConnection::Start => ((pts[1], pts[0]), (pts[1], pts[2])),
                DownConnection::End => ((pts[1], pts[2]), (pts[1], pts[0])),
            }
        };
        geom.add_pin("prime_out", pin(out.0, out.1, p.prime_width));
        if !p.prime_open_termination {
            geom.add_pin("prime_in", pin(inp.0, inp.1, p.prime_width));
        }
    }

    let pts = &second.points;
    let n = pts.len();
    geom.add_pin("second_out", pin(pts[n - 2], pts[n - 1], p.second_width));
    if !p.second_open_termination {
        geom.add_pin("second_in", pin(pts[1], pts[0], p.second_width));
    }

    tracing::trace!(
        paths = geom.paths.len(),
        pins = geom.pins.len(),
        "built coupled line tee"
    );
    Ok(geom)
}
