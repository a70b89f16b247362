//! A CPW routed through an explicit list of vertices.

use cpwgen_geometry::band::band_outline;
use cpwgen_geometry::region::Region;
use cpwgen_parser::{ScalarExpr, Units};
use serde::Deserialize;

use crate::error::ComponentError;
use crate::geometry::{ComponentGeometry, PathRecord};
use crate::options::{non_negative, positive};
use crate::pin::Pin;

pub const CLASS: &str = "route";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteOptions {
    pub points: Vec<[ScalarExpr; 2]>,
    pub width: ScalarExpr,
    pub gap: ScalarExpr,
    pub fillet: ScalarExpr,
    pub layer: u32,
    pub make_airbridge: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            width: ScalarExpr::expr("cpw_width"),
            gap: ScalarExpr::expr("cpw_gap"),
            fillet: ScalarExpr::expr("0um"),
            layer: 1,
            make_airbridge: false,
        }
    }
}

pub fn make(options: &RouteOptions, units: &Units) -> Result<ComponentGeometry, ComponentError> {
    let mut points = Vec::with_capacity(options.points.len());
    for (i, [x, y]) in options.points.iter().enumerate() {
        points.push((
            units.value(&format!("points[{i}].x"), x)?,
            units.value(&format!("points[{i}].y"), y)?,
        ));
    }
    if points.len() < 2 {
        return Err(ComponentError::invalid("points", "a route needs at least two points"));
    }
    if let Some(i) = points.windows(2).position(|w| w[0] == w[1]) {
        return Err(ComponentError::invalid(
            "points",
            format!("points {i} and {} coincide", i + 1),
        ));
    }

    let width = positive("width", units.value("width", &options.width)?)?;
    let gap = non_negative("gap", units.value("gap", &options.gap)?)?;
    let fillet = non_negative("fillet", units.value("fillet", &options.fillet)?)?;

    let etch = band_outline(&points, width / 2.0 + gap, fillet)
        .map(Region::single)
        .ok_or_else(|| ComponentError::Degenerate {
            name: "trace_sub".to_string(),
            message: "etch band has no area".to_string(),
        })?;

    let n = points.len();
    let mut geom = ComponentGeometry::default();
    geom.add_pin("start", Pin::from_norm(points[1], points[0], width));
    geom.add_pin("end", Pin::from_norm(points[n - 2], points[n - 1], width));
    geom.add_path(PathRecord {
        name: "trace".to_string(),
        points,
        width,
        fillet,
        layer: options.layer,
        make_airbridge: options.make_airbridge,
    });
    geom.add_poly("trace_sub", etch, options.layer, true);
    Ok(geom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn route(points: &[(&str, &str)]) -> RouteOptions {
        RouteOptions {
            points: points
                .iter()
                .map(|(x, y)| [ScalarExpr::expr(x), ScalarExpr::expr(y)])
                .collect(),
            ..RouteOptions::default()
        }
    }

    #[test]
    fn l_shaped_route() {
        let mut options = route(&[("0", "0"), ("1mm", "0"), ("1mm", "500um")]);
        options.fillet = ScalarExpr::expr("50um");
        options.make_airbridge = true;
        let geom = make(&options, &Units::default()).unwrap();

        let trace = geom.path("trace").unwrap();
        assert_eq!(trace.points, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 0.5)]);
        assert_abs_diff_eq!(trace.fillet, 0.05, epsilon = 1e-12);
        assert!(trace.make_airbridge);

        let start = geom.pin("start").unwrap();
        assert_eq!(start.middle(), (0.0, 0.0));
        assert_eq!(start.normal(), Some((-1.0, 0.0)));
        let end = geom.pin("end").unwrap();
        assert_eq!(end.middle(), (1.0, 0.5));

        let sub = geom.poly("trace_sub").unwrap();
        assert!(sub.subtract);
        assert_eq!(sub.layer, 1);
    }

    #[test]
    fn too_few_points() {
        let err = make(&route(&[("0", "0")]), &Units::default()).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidOption { .. }));
    }

    #[test]
    fn repeated_point() {
        let err = make(&route(&[("0", "0"), ("0", "0"), ("1", "0")]), &Units::default()).unwrap_err();
        assert!(err.to_string().contains("coincide"));
    }

    #[test]
    fn unknown_variable_in_point() {
        let err = make(&route(&[("0", "0"), ("nope", "0")]), &Units::default()).unwrap_err();
        assert!(matches!(err, ComponentError::Parser(_)));
    }
}
