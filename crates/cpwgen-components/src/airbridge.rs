//! Airbridge footprint: two landing squares joined by a bridge, inside an outer keep-out.
//!
//! ```text
//!   +---------------------------------------+   outside_struct
//!   |  +------+-----------------+------+    |
//!   |  |  sq  |     bridge      |  sq  |    |   bridge_struct spans both squares
//!   |  +------+-----------------+------+    |
//!   +---------------------------------------+
//!          |<-- crossover_length -->|
//! ```

use cpwgen_geometry::primitives::rectangle;
use cpwgen_geometry::region::Region;
use cpwgen_parser::{ScalarExpr, Units};
use serde::Deserialize;

use crate::error::ComponentError;
use crate::footprint::Footprint;
use crate::geometry::ComponentGeometry;
use crate::options::{non_negative, positive};

pub const CLASS: &str = "airbridge";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AirbridgeOptions {
    /// Distance between the two landing squares; usually `cpw_width + 2*cpw_gap`.
    pub crossover_length: ScalarExpr,
    /// Side of each landing square, also the bridge width.
    pub inner_length: ScalarExpr,
    /// Margin of the outer rectangle around squares and bridge.
    pub outer_buffer: ScalarExpr,
    pub square_layer: u32,
    pub bridge_layer: u32,
    pub outer_layer: u32,
    pub pos_x: ScalarExpr,
    pub pos_y: ScalarExpr,
    pub orientation: ScalarExpr,
}

impl Default for AirbridgeOptions {
    fn default() -> Self {
        Self {
            crossover_length: ScalarExpr::expr("22um"),
            inner_length: ScalarExpr::expr("8um"),
            outer_buffer: ScalarExpr::expr("3um"),
            square_layer: 30,
            bridge_layer: 31,
            outer_layer: 32,
            pos_x: ScalarExpr::Number(0.0),
            pos_y: ScalarExpr::Number(0.0),
            orientation: ScalarExpr::Number(0.0),
        }
    }
}

/// Resolved airbridge dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirbridgeParams {
    pub crossover_length: f64,
    pub inner_length: f64,
    pub outer_buffer: f64,
    pub square_layer: u32,
    pub bridge_layer: u32,
    pub outer_layer: u32,
}

impl AirbridgeParams {
    pub fn new(crossover_length: f64, inner_length: f64, outer_buffer: f64) -> Self {
        Self {
            crossover_length,
            inner_length,
            outer_buffer,
            square_layer: 30,
            bridge_layer: 31,
            outer_layer: 32,
        }
    }

    fn validate(self) -> Result<Self, ComponentError> {
        non_negative("crossover_length", self.crossover_length)?;
        positive("inner_length", self.inner_length)?;
        non_negative("outer_buffer", self.outer_buffer)?;
        Ok(self)
    }
}

impl AirbridgeOptions {
    pub fn resolve(&self, units: &Units) -> Result<(AirbridgeParams, [f64; 3]), ComponentError> {
        let params = AirbridgeParams {
            crossover_length: units.value("crossover_length", &self.crossover_length)?,
            inner_length: units.value("inner_length", &self.inner_length)?,
            outer_buffer: units.value("outer_buffer", &self.outer_buffer)?,
            square_layer: self.square_layer,
            bridge_layer: self.bridge_layer,
            outer_layer: self.outer_layer,
        }
        .validate()?;
        let pose = [
            units.value("pos_x", &self.pos_x)?,
            units.value("pos_y", &self.pos_y)?,
            units.value("orientation", &self.orientation)?,
        ];
        Ok((params, pose))
    }
}

/// Base footprint at the origin, unrotated. Pure function of its parameters.
pub fn build(params: &AirbridgeParams) -> Footprint {
    let AirbridgeParams {
        crossover_length: crossover,
        inner_length: inner,
        outer_buffer: buffer,
        ..
    } = *params;

    let square_offset = crossover / 2.0 + inner / 2.0;
    let inside_struct = Region::union_all(vec![
        rectangle((-square_offset, 0.0), (inner, inner), 0.0),
        rectangle((square_offset, 0.0), (inner, inner), 0.0),
    ]);
    let bridge_struct = Region::single(rectangle(
        (0.0, 0.0),
        (crossover + 2.0 * inner, inner),
        0.0,
    ));
    let outside_struct = Region::single(rectangle(
        (0.0, 0.0),
        (
            crossover + 2.0 * inner + 2.0 * buffer,
            inner + 2.0 * buffer,
        ),
        0.0,
    ));

    let mut fp = Footprint::default();
    fp.insert("bridge_struct", bridge_struct, params.bridge_layer, false);
    fp.insert("inside_struct", inside_struct, params.square_layer, false);
    fp.insert("outside_struct", outside_struct, params.outer_layer, false);
    fp
}

/// The airbridge as a standalone component: the footprint placed at its own pose.
pub fn make(options: &AirbridgeOptions, units: &Units) -> Result<ComponentGeometry, ComponentError> {
    let (params, [x, y, orientation]) = options.resolve(units)?;
    let mut geom = ComponentGeometry::default();
    for (label, shape) in build(&params).shapes {
        let region = shape.region.rotated(orientation).translated(x, y);
        geom.add_poly(&label, region, shape.layer, shape.subtract);
    }
    Ok(geom)
}
