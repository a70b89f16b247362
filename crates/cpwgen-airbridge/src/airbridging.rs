//! Airbridging pass over a whole design: pick the eligible paths, plan each one, and
//! stamp one footprint at every placement.

use cpwgen_components::{extract_footprint, ComponentError, Design, Footprint, PathRecord};
use cpwgen_core::Point;
use cpwgen_parser::{OnError, RawAirbridging, Units};
use serde::Serialize;

use crate::error::AirbridgeError;
use crate::planner::{plan, PlanParams, DEFAULT_PRECISION};
use crate::stamper::{stamp, GeometryTable};

/// Where the planner reads path geometry from.
pub trait PathSource {
    fn path_vertices(&self, name: &str) -> Result<Vec<(f64, f64)>, AirbridgeError>;
    fn fillet(&self, name: &str) -> Result<f64, AirbridgeError>;
}

impl PathSource for Design {
    fn path_vertices(&self, name: &str) -> Result<Vec<(f64, f64)>, AirbridgeError> {
        Ok(lookup(self, name)?.points.clone())
    }

    fn fillet(&self, name: &str) -> Result<f64, AirbridgeError> {
        Ok(lookup(self, name)?.fillet)
    }
}

fn lookup<'a>(design: &'a Design, name: &str) -> Result<&'a PathRecord, AirbridgeError> {
    design.path(name).ok_or_else(|| AirbridgeError::UnknownPath {
        name: name.to_string(),
    })
}

/// A footprint to stamp: a component class plus its options.
#[derive(Debug, Clone)]
pub struct FootprintRequest {
    pub class: String,
    pub options: serde_yaml::Mapping,
}

impl FootprintRequest {
    pub fn new(class: &str, options: serde_yaml::Mapping) -> Self {
        Self {
            class: class.to_string(),
            options,
        }
    }

    /// The default airbridge.
    pub fn airbridge() -> Self {
        Self::new(cpwgen_components::airbridge::CLASS, serde_yaml::Mapping::new())
    }

    /// Build the component, keep its polygons, drop the rest.
    pub fn build(&self, units: &Units) -> Result<Footprint, AirbridgeError> {
        extract_footprint(&self.class, &self.options, units).map_err(|err| match err {
            ComponentError::UnknownClass { class } => AirbridgeError::UnsupportedFootprint {
                class,
                message: "not a registered component class".to_string(),
            },
            ComponentError::Degenerate { message, .. } => AirbridgeError::UnsupportedFootprint {
                class: self.class.clone(),
                message,
            },
            other => other.into(),
        })
    }
}

/// Placements planned for one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPlacements {
    pub path: String,
    pub points: Vec<Point>,
}

/// Result of a full pass: what was planned where, and the stamped rows.
#[derive(Debug, Clone, Default)]
pub struct AirbridgeReport {
    pub placements: Vec<PathPlacements>,
    pub skipped: Vec<String>,
    pub table: GeometryTable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airbridging {
    /// Vertex quantization grid in millimetres.
    pub precision: f64,
    pub on_error: OnError,
}

impl Default for Airbridging {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            on_error: OnError::Abort,
        }
    }
}

impl Airbridging {
    pub fn new(precision: f64, on_error: OnError) -> Self {
        Self {
            precision,
            on_error,
        }
    }

    /// Paths tagged for airbridges, by qualified name.
    pub fn cpws_with_ab<'a>(&self, design: &'a Design) -> Vec<(String, &'a PathRecord)> {
        design.paths().filter(|(_, path)| path.make_airbridge).collect()
    }

    pub fn find_uniform_ab_placement(
        &self,
        source: &dyn PathSource,
        name: &str,
        bridge_pitch: f64,
        bridge_minimum_spacing: f64,
    ) -> Result<Vec<Point>, AirbridgeError> {
        let vertices = source.path_vertices(name)?;
        let params = PlanParams::new(source.fillet(name)?, bridge_pitch, bridge_minimum_spacing)
            .with_precision(self.precision);
        plan(&vertices, &params)
    }

    /// Plan every eligible path and stamp the footprint at each placement.
    pub fn airbridge(
        &self,
        design: &Design,
        footprint: &FootprintRequest,
        bridge_pitch: f64,
        bridge_minimum_spacing: f64,
    ) -> Result<AirbridgeReport, AirbridgeError> {
        // Parameters shared by every path are checked once, whatever the error policy.
        PlanParams::new(0.0, bridge_pitch, bridge_minimum_spacing)
            .with_precision(self.precision)
            .validate()?;
        let footprint = footprint.build(&design.units)?;

        let mut report = AirbridgeReport::default();
        for (name, _) in self.cpws_with_ab(design) {
            let points = match self.find_uniform_ab_placement(
                design,
                &name,
                bridge_pitch,
                bridge_minimum_spacing,
            ) {
                Ok(points) => points,
                Err(err) => match self.on_error {
                    OnError::Abort => return Err(err.in_path(&name)),
                    OnError::Skip => {
                        tracing::warn!(path = %name, error = %err, "skipping path");
                        report.skipped.push(name);
                        continue;
                    }
                },
            };
            tracing::debug!(path = %name, bridges = points.len(), "placed airbridges");
            report.table.extend(stamp(&footprint, &points));
            report.placements.push(PathPlacements { path: name, points });
        }
        Ok(report)
    }

    pub fn make_uniform_airbridging(
        &self,
        design: &Design,
        footprint: &FootprintRequest,
        bridge_pitch: f64,
        bridge_minimum_spacing: f64,
    ) -> Result<GeometryTable, AirbridgeError> {
        Ok(self
            .airbridge(design, footprint, bridge_pitch, bridge_minimum_spacing)?
            .table)
    }
}

/// The `airbridges` block of a design file, resolved.
#[derive(Debug, Clone)]
pub struct UniformAirbridging {
    pub airbridging: Airbridging,
    pub footprint: FootprintRequest,
    pub bridge_pitch: f64,
    pub bridge_minimum_spacing: f64,
}

impl UniformAirbridging {
    pub fn from_raw(raw: &RawAirbridging, units: &Units) -> Result<Self, AirbridgeError> {
        let precision = match &raw.precision {
            Some(expr) => units.value("precision", expr)?,
            None => DEFAULT_PRECISION,
        };
        Ok(Self {
            airbridging: Airbridging::new(precision, raw.on_error),
            footprint: FootprintRequest::new(&raw.footprint.class, raw.footprint.options.clone()),
            bridge_pitch: units.value("bridge_pitch", &raw.bridge_pitch)?,
            bridge_minimum_spacing: units.value(
                "bridge_minimum_spacing",
                &raw.bridge_minimum_spacing,
            )?,
        })
    }

    pub fn run(&self, design: &Design) -> Result<AirbridgeReport, AirbridgeError> {
        self.airbridging.airbridge(
            design,
            &self.footprint,
            self.bridge_pitch,
            self.bridge_minimum_spacing,
        )
    }
}
