//! Airbridge placement along CPW paths and stamping of the bridge footprint.

pub mod airbridging;
pub mod error;
pub mod planner;
pub mod stamper;

pub use airbridging::{
    AirbridgeReport, Airbridging, FootprintRequest, PathPlacements, PathSource, UniformAirbridging,
};
pub use error::AirbridgeError;
pub use planner::{bridge_count, plan, PlanParams, DEFAULT_PRECISION, MAX_BRIDGES_PER_SEGMENT};
pub use stamper::{stamp, GeometryRow, GeometryTable};
