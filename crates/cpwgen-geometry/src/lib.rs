//! 2D geometry primitives and operations.

pub mod band;
pub mod layers;
pub mod primitives;
pub mod region;
pub mod transform;

pub use cavalier_contours::polyline::{BooleanOp, BooleanResultInfo, PlineVertex, Polyline};
pub use layers::LayerExport;
pub use region::Region;
