//! Parametric components: the airbridge footprint, CPW shapes, and the design store.

pub mod airbridge;
pub mod class;
pub mod coupled_line_tee;
pub mod design;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod options;
pub mod pin;
pub mod route;

pub use class::{extract_footprint, ComponentClass};
pub use design::Design;
pub use error::ComponentError;
pub use footprint::{Footprint, FootprintShape};
pub use geometry::{ComponentGeometry, PathRecord, PolyRecord};
pub use pin::Pin;
