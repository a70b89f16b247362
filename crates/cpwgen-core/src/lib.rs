//! Shared pose type and planar helpers.

pub mod point;

pub use point::{rotate_point, rotate_vec, Point};
