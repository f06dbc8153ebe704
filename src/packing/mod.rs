//! Spatial candidate enumeration for box placement.
//!
//! - [`reachable_offsets`] — bounded subset-sum reachability along one axis
//! - [`PositionGrid`] — per-axis candidate sets and per-type admissible subsets

mod positions;

pub use positions::{reachable_offsets, AxisPositions, PositionGrid};
