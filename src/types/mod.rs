//! Shared data structures for the vibration explorer
//!
//! - Survey / vibration tables (per-well input to the mesh builder and log panels)
//! - Render geometry (polylines, triangle meshes, color scales)
//! - Strip-chart time series (real-time viewer input)

mod geometry;
mod strip;
mod survey;

pub use geometry::*;
pub use strip::*;
pub use survey::*;
