//! Trajectory ribbon meshes
//!
//! Turns a well's survey / vibration table into renderable 3D primitives:
//! plain lead-in and lead-out lines, an RPM-colored centerline over the
//! instrumented span, and two ribbons extruded along the vertical axis
//! (vibration amplitude upward, weight on bit downward).
//!
//! Render space uses negated vertical depth, so "up" is shallower.

mod ribbon;
mod scene;

pub use ribbon::*;
pub use scene::*;

use thiserror::Error;

/// Input violates a precondition of the mesh builder.
///
/// Every variant is detected before any geometry is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataShapeError {
    #[error("Well {well}: column '{column}' not present")]
    MissingColumn { well: String, column: String },

    #[error("Well {well}: channel '{channel}' has no valid samples")]
    ChannelEntirelyMissing { well: String, channel: String },

    #[error("Well {well}: channel '{channel}' spans {have} samples, need at least {need}")]
    InsufficientSpan {
        well: String,
        channel: String,
        have: usize,
        need: usize,
    },

    #[error("Well {well}: channel '{channel}' has a gap at row {position} inside its valid span")]
    InteriorGap {
        well: String,
        channel: String,
        position: usize,
    },

    #[error("Well {well}: '{column}' missing or non-finite at row {position} inside the valid span")]
    MissingValue {
        well: String,
        column: String,
        position: usize,
    },

    #[error("Well {well}: amplified '{column}' at row {position} leaves the representable range")]
    OutOfRange {
        well: String,
        column: String,
        position: usize,
    },
}

/// Errors building a multi-well scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    #[error("Unknown well: {0}")]
    UnknownWell(String),

    #[error("No wells selected")]
    EmptySelection,
}
