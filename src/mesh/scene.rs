//! Multi-well scene composition
//!
//! Each selected well is built independently and the five-primitive lists are
//! concatenated in selection order. Wells share nothing, so they are built in
//! parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{build_well_traces, MeshError};
use crate::config::RibbonStyle;
use crate::types::{Primitive, WellCorpus};

/// Axis titles and framing for a 3D scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub x_title: String,
    pub y_title: String,
    pub z_title: String,
    pub margin: u32,
    pub show_legend: bool,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            x_title: "N".to_string(),
            y_title: "E".to_string(),
            z_title: "TVD".to_string(),
            margin: 10,
            show_legend: false,
        }
    }
}

/// Render list for one or more wells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub channel: String,
    pub wells: Vec<String>,
    pub primitives: Vec<Primitive>,
    pub layout: SceneLayout,
}

/// Build the combined render list for the selected wells.
///
/// Fails on the first unknown well or malformed series; no partial scene is
/// returned.
pub fn build_scene<S: AsRef<str> + Sync>(
    corpus: &WellCorpus,
    wells: &[S],
    channel: &str,
    style: &RibbonStyle,
) -> Result<Scene, MeshError> {
    if wells.is_empty() {
        return Err(MeshError::EmptySelection);
    }

    let selected = wells
        .iter()
        .map(|name| {
            corpus
                .get(name.as_ref())
                .ok_or_else(|| MeshError::UnknownWell(name.as_ref().to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let per_well = selected
        .par_iter()
        .map(|series| build_well_traces(series, channel, style))
        .collect::<Result<Vec<_>, _>>()?;

    let primitives: Vec<Primitive> = per_well
        .into_iter()
        .flat_map(|traces| traces.into_primitives())
        .collect();

    for primitive in &primitives {
        debug!(
            role = %primitive.role,
            label = ?primitive.label,
            vertices = primitive.vertices().len(),
            "Scene primitive"
        );
    }

    info!(
        wells = selected.len(),
        channel,
        primitives = primitives.len(),
        "Scene built"
    );

    Ok(Scene {
        channel: channel.to_string(),
        wells: selected.iter().map(|s| s.name.clone()).collect(),
        primitives,
        layout: SceneLayout::default(),
    })
}
