//! Renderable geometry produced by the mesh builder
//!
//! Plain data only: vertex coordinates, triangle index lists, colors and
//! labels. Any 3D scene graph or plotting library can consume it.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Upper-case hex without prefix, e.g. `FF0000`
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

/// Point in render space: x = north, y = east, z = negated vertical depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// ============================================================================
// Color Scale
// ============================================================================

/// Two-color scale with a hard break at a fixed threshold value.
///
/// Values at or below `threshold` map to `low`, values above to `high`.
/// `break_fraction` is the threshold's normalized position within
/// `[min, max]`, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdColorScale {
    pub threshold: f64,
    pub min: f64,
    pub max: f64,
    pub break_fraction: f64,
    pub low: Rgb,
    pub high: Rgb,
}

impl ThresholdColorScale {
    /// Fit the scale to an observed value range.
    ///
    /// A flat range (`min == max`) yields a uniform scale: the break sits at
    /// 1.0 when the constant is at or below the threshold and 0.0 otherwise.
    pub fn fit(threshold: f64, min: f64, max: f64, low: Rgb, high: Rgb) -> Self {
        let span = max - min;
        let break_fraction = if span > 0.0 {
            ((threshold - min) / span).clamp(0.0, 1.0)
        } else if min <= threshold {
            1.0
        } else {
            0.0
        };
        Self {
            threshold,
            min,
            max,
            break_fraction,
            low,
            high,
        }
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        if value <= self.threshold {
            self.low
        } else {
            self.high
        }
    }

    /// True when the scale cannot distinguish values (flat range)
    pub fn is_uniform(&self) -> bool {
        self.max <= self.min
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// How a polyline is colored along its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LineColoring {
    Solid {
        color: Rgb,
    },
    /// Per-vertex values mapped through a threshold scale
    Scaled {
        values: Vec<f64>,
        scale: ThresholdColorScale,
        vertex_colors: Vec<Rgb>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Vertex3>,
    pub width: f64,
    pub coloring: LineColoring,
}

/// Triangle mesh with a solid fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Vertex3>,
    /// Vertex indices, one `[i, j, k]` per triangle
    pub triangles: Vec<[usize; 3]>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Line(Polyline),
    Mesh(TriangleMesh),
}

/// What a primitive depicts within one well's trace set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveRole {
    LeadIn,
    LeadOut,
    RpmCenterline,
    VibrationRibbon,
    WobRibbon,
}

impl std::fmt::Display for PrimitiveRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrimitiveRole::LeadIn => "lead-in",
            PrimitiveRole::LeadOut => "lead-out",
            PrimitiveRole::RpmCenterline => "rpm-centerline",
            PrimitiveRole::VibrationRibbon => "vibration-ribbon",
            PrimitiveRole::WobRibbon => "wob-ribbon",
        };
        f.write_str(name)
    }
}

/// A labelled renderable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub role: PrimitiveRole,
    pub label: Option<String>,
    pub geometry: Geometry,
}

impl Primitive {
    pub fn vertices(&self) -> &[Vertex3] {
        match &self.geometry {
            Geometry::Line(line) => &line.vertices,
            Geometry::Mesh(mesh) => &mesh.vertices,
        }
    }

    pub fn as_line(&self) -> Option<&Polyline> {
        match &self.geometry {
            Geometry::Line(line) => Some(line),
            Geometry::Mesh(_) => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&TriangleMesh> {
        match &self.geometry {
            Geometry::Mesh(mesh) => Some(mesh),
            Geometry::Line(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: Rgb = Rgb::new(204, 204, 0);
    const HIGH: Rgb = Rgb::new(0, 0, 0);

    #[test]
    fn test_break_fraction_midpoint() {
        let scale = ThresholdColorScale::fit(30.0, 10.0, 50.0, LOW, HIGH);
        assert!((scale.break_fraction - 0.5).abs() < 1e-12);
        assert_eq!(scale.color_for(30.0), LOW);
        assert_eq!(scale.color_for(30.5), HIGH);
    }

    #[test]
    fn test_break_fraction_clamped() {
        let above = ThresholdColorScale::fit(30.0, 60.0, 120.0, LOW, HIGH);
        assert_eq!(above.break_fraction, 0.0);
        let below = ThresholdColorScale::fit(30.0, 0.0, 20.0, LOW, HIGH);
        assert_eq!(below.break_fraction, 1.0);
    }

    #[test]
    fn test_flat_range_is_uniform_not_nan() {
        let slow = ThresholdColorScale::fit(30.0, 25.0, 25.0, LOW, HIGH);
        assert!(slow.is_uniform());
        assert_eq!(slow.break_fraction, 1.0);
        let fast = ThresholdColorScale::fit(30.0, 80.0, 80.0, LOW, HIGH);
        assert_eq!(fast.break_fraction, 0.0);
        assert!(fast.break_fraction.is_finite());
    }

    #[test]
    fn test_rgb_formats() {
        let c = Rgb::new(255, 0, 128);
        assert_eq!(c.hex(), "FF0080");
        assert_eq!(c.to_string(), "rgb(255, 0, 128)");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(PrimitiveRole::RpmCenterline.to_string(), "rpm-centerline");
        assert_eq!(format!("{}", PrimitiveRole::LeadIn), "lead-in");
    }

    #[test]
    fn test_primitive_serializes_tagged() {
        let prim = Primitive {
            role: PrimitiveRole::WobRibbon,
            label: Some("W-1-WOB".to_string()),
            geometry: Geometry::Mesh(TriangleMesh {
                vertices: vec![],
                triangles: vec![],
                color: Rgb::new(255, 102, 102),
            }),
        };
        let json = serde_json::to_value(&prim).unwrap();
        assert_eq!(json["role"], "wob_ribbon");
        assert_eq!(json["geometry"]["type"], "mesh");
    }
}
