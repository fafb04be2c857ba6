//! Per-well ribbon mesh builder

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataShapeError;
use crate::config::defaults::MIN_RIBBON_SAMPLES;
use crate::config::RibbonStyle;
use crate::types::{
    Geometry, LineColoring, Polyline, Primitive, PrimitiveRole, Rgb, SurveyVibrationRow,
    ThresholdColorScale, TriangleMesh, ValidSpan, Vertex3, WellSeries, ROTARY_RPM_COLUMN,
    WEIGHT_ON_BIT_COLUMN,
};

/// The five primitives describing one well, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellTraces {
    pub well: String,
    pub channel: String,
    /// Positional range of the channel's valid samples
    pub span: ValidSpan,
    pub lead_in: Primitive,
    pub lead_out: Primitive,
    pub centerline: Primitive,
    pub vibration_ribbon: Primitive,
    pub wob_ribbon: Primitive,
}

impl WellTraces {
    /// Lead-in, lead-out, centerline, vibration ribbon, WOB ribbon
    pub fn into_primitives(self) -> Vec<Primitive> {
        vec![
            self.lead_in,
            self.lead_out,
            self.centerline,
            self.vibration_ribbon,
            self.wob_ribbon,
        ]
    }

    /// Centerline color scale
    pub fn rpm_scale(&self) -> Option<&ThresholdColorScale> {
        match self.centerline.as_line()?.coloring {
            LineColoring::Scaled { ref scale, .. } => Some(scale),
            LineColoring::Solid { .. } => None,
        }
    }
}

/// One fully-populated sample inside the valid span
struct SpanSample {
    at: Vertex3,
    rpm: f64,
    /// Top of the vibration ribbon
    vibration_z: f64,
    /// Bottom of the WOB ribbon
    wob_z: f64,
}

/// Build the five render primitives for one well.
///
/// - lead-in: rows before `first - 1` (the row just before the span is left out)
/// - lead-out: rows after `last`
/// - centerline and both ribbons: rows `first..=last`
///
/// All preconditions are checked before any geometry is allocated.
pub fn build_well_traces(
    series: &WellSeries,
    channel: &str,
    style: &RibbonStyle,
) -> Result<WellTraces, DataShapeError> {
    let well = series.name.as_str();
    let (span, samples) = collect_span(series, channel, style.amplification)?;

    let lead_in_end = span.first.saturating_sub(1);
    let lead_in = plain_line(PrimitiveRole::LeadIn, &series.rows[..lead_in_end], style);
    let lead_out = plain_line(PrimitiveRole::LeadOut, &series.rows[span.last + 1..], style);

    let centerline = rpm_centerline(well, &samples, style);

    let vibration_ribbon = Primitive {
        role: PrimitiveRole::VibrationRibbon,
        label: Some(format!("{well}-{channel}")),
        geometry: Geometry::Mesh(extrude(
            samples.iter().map(|s| s.at).collect(),
            samples
                .iter()
                .map(|s| Vertex3 { z: s.vibration_z, ..s.at })
                .collect(),
            style.vibration_color,
        )),
    };

    let wob_ribbon = Primitive {
        role: PrimitiveRole::WobRibbon,
        label: Some(format!("{well}-WOB")),
        geometry: Geometry::Mesh(extrude(
            samples
                .iter()
                .map(|s| Vertex3 { z: s.wob_z, ..s.at })
                .collect(),
            samples.iter().map(|s| s.at).collect(),
            style.wob_color,
        )),
    };

    debug!(
        well,
        channel,
        first = span.first,
        last = span.last,
        lead_in = lead_in.vertices().len(),
        lead_out = lead_out.vertices().len(),
        "Built well traces"
    );

    Ok(WellTraces {
        well: well.to_string(),
        channel: channel.to_string(),
        span,
        lead_in,
        lead_out,
        centerline,
        vibration_ribbon,
        wob_ribbon,
    })
}

/// Validate the span of `channel` and gather its samples.
///
/// `channel` may name any column of the series, fixed or curve.
fn collect_span(
    series: &WellSeries,
    channel: &str,
    amplification: f64,
) -> Result<(ValidSpan, Vec<SpanSample>), DataShapeError> {
    let well = series.name.as_str();
    let channel_values = series
        .column(channel)
        .ok_or_else(|| DataShapeError::MissingColumn {
            well: well.to_string(),
            column: channel.to_string(),
        })?;

    let span = series
        .valid_span(channel)
        .ok_or_else(|| DataShapeError::ChannelEntirelyMissing {
            well: well.to_string(),
            channel: channel.to_string(),
        })?;

    if span.sample_count() < MIN_RIBBON_SAMPLES {
        return Err(DataShapeError::InsufficientSpan {
            well: well.to_string(),
            channel: channel.to_string(),
            have: span.sample_count(),
            need: MIN_RIBBON_SAMPLES,
        });
    }

    let missing = |column: &str, position: usize| DataShapeError::MissingValue {
        well: well.to_string(),
        column: column.to_string(),
        position,
    };

    let mut samples = Vec::with_capacity(span.sample_count());
    for (pos, row) in series.rows[span.first..=span.last].iter().enumerate() {
        let pos = span.first + pos;

        let amplitude = channel_values[pos].ok_or_else(|| {
            DataShapeError::InteriorGap {
                well: well.to_string(),
                channel: channel.to_string(),
                position: pos,
            }
        })?;
        let amplitude = finite(amplitude).ok_or_else(|| missing(channel, pos))?;
        let rpm = row
            .rotary_rpm
            .and_then(finite)
            .ok_or_else(|| missing(ROTARY_RPM_COLUMN, pos))?;
        let wob = row
            .weight_on_bit
            .and_then(finite)
            .ok_or_else(|| missing(WEIGHT_ON_BIT_COLUMN, pos))?;
        if !(row.north.is_finite() && row.east.is_finite() && row.vertical_depth.is_finite()) {
            return Err(missing("N/E/V", pos));
        }

        let at = render_point(row);
        let out_of_range = |column: &str| DataShapeError::OutOfRange {
            well: well.to_string(),
            column: column.to_string(),
            position: pos,
        };
        let vibration_z = finite(at.z + amplitude * amplification).ok_or_else(|| out_of_range(channel))?;
        let wob_z = finite(at.z - wob * amplification).ok_or_else(|| out_of_range(WEIGHT_ON_BIT_COLUMN))?;

        samples.push(SpanSample {
            at,
            rpm,
            vibration_z,
            wob_z,
        });
    }

    Ok((span, samples))
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// North / east / negated vertical depth
fn render_point(row: &SurveyVibrationRow) -> Vertex3 {
    Vertex3::new(row.north, row.east, -row.vertical_depth)
}

fn plain_line(role: PrimitiveRole, rows: &[SurveyVibrationRow], style: &RibbonStyle) -> Primitive {
    Primitive {
        role,
        label: None,
        geometry: Geometry::Line(Polyline {
            vertices: rows.iter().map(render_point).collect(),
            width: style.lead_line_width,
            coloring: LineColoring::Solid {
                color: style.lead_line_color,
            },
        }),
    }
}

fn rpm_centerline(well: &str, samples: &[SpanSample], style: &RibbonStyle) -> Primitive {
    let values: Vec<f64> = samples.iter().map(|s| s.rpm).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = ThresholdColorScale::fit(
        style.rpm_threshold,
        min,
        max,
        style.rpm_low_color,
        style.rpm_high_color,
    );
    if scale.is_uniform() {
        debug!(well, rpm = min, "Flat RPM over span, centerline is a single color");
    }

    Primitive {
        role: PrimitiveRole::RpmCenterline,
        label: Some(format!("{well}-RPM")),
        geometry: Geometry::Line(Polyline {
            vertices: samples.iter().map(|s| s.at).collect(),
            width: style.centerline_width,
            coloring: LineColoring::Scaled {
                vertex_colors: values.iter().map(|v| scale.color_for(*v)).collect(),
                values,
                scale,
            },
        }),
    }
}

/// Quad-strip between two rails of equal length `k`.
///
/// Vertices are `rail_a` then `rail_b`. For each `i < k - 1` the strip emits
/// `(a_i, b_i, b_{i+1})`, then for each `i` `(a_i, b_{i+1}, a_{i+1})`,
/// giving `2(k - 1)` triangles.
fn extrude(rail_a: Vec<Vertex3>, rail_b: Vec<Vertex3>, color: Rgb) -> TriangleMesh {
    let k = rail_a.len();
    let quads = k.saturating_sub(1);
    let triangles = (0..quads)
        .map(|i| [i, k + i, k + i + 1])
        .chain((0..quads).map(|i| [i, k + i + 1, i + 1]))
        .collect();

    let mut vertices = rail_a;
    vertices.extend(rail_b);

    TriangleMesh {
        vertices,
        triangles,
        color,
    }
}
