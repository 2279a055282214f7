//! Cone glyph placement and tooltip text for a probe.

use glam::DVec3;
use serde::Serialize;

use crate::field::FieldValue;
use crate::options::Options;
use crate::pick::ProbeResult;

/// State of the cone glyph that marks the probed point.
///
/// Unset members are omitted when serialized so the renderer keeps its
/// previous geometry for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphState {
    pub resolution: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<DVec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<DVec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl GlyphState {
    /// A glyph carrying only its resolution.
    pub fn empty(resolution: u32) -> Self {
        Self {
            resolution,
            center: None,
            height: None,
            direction: None,
            radius: None,
        }
    }
}

/// Places the cone for a probe.
///
/// Vector fields orient the cone and scale its height; when several are
/// present the last one in field order wins. A zero vector leaves height and
/// direction unset. The scalar field named [`Options::radius_field`] scales
/// the radius. With a direction, the cone is moved back by half its height
/// so its base sits on the probed point.
pub fn place_glyph(probe: Option<&ProbeResult>, options: &Options) -> GlyphState {
    let mut glyph = GlyphState::empty(options.cone_resolution);
    let Some(probe) = probe else {
        return glyph;
    };

    let mut orientation: Option<(f64, DVec3)> = None;
    for probed in &probe.values {
        match probed.value {
            FieldValue::Vector(v) => {
                let norm = v.length();
                if norm > 0.0 {
                    orientation = Some((options.vector_scale * norm, v / norm));
                }
            }
            FieldValue::Scalar(value) => {
                if probed.name == options.radius_field {
                    glyph.radius = Some(value * options.scalar_scale);
                }
            }
        }
    }

    let mut center = probe.position;
    if let Some((height, direction)) = orientation {
        center -= 0.5 * height * direction;
        glyph.height = Some(height);
        glyph.direction = Some(direction);
    }
    glyph.center = Some(center);
    glyph
}

/// Tooltip text for a probe: one line per field, empty without a probe.
pub fn tooltip_text(probe: Option<&ProbeResult>) -> String {
    probe.map(|p| p.lines().join("\n")).unwrap_or_default()
}
