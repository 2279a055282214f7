//! Hover probing: nearest mesh point and its field values.

use std::fmt;

use glam::DVec3;
use serde::Deserialize;

use crate::field::FieldValue;
use crate::registry::MeshCache;

/// A hover over a part, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    /// The hovered part.
    pub part_id: String,
    /// The hovered location.
    pub world_position: DVec3,
}

impl HoverEvent {
    /// Creates a hover event over `part_id` at `world_position`.
    pub fn new(part_id: impl Into<String>, world_position: DVec3) -> Self {
        Self {
            part_id: part_id.into(),
            world_position,
        }
    }
}

/// Hover payload as reported by the view.
///
/// The view may report a hover without naming the representation under the
/// pointer; such payloads carry no [`HoverEvent`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    #[serde(default)]
    pub representation_id: Option<String>,
    pub world_position: [f64; 3],
}

impl HoverInfo {
    /// Returns the hover event, if the payload names a representation.
    pub fn event(&self) -> Option<HoverEvent> {
        self.representation_id
            .as_ref()
            .map(|id| HoverEvent::new(id.as_str(), DVec3::from_array(self.world_position)))
    }
}

/// One field's value at the probed point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedValue {
    pub name: String,
    pub value: FieldValue,
}

impl ProbedValue {
    /// Euclidean norm, for vector values.
    pub fn norm(&self) -> Option<f64> {
        match self.value {
            FieldValue::Scalar(_) => None,
            FieldValue::Vector(v) => Some(v.length()),
        }
    }
}

impl fmt::Display for ProbedValue {
    /// `p: 1000.00` or `U: 3.00, 4.00, 0.00 norm(5.00)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            FieldValue::Scalar(value) => write!(f, "{}: {value:.2}", self.name),
            FieldValue::Vector(v) => write!(
                f,
                "{}: {:.2}, {:.2}, {:.2} norm({:.2})",
                self.name,
                v.x,
                v.y,
                v.z,
                v.length()
            ),
        }
    }
}

/// The nearest point to a hover and every field value there.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Part the point belongs to.
    pub part: String,
    /// Index of the point in its mesh.
    pub index: usize,
    /// Coordinate of the point.
    pub position: DVec3,
    /// Field values, in the mesh's field order.
    pub values: Vec<ProbedValue>,
}

impl ProbeResult {
    /// One formatted line per field.
    pub fn lines(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }
}

/// Resolves a hover to the nearest point of the hovered part.
///
/// Returns `None` ("no probe") when there is no hover, the part is not
/// cached, or the part has no point to report.
pub fn resolve_probe(cache: &MeshCache, hover: Option<&HoverEvent>) -> Option<ProbeResult> {
    let hover = hover?;
    let Some(mesh) = cache.get(&hover.part_id) else {
        log::debug!("hover over unknown part '{}'", hover.part_id);
        return None;
    };

    let index = mesh.find_point(hover.world_position)?;
    let position = mesh.point(index)?;
    let values = mesh
        .fields()
        .iter()
        .filter_map(|field| {
            field.value_at(index).map(|value| ProbedValue {
                name: field.name().to_string(),
                value,
            })
        })
        .collect();

    Some(ProbeResult {
        part: mesh.name().to_string(),
        index,
        position,
        values,
    })
}
