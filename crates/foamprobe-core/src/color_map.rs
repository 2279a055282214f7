//! Surface coloring policy.
//!
//! Maps the field chosen in the coloring dropdown to the mapper settings and
//! display range that every part's representation receives. The range comes
//! from [`Options::color_ranges`], never from the data.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{FoamProbeError, Result};
use crate::options::Options;

/// Display range used when no field drives the coloring.
pub const SOLID_RANGE: [f64; 2] = [0.0, 1.0];

/// The current surface coloring choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColorSelection {
    /// Flat color, no scalar mapping.
    #[default]
    Solid,
    /// Color by the named point field.
    Field(String),
}

impl ColorSelection {
    /// Dropdown value of [`ColorSelection::Solid`].
    pub const SOLID: &'static str = "solid";

    /// Parses a dropdown value, accepting `solid` and the configured fields.
    pub fn parse(value: &str, options: &Options) -> Result<Self> {
        if value == Self::SOLID {
            Ok(Self::Solid)
        } else if options.color_ranges.contains_key(value) {
            Ok(Self::Field(value.to_string()))
        } else {
            Err(FoamProbeError::UnknownField(value.to_string()))
        }
    }

    /// Returns the dropdown value for this selection.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Solid => Self::SOLID,
            Self::Field(name) => name,
        }
    }

    /// Lists every selectable value: `solid` followed by the configured fields.
    pub fn options(options: &Options) -> Vec<Self> {
        std::iter::once(Self::Solid)
            .chain(options.color_ranges.keys().cloned().map(Self::Field))
            .collect()
    }
}

impl fmt::Display for ColorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ColorSelection {
    fn from(value: String) -> Self {
        if value == Self::SOLID {
            Self::Solid
        } else {
            Self::Field(value)
        }
    }
}

impl From<ColorSelection> for String {
    fn from(selection: ColorSelection) -> Self {
        match selection {
            ColorSelection::Solid => ColorSelection::SOLID.to_string(),
            ColorSelection::Field(name) => name,
        }
    }
}

/// Which data the mapper reads scalars from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarMode {
    /// Color by a named point-data array.
    UsePointFieldData = 3,
}

impl Serialize for ScalarMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Mapper settings sent to each part representation.
///
/// Serializes to the renderer's property names; unset settings are omitted
/// so the renderer keeps its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by_array_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_mode: Option<ScalarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolate_scalars_before_mapping: Option<bool>,
    pub scalar_visibility: bool,
}

impl MapperConfig {
    /// Flat coloring.
    pub fn solid() -> Self {
        Self {
            color_by_array_name: None,
            scalar_mode: None,
            interpolate_scalars_before_mapping: None,
            scalar_visibility: false,
        }
    }

    /// Interpolated coloring by a point field.
    pub fn point_field(name: impl Into<String>) -> Self {
        Self {
            color_by_array_name: Some(name.into()),
            scalar_mode: Some(ScalarMode::UsePointFieldData),
            interpolate_scalars_before_mapping: Some(true),
            scalar_visibility: true,
        }
    }
}

/// Mapper settings and display range for one coloring choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMapping {
    pub mapper: MapperConfig,
    pub range: [f64; 2],
}

/// Computes the coloring for a selection.
///
/// Pure: equal inputs give equal outputs. Fails only for a field that has no
/// configured range.
pub fn color_mapping(selection: &ColorSelection, options: &Options) -> Result<ColorMapping> {
    match selection {
        ColorSelection::Solid => Ok(ColorMapping {
            mapper: MapperConfig::solid(),
            range: SOLID_RANGE,
        }),
        ColorSelection::Field(name) => {
            let range = options
                .color_ranges
                .get(name)
                .copied()
                .ok_or_else(|| FoamProbeError::UnknownField(name.clone()))?;
            Ok(ColorMapping {
                mapper: MapperConfig::point_field(name.as_str()),
                range,
            })
        }
    }
}
