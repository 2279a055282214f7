//! Configuration options for foamprobe.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration options.
///
/// Every key is optional in the JSON form; missing keys take the values of
/// [`Options::default`], which match the reference vehicle dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory holding `vehicle/` and `isosurfaces/` mesh folders.
    pub data_path: PathBuf,

    /// Color map preset name passed through to the renderer.
    pub color_map_preset: String,

    /// Display range per coloring field. The keys are the selectable fields.
    pub color_ranges: BTreeMap<String, [f64; 2]>,

    /// Cone height per unit of vector magnitude.
    pub vector_scale: f64,

    /// Cone radius per unit of the radius field.
    pub scalar_scale: f64,

    /// Name of the scalar field that drives the cone radius.
    pub radius_field: String,

    /// Cone tessellation.
    pub cone_resolution: u32,

    /// Part groups offered in the geometry checklist.
    pub part_groups: Vec<String>,

    /// RGB color of isosurfaces.
    pub isosurface_color: [f64; 3],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data"),
            color_map_preset: "erdc_rainbow_bright".to_string(),
            color_ranges: BTreeMap::from([
                ("U".to_string(), [0.0, 100.0]),
                ("p".to_string(), [-4464.0, 1700.0]),
            ]),
            vector_scale: 0.01,
            scalar_scale: 0.0001,
            radius_field: "p".to_string(),
            cone_resolution: 12,
            part_groups: ["body", "drive-train", "front-wing", "rear-wing"]
                .into_iter()
                .map(String::from)
                .collect(),
            isosurface_color: [1.0, 0.0, 0.0],
        }
    }
}

impl Options {
    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::info!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Directory of vehicle part meshes.
    pub fn vehicle_dir(&self) -> PathBuf {
        self.data_path.join("vehicle")
    }

    /// Directory of isosurface meshes.
    pub fn isosurface_dir(&self) -> PathBuf {
        self.data_path.join("isosurfaces")
    }
}
