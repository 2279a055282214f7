//! Core abstractions for foamprobe.
//!
//! This crate provides the pure pieces of the probe viewer:
//! - [`SurfaceMesh`] and [`Field`] for part geometry with per-point data
//! - [`MeshCache`], the read-only part registry shared by all sessions
//! - [`color_mapping`] for the surface coloring policy
//! - [`resolve_probe`] and [`place_glyph`] for the hover probe
//! - [`Options`] for dataset-dependent configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod color_map;
pub mod error;
pub mod field;
pub mod glyph;
pub mod mesh;
pub mod options;
pub mod pick;
pub mod registry;

pub use color_map::{color_mapping, ColorMapping, ColorSelection, MapperConfig, ScalarMode};
pub use error::{FoamProbeError, Result};
pub use field::{Field, FieldData, FieldKind, FieldValue};
pub use glyph::{place_glyph, tooltip_text, GlyphState};
pub use mesh::SurfaceMesh;
pub use options::Options;
pub use pick::{resolve_probe, HoverEvent, HoverInfo, ProbeResult, ProbedValue};
pub use registry::MeshCache;

// Re-export glam types for convenience
pub use glam::DVec3;
