//! foamprobe: hover probing and surface coloring for OpenFOAM vehicle meshes.
//!
//! The crate holds the logic behind a small CFD viewer screen. A UI adapter
//! forwards events to a [`Controller`] and applies the returned updates to
//! its view; no rendering happens here.
//!
//! # Quick Start
//!
//! ```no_run
//! use foamprobe::*;
//!
//! fn main() -> Result<()> {
//!     let options = Options::default();
//!     let controller = Controller::new(Scene::load(&options)?, options);
//!     let mut session = controller.new_session();
//!
//!     // Coloring dropdown changed to pressure
//!     let coloring = controller.on_color_change(&mut session, "p")?;
//!     println!("{}", serde_json::to_string(&coloring)?);
//!
//!     // Pointer hovers over a part
//!     let hover = HoverEvent::new("body", DVec3::new(1.0, 0.2, 0.5));
//!     let (tooltip, glyph) = controller.probe(Some(&hover));
//!     println!("{tooltip}\n{glyph:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Events
//!
//! - [`Controller::on_color_change`] - coloring dropdown
//! - [`Controller::on_geometry_change`] - part-group checklist
//! - [`Controller::on_isosurface_change`] - isosurface checklist
//! - [`Controller::on_hover`] - hover payload from the view

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod controller;
pub mod load;
pub mod scene;
pub mod session;
pub mod vtk;

pub use controller::{
    ColoringUpdate, Controller, DisplayProperty, HoverUpdate, PartUpdate, Representation, Visibility,
    VisibilityUpdate,
};
pub use load::{load_dir, load_mesh, read_mesh};
pub use scene::Scene;
pub use session::{RenderToken, Session, Update};
pub use vtk::{load_vtp, mesh_from_vtk};

// Re-export core types
pub use foamprobe_core::{
    color_mapping,
    error::{FoamProbeError, Result},
    place_glyph, resolve_probe, tooltip_text, ColorMapping, ColorSelection, DVec3, Field,
    FieldData, FieldKind, FieldValue, GlyphState, HoverEvent, HoverInfo, MapperConfig, MeshCache,
    Options, ProbeResult, ProbedValue, SurfaceMesh,
};
