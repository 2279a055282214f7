//! Reactive entry points invoked by the UI adapter.
//!
//! Each method maps one UI event to the outputs the view must apply. The
//! mesh caches are never modified; per-user state lives in [`Session`].

use std::collections::BTreeSet;

use serde::Serialize;

use foamprobe_core::color_map::SOLID_RANGE;
use foamprobe_core::{
    color_mapping, place_glyph, resolve_probe, tooltip_text, ColorSelection, GlyphState,
    HoverEvent, HoverInfo, MapperConfig, MeshCache, Options, Result,
};

use crate::scene::Scene;
use crate::session::{RenderToken, Session, Update};

/// Actor visibility of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub visibility: u8,
}

impl Visibility {
    pub const SHOWN: Self = Self { visibility: 1 };
    pub const HIDDEN: Self = Self { visibility: 0 };

    /// Maps a shown flag to its visibility value.
    pub fn from_shown(shown: bool) -> Self {
        if shown {
            Self::SHOWN
        } else {
            Self::HIDDEN
        }
    }
}

/// Surface display properties of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayProperty {
    pub color: [f64; 3],
}

/// An output addressed to one representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartUpdate<T> {
    pub part: String,
    pub value: Update<T>,
}

/// Initial description of one representation in the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Representation {
    pub id: String,
    pub color_map_preset: String,
    pub color_data_range: [f64; 2],
    pub mapper: MapperConfig,
    pub actor: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<DisplayProperty>,
}

/// Outputs of a coloring change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoringUpdate {
    pub render_token: Update<RenderToken>,
    pub mappers: Vec<PartUpdate<MapperConfig>>,
    pub color_ranges: Vec<PartUpdate<[f64; 2]>>,
}

/// Outputs of a visibility checklist change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityUpdate {
    pub render_token: Update<RenderToken>,
    pub actors: Vec<PartUpdate<Visibility>>,
}

/// Outputs of a hover change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverUpdate {
    pub tooltip: Update<String>,
    pub glyph: Update<GlyphState>,
}

/// Drives the view from UI events.
#[derive(Debug, Clone)]
pub struct Controller {
    scene: Scene,
    options: Options,
}

impl Controller {
    /// Creates a controller over a loaded scene.
    pub fn new(scene: Scene, options: Options) -> Self {
        log::info!(
            "controller ready for {} parts, coloring fields {:?}",
            scene.vehicle().len(),
            options.color_ranges.keys().collect::<Vec<_>>()
        );
        Self { scene, options }
    }

    /// The shared mesh caches.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The configuration this controller applies.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Starts a session in the initial UI state.
    pub fn new_session(&self) -> Session {
        Session::new(&self.options)
    }

    /// Values offered in the coloring dropdown.
    pub fn color_options(&self) -> Vec<ColorSelection> {
        ColorSelection::options(&self.options)
    }

    /// Representations to build the view with: every vehicle part shown in
    /// solid color, every isosurface hidden and painted in
    /// [`Options::isosurface_color`].
    pub fn initial_scene(&self) -> Vec<Representation> {
        let representation = |id: &str, shown: bool, property: Option<DisplayProperty>| Representation {
            id: id.to_string(),
            color_map_preset: self.options.color_map_preset.clone(),
            color_data_range: SOLID_RANGE,
            mapper: MapperConfig::solid(),
            actor: Visibility::from_shown(shown),
            property,
        };
        let iso_property = DisplayProperty {
            color: self.options.isosurface_color,
        };
        self.scene
            .vehicle()
            .names()
            .map(|name| representation(name, true, None))
            .chain(
                self.scene
                    .isosurfaces()
                    .names()
                    .map(|name| representation(name, false, Some(iso_property))),
            )
            .collect()
    }

    /// Handles a coloring dropdown change.
    ///
    /// The same mapper and range go to every part. Re-selecting the current
    /// value leaves every output unchanged.
    pub fn on_color_change(&self, session: &mut Session, value: &str) -> Result<ColoringUpdate> {
        let selection = ColorSelection::parse(value, &self.options)?;
        if selection == session.color_by {
            log::debug!("coloring already '{selection}'");
            return Ok(ColoringUpdate {
                render_token: Update::Unchanged,
                mappers: unchanged_for(self.scene.vehicle()),
                color_ranges: unchanged_for(self.scene.vehicle()),
            });
        }

        let mapping = color_mapping(&selection, &self.options)?;
        log::debug!("coloring by '{selection}', range {:?}", mapping.range);
        session.color_by = selection;

        Ok(ColoringUpdate {
            render_token: Update::Set(session.bump_render_token()),
            mappers: set_for(self.scene.vehicle(), |_| mapping.mapper.clone()),
            color_ranges: set_for(self.scene.vehicle(), |_| mapping.range),
        })
    }

    /// Handles a change of the part-group checklist.
    pub fn on_geometry_change(&self, session: &mut Session, groups: &[String]) -> VisibilityUpdate {
        let groups: BTreeSet<String> = groups.iter().cloned().collect();
        if groups == session.visible_groups {
            return VisibilityUpdate {
                render_token: Update::Unchanged,
                actors: unchanged_for(self.scene.vehicle()),
            };
        }

        let actors = self
            .scene
            .vehicle()
            .iter()
            .map(|mesh| PartUpdate {
                part: mesh.name().to_string(),
                value: Update::Set(Visibility::from_shown(groups.contains(mesh.group()))),
            })
            .collect();
        session.visible_groups = groups;

        VisibilityUpdate {
            render_token: Update::Set(session.bump_render_token()),
            actors,
        }
    }

    /// Handles a change of the isosurface checklist.
    pub fn on_isosurface_change(&self, session: &mut Session, names: &[String]) -> VisibilityUpdate {
        let names: BTreeSet<String> = names.iter().cloned().collect();
        if names == session.isosurfaces {
            return VisibilityUpdate {
                render_token: Update::Unchanged,
                actors: unchanged_for(self.scene.isosurfaces()),
            };
        }

        let actors = set_for(self.scene.isosurfaces(), |name| {
            Visibility::from_shown(names.contains(name))
        });
        session.isosurfaces = names;

        VisibilityUpdate {
            render_token: Update::Set(session.bump_render_token()),
            actors,
        }
    }

    /// Handles a hover payload from the view.
    ///
    /// No payload clears the tooltip and resets the glyph. A payload that
    /// names no representation leaves both untouched.
    pub fn on_hover(&self, hover: Option<&HoverInfo>) -> HoverUpdate {
        let event = match hover {
            None => None,
            Some(info) => match info.event() {
                Some(event) => Some(event),
                None => {
                    return HoverUpdate {
                        tooltip: Update::Unchanged,
                        glyph: Update::Unchanged,
                    }
                }
            },
        };

        let (tooltip, glyph) = self.probe(event.as_ref());
        HoverUpdate {
            tooltip: Update::Set(tooltip),
            glyph: Update::Set(glyph),
        }
    }

    /// Probes the vehicle at a hover: tooltip text and glyph state.
    pub fn probe(&self, hover: Option<&HoverEvent>) -> (String, GlyphState) {
        let probe = resolve_probe(self.scene.vehicle(), hover);
        (
            tooltip_text(probe.as_ref()),
            place_glyph(probe.as_ref(), &self.options),
        )
    }
}

fn unchanged_for<T>(cache: &MeshCache) -> Vec<PartUpdate<T>> {
    cache
        .names()
        .map(|name| PartUpdate {
            part: name.to_string(),
            value: Update::Unchanged,
        })
        .collect()
}

fn set_for<T>(cache: &MeshCache, mut value: impl FnMut(&str) -> T) -> Vec<PartUpdate<T>> {
    cache
        .names()
        .map(|name| PartUpdate {
            part: name.to_string(),
            value: Update::Set(value(name)),
        })
        .collect()
}
