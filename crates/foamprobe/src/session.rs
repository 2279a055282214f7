//! Per-session UI state and update signals.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use foamprobe_core::{ColorSelection, Options};

/// An output slot's new value, or an explicit "leave it as it is".
///
/// `Unchanged` is distinct from setting an empty value: the adapter must not
/// touch the UI property at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    /// Keep the current value.
    Unchanged,
    /// Replace the current value.
    Set(T),
}

impl<T> Update<T> {
    /// Returns true for [`Update::Unchanged`].
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the new value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unchanged => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T: Serialize> Serialize for Update<T> {
    /// `Unchanged` serializes as `null`; the adapter maps it to its
    /// framework's no-update marker.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

/// Value whose change forces the renderer to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct RenderToken(pub u64);

impl RenderToken {
    /// The following token.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// UI state owned by one viewer session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) color_by: ColorSelection,
    pub(crate) visible_groups: BTreeSet<String>,
    pub(crate) isosurfaces: BTreeSet<String>,
    pub(crate) render_token: RenderToken,
}

impl Session {
    /// Starts a session in the initial UI state: solid coloring, every
    /// configured part group visible, no isosurface shown.
    pub fn new(options: &Options) -> Self {
        Self {
            color_by: ColorSelection::Solid,
            visible_groups: options.part_groups.iter().cloned().collect(),
            isosurfaces: BTreeSet::new(),
            render_token: RenderToken::default(),
        }
    }

    /// Current surface coloring.
    pub fn color_by(&self) -> &ColorSelection {
        &self.color_by
    }

    /// Part groups currently shown.
    pub fn visible_groups(&self) -> &BTreeSet<String> {
        &self.visible_groups
    }

    /// Isosurfaces currently shown.
    pub fn isosurfaces(&self) -> &BTreeSet<String> {
        &self.isosurfaces
    }

    /// Token of the last effective change.
    pub fn render_token(&self) -> RenderToken {
        self.render_token
    }

    pub(crate) fn bump_render_token(&mut self) -> RenderToken {
        self.render_token = self.render_token.next();
        self.render_token
    }
}
