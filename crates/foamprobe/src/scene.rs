//! The loaded dataset: vehicle parts and isosurfaces.

use std::sync::Arc;

use foamprobe_core::{MeshCache, Options, Result};

use crate::load::load_dir;

/// Read-only mesh caches shared by every session.
///
/// Cloning is cheap; clones share the same caches.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    vehicle: Arc<MeshCache>,
    isosurfaces: Arc<MeshCache>,
}

impl Scene {
    /// Wraps already built caches.
    pub fn new(vehicle: MeshCache, isosurfaces: MeshCache) -> Self {
        Self {
            vehicle: Arc::new(vehicle),
            isosurfaces: Arc::new(isosurfaces),
        }
    }

    /// Loads the dataset under [`Options::data_path`].
    ///
    /// The `vehicle` directory is required; a missing `isosurfaces`
    /// directory yields an empty isosurface cache.
    pub fn load(options: &Options) -> Result<Self> {
        let vehicle = load_dir(options.vehicle_dir())?;

        let iso_dir = options.isosurface_dir();
        let isosurfaces = if iso_dir.is_dir() {
            load_dir(&iso_dir)?
        } else {
            log::info!("no isosurfaces at {}", iso_dir.display());
            MeshCache::new()
        };

        log::info!(
            "scene loaded: {} parts, {} isosurfaces",
            vehicle.len(),
            isosurfaces.len()
        );
        Ok(Self::new(vehicle, isosurfaces))
    }

    /// Vehicle part meshes, the probe targets.
    pub fn vehicle(&self) -> &MeshCache {
        &self.vehicle
    }

    /// Isosurface meshes, shown or hidden as a whole.
    pub fn isosurfaces(&self) -> &MeshCache {
        &self.isosurfaces
    }
}
