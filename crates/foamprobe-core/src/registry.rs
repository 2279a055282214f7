//! Mesh cache keyed by part name.

use std::collections::BTreeMap;

use crate::error::{FoamProbeError, Result};
use crate::mesh::SurfaceMesh;

/// Cache of loaded part meshes.
///
/// Filled once while loading and only read afterwards; share it behind an
/// `Arc` between sessions. Iteration is ordered by part name.
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: BTreeMap<String, SurfaceMesh>,
}

impl MeshCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mesh under its part name.
    ///
    /// Returns an error if a part with the same name is already cached.
    pub fn register(&mut self, mesh: SurfaceMesh) -> Result<()> {
        let name = mesh.name().to_string();
        if self.meshes.contains_key(&name) {
            return Err(FoamProbeError::PartExists(name));
        }
        self.meshes.insert(name, mesh);
        Ok(())
    }

    /// Gets a mesh by part name.
    pub fn get(&self, name: &str) -> Option<&SurfaceMesh> {
        self.meshes.get(name)
    }

    /// Checks if a part with the given name is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Returns an iterator over all meshes, ordered by part name.
    pub fn iter(&self) -> impl Iterator<Item = &SurfaceMesh> {
        self.meshes.values()
    }

    /// Returns the part names, ordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.meshes.keys().map(String::as_str)
    }

    /// Returns the number of cached parts.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl FromIterator<SurfaceMesh> for MeshCache {
    /// Collects meshes into a cache; a later duplicate name replaces an
    /// earlier one.
    fn from_iter<I: IntoIterator<Item = SurfaceMesh>>(iter: I) -> Self {
        Self {
            meshes: iter
                .into_iter()
                .map(|mesh| (mesh.name().to_string(), mesh))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(name: &str) -> SurfaceMesh {
        SurfaceMesh::new(name, Vec::new(), Vec::new())
    }

    #[test]
    fn test_register_and_get() {
        let mut cache = MeshCache::new();
        assert!(cache.is_empty());
        cache.register(mesh("rear-wing")).unwrap();
        cache.register(mesh("body")).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("body"));
        assert!(cache.get("front-wing").is_none());
        assert_eq!(cache.names().collect::<Vec<_>>(), ["body", "rear-wing"]);
    }

    #[test]
    fn test_register_duplicate() {
        let mut cache = MeshCache::new();
        cache.register(mesh("body")).unwrap();
        let err = cache.register(mesh("body")).unwrap_err();
        assert!(matches!(err, FoamProbeError::PartExists(name) if name == "body"));
    }
}
