//! Surface meshes with named per-point fields.

use glam::DVec3;
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::error::{FoamProbeError, Result};
use crate::field::Field;

/// Separator between a part's group and the rest of its name.
const GROUP_SEPARATOR: char = '_';

/// A mesh point in the spatial index, tagged with its point index.
type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// A polygonal surface mesh for one vehicle part.
///
/// Fields keep the order they were added in, which is the order the
/// source file declared them. Points are indexed in an R-tree when the mesh
/// is created; points with a non-finite coordinate are left out of it.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    name: String,
    points: Vec<DVec3>,
    faces: Vec<Vec<u32>>,
    fields: Vec<Field>,
    index: RTree<IndexedPoint>,
}

impl SurfaceMesh {
    /// Creates a mesh without fields.
    pub fn new(name: impl Into<String>, points: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        let indexed = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(i, p)| IndexedPoint::new(p.to_array(), i))
            .collect();

        Self {
            name: name.into(),
            points,
            faces,
            fields: Vec::new(),
            index: RTree::bulk_load(indexed),
        }
    }

    /// Returns the part name of this mesh.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the group this part belongs to.
    ///
    /// `front-wing_left` belongs to `front-wing`; a name without a
    /// separator is its own group.
    pub fn group(&self) -> &str {
        self.name
            .split(GROUP_SEPARATOR)
            .next()
            .unwrap_or(&self.name)
    }

    /// Returns the point coordinates.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the coordinate of a point.
    pub fn point(&self, index: usize) -> Option<DVec3> {
        self.points.get(index).copied()
    }

    /// Returns the polygon faces as point indices.
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Attaches a field.
    ///
    /// The field must hold exactly one value per point and its name must be
    /// unique on this mesh.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if field.len() != self.points.len() {
            return Err(FoamProbeError::SizeMismatch {
                expected: self.points.len(),
                actual: field.len(),
            });
        }
        if self.field(field.name()).is_some() {
            return Err(FoamProbeError::FieldExists(
                field.name().to_string(),
                self.name.clone(),
            ));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder variant of [`add_field`](Self::add_field).
    pub fn with_field(mut self, field: Field) -> Result<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Gets a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns all fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds the point closest to `position`.
    ///
    /// Returns `None` when the mesh has no finite point or the query is not
    /// a finite coordinate. Ties resolve to the lowest index.
    pub fn find_point(&self, position: DVec3) -> Option<usize> {
        if !position.is_finite() {
            return None;
        }

        let mut nearest = self
            .index
            .nearest_neighbor_iter_with_distance_2(&position.to_array());
        let (first, best_dist) = nearest.next()?;
        let tied = nearest
            .take_while(|(_, dist)| *dist <= best_dist)
            .map(|(point, _)| point.data);
        Some(tied.fold(first.data, usize::min))
    }
}
