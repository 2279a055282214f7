//! Loading part meshes from VTK XML PolyData (`.vtp`) files.
//!
//! Points and polygons come from the PolyData pieces; every point-data array
//! with one or three components becomes a field, in the file's array order.
//! Pieces are merged into one mesh and must declare the same arrays.

use std::path::Path;

use glam::DVec3;
use vtkio::model::{Attribute, DataSet, PolyDataPiece, VertexNumbers};
use vtkio::{IOBuffer, Vtk};

use foamprobe_core::{Field, FoamProbeError, Result, SurfaceMesh};

/// A point-data array being collected across pieces.
struct ArrayData {
    name: String,
    components: usize,
    values: Vec<f64>,
}

/// Loads a `.vtp` file into a mesh named `name`.
pub fn load_vtp(name: &str, path: &Path) -> Result<SurfaceMesh> {
    let vtk = Vtk::import(path).map_err(|err| FoamProbeError::InvalidMesh {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    mesh_from_vtk(name, vtk, Some(path))
}

/// Converts an imported VTK dataset into a mesh.
///
/// `source` locates pieces stored in separate files.
pub fn mesh_from_vtk(name: &str, vtk: Vtk, source: Option<&Path>) -> Result<SurfaceMesh> {
    let invalid = |reason: String| FoamProbeError::InvalidMesh {
        path: name.to_string(),
        reason,
    };

    let DataSet::PolyData { pieces, .. } = vtk.data else {
        return Err(invalid("not a PolyData dataset".to_string()));
    };

    let mut points: Vec<DVec3> = Vec::new();
    let mut faces: Vec<Vec<u32>> = Vec::new();
    let mut arrays: Option<Vec<ArrayData>> = None;

    for piece in pieces {
        let piece: PolyDataPiece = piece
            .into_loaded_piece_data(source)
            .map_err(|err| invalid(err.to_string()))?;

        let offset = u32::try_from(points.len())
            .map_err(|_| invalid("too many points".to_string()))?;
        let piece_points = read_points(&piece.points).ok_or_else(|| {
            invalid("point coordinates are not triples of numbers".to_string())
        })?;
        let num_points = piece_points.len();
        points.extend(piece_points);

        if let Some(polys) = piece.polys {
            let polygons =
                read_polygons(polys).ok_or_else(|| invalid("malformed polygons".to_string()))?;
            faces.extend(
                polygons
                    .into_iter()
                    .map(|face| face.into_iter().map(|i| i + offset).collect::<Vec<_>>()),
            );
        }

        let piece_arrays = read_point_arrays(&piece.data.point, num_points);
        match arrays.as_mut() {
            None => arrays = Some(piece_arrays),
            Some(existing) => {
                let same_layout = existing.len() == piece_arrays.len()
                    && existing
                        .iter()
                        .zip(&piece_arrays)
                        .all(|(a, b)| a.name == b.name && a.components == b.components);
                if !same_layout {
                    return Err(invalid("pieces declare different point arrays".to_string()));
                }
                for (array, more) in existing.iter_mut().zip(piece_arrays) {
                    array.values.extend(more.values);
                }
            }
        }
    }

    let mut mesh = SurfaceMesh::new(name, points, faces);
    for array in arrays.unwrap_or_default() {
        let field = if array.components == 3 {
            let vectors = array
                .values
                .chunks_exact(3)
                .map(|c| DVec3::new(c[0], c[1], c[2]))
                .collect();
            Field::vector(array.name, vectors)
        } else {
            Field::scalar(array.name, array.values)
        };
        mesh.add_field(field)?;
    }
    Ok(mesh)
}

fn read_points(buffer: &IOBuffer) -> Option<Vec<DVec3>> {
    let coords = buffer.clone().cast_into::<f64>()?;
    if coords.len() % 3 != 0 {
        return None;
    }
    Some(
        coords
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0], c[1], c[2]))
            .collect(),
    )
}

/// Splits a cell list into polygons of point indices.
fn read_polygons(cells: VertexNumbers) -> Option<Vec<Vec<u32>>> {
    match cells {
        VertexNumbers::Legacy { vertices, .. } => {
            let mut faces = Vec::new();
            let mut rest = vertices.as_slice();
            while let Some((&count, tail)) = rest.split_first() {
                let count = usize::try_from(count).ok()?;
                if tail.len() < count {
                    return None;
                }
                faces.push(tail[..count].to_vec());
                rest = &tail[count..];
            }
            Some(faces)
        }
        VertexNumbers::XML {
            connectivity,
            offsets,
        } => {
            let mut faces = Vec::with_capacity(offsets.len());
            let mut start = 0usize;
            for end in offsets {
                let end = usize::try_from(end).ok()?;
                let face = connectivity
                    .get(start..end)?
                    .iter()
                    .map(|&i| u32::try_from(i).ok())
                    .collect::<Option<Vec<_>>>()?;
                faces.push(face);
                start = end;
            }
            Some(faces)
        }
    }
}

/// Collects the point-data arrays usable as fields.
///
/// Arrays whose component count is neither 1 nor 3, or whose length does
/// not match the point count, are skipped.
fn read_point_arrays(attributes: &[Attribute], num_points: usize) -> Vec<ArrayData> {
    attributes
        .iter()
        .filter_map(|attribute| {
            let Attribute::DataArray(array) = attribute else {
                return None;
            };
            let Some(values) = array.data.clone().cast_into::<f64>() else {
                log::warn!("skipping non-numeric point array '{}'", array.name);
                return None;
            };
            let components = match num_points {
                0 => 1,
                n if values.len() % n == 0 => values.len() / n,
                _ => 0,
            };
            if components == 1 || components == 3 {
                Some(ArrayData {
                    name: array.name.clone(),
                    components,
                    values,
                })
            } else {
                log::warn!(
                    "skipping point array '{}' with {} values for {num_points} points",
                    array.name,
                    values.len()
                );
                None
            }
        })
        .collect()
}
