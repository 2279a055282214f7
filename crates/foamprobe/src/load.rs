//! Loading part meshes from disk.
//!
//! VTK XML PolyData (`.vtp`, see [`crate::vtk`]) and PLY (`.ply`) files are
//! supported; the format follows the file extension.
//!
//! In PLY files, vertex properties `x`, `y`, `z` are the point coordinates. Every other
//! scalar vertex property becomes a scalar field, except that consecutive
//! `<name>_x`, `<name>_y`, `<name>_z` properties are combined into one vector
//! field `<name>`. Faces come from the `vertex_indices` (or `vertex_index`)
//! list of the `face` element.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use glam::DVec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property, PropertyType};

use foamprobe_core::{Field, FoamProbeError, MeshCache, Result, SurfaceMesh};

use crate::vtk::load_vtp;

const VTP_EXTENSION: &str = "vtp";
const PLY_EXTENSION: &str = "ply";
const POSITION: [&str; 3] = ["x", "y", "z"];
const FACE_LISTS: [&str; 2] = ["vertex_indices", "vertex_index"];

/// How a run of vertex properties maps to a field.
enum FieldLayout {
    Scalar(String),
    Vector(String, [String; 3]),
}

/// Loads one part mesh; the part name is the file stem.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    let name = part_name(path)?;
    let mesh = match mesh_format(path) {
        Some(VTP_EXTENSION) => load_vtp(name, path)?,
        Some(PLY_EXTENSION) => load_ply(name, path)?,
        _ => {
            return Err(FoamProbeError::InvalidMesh {
                path: path.display().to_string(),
                reason: "unsupported file format".to_string(),
            })
        }
    };
    log::info!(
        "loaded part '{}' ({} points, {} faces, {} fields)",
        mesh.name(),
        mesh.num_points(),
        mesh.num_faces(),
        mesh.fields().len()
    );
    Ok(mesh)
}

fn load_ply(name: &str, path: &Path) -> Result<SurfaceMesh> {
    let mut reader = BufReader::new(File::open(path)?);
    read_mesh(name, &mut reader).map_err(|err| match err {
        FoamProbeError::InvalidMesh { reason, .. } => FoamProbeError::InvalidMesh {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Reads a part mesh from PLY data.
pub fn read_mesh<R: Read>(name: &str, reader: &mut R) -> Result<SurfaceMesh> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser.read_ply(reader)?;

    let invalid = |reason: String| FoamProbeError::InvalidMesh {
        path: name.to_string(),
        reason,
    };

    let vertex_def = ply
        .header
        .elements
        .get("vertex")
        .ok_or_else(|| invalid("no vertex element".to_string()))?;
    let vertices: &[DefaultElement] = ply
        .payload
        .get("vertex")
        .map(Vec::as_slice)
        .unwrap_or_default();

    let points = vertices
        .iter()
        .map(|v| {
            let [x, y, z] = POSITION.map(|key| scalar(v, key));
            match (x, y, z) {
                (Some(x), Some(y), Some(z)) => Ok(DVec3::new(x, y, z)),
                _ => Err(invalid("vertex without x, y, z".to_string())),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let faces = match ply.payload.get("face") {
        Some(faces) => faces
            .iter()
            .map(|f| face_indices(f).ok_or_else(|| invalid("unreadable face list".to_string())))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let scalar_names: Vec<String> = vertex_def
        .properties
        .iter()
        .filter(|(key, def)| {
            matches!(def.data_type, PropertyType::Scalar(_)) && !POSITION.contains(&key.as_str())
        })
        .map(|(key, _)| key.clone())
        .collect();

    let mut mesh = SurfaceMesh::new(name, points, faces);
    for layout in field_layouts(&scalar_names) {
        let field = match layout {
            FieldLayout::Scalar(field_name) => {
                let values = vertices
                    .iter()
                    .map(|v| scalar(v, &field_name))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid(format!("missing values for '{field_name}'")))?;
                Field::scalar(field_name, values)
            }
            FieldLayout::Vector(field_name, keys) => {
                let values = vertices
                    .iter()
                    .map(|v| {
                        Some(DVec3::new(
                            scalar(v, &keys[0])?,
                            scalar(v, &keys[1])?,
                            scalar(v, &keys[2])?,
                        ))
                    })
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid(format!("missing values for '{field_name}'")))?;
                Field::vector(field_name, values)
            }
        };
        mesh.add_field(field)?;
    }

    Ok(mesh)
}

/// Loads every `.vtp` and `.ply` file of a directory into a cache, ordered
/// by file name.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<MeshCache> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && mesh_format(path).is_some())
        .collect();
    paths.sort();

    let mut cache = MeshCache::new();
    for path in paths {
        cache.register(load_mesh(&path)?)?;
    }
    if cache.is_empty() {
        log::warn!("no meshes found in {}", dir.display());
    }
    Ok(cache)
}

/// The supported format of a file, by its extension.
fn mesh_format(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?;
    [VTP_EXTENSION, PLY_EXTENSION]
        .into_iter()
        .find(|known| ext.eq_ignore_ascii_case(known))
}

fn part_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| FoamProbeError::InvalidMesh {
            path: path.display().to_string(),
            reason: "file name is not valid UTF-8".to_string(),
        })
}

/// Groups vertex property names into fields, keeping declaration order.
fn field_layouts(names: &[String]) -> Vec<FieldLayout> {
    let mut layouts = Vec::new();
    let mut i = 0;
    while i < names.len() {
        if let Some(base) = names[i].strip_suffix("_x") {
            let y = format!("{base}_y");
            let z = format!("{base}_z");
            if names.get(i + 1) == Some(&y) && names.get(i + 2) == Some(&z) {
                layouts.push(FieldLayout::Vector(
                    base.to_string(),
                    [names[i].clone(), y, z],
                ));
                i += 3;
                continue;
            }
        }
        layouts.push(FieldLayout::Scalar(names[i].clone()));
        i += 1;
    }
    layouts
}

fn scalar(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Char(v) => Some(f64::from(*v)),
        Property::UChar(v) => Some(f64::from(*v)),
        Property::Short(v) => Some(f64::from(*v)),
        Property::UShort(v) => Some(f64::from(*v)),
        Property::Int(v) => Some(f64::from(*v)),
        Property::UInt(v) => Some(f64::from(*v)),
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

fn face_indices(element: &DefaultElement) -> Option<Vec<u32>> {
    let list = FACE_LISTS.iter().find_map(|key| element.get(*key))?;
    match list {
        Property::ListChar(v) => v.iter().map(|&i| u32::try_from(i).ok()).collect(),
        Property::ListUChar(v) => Some(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListShort(v) => v.iter().map(|&i| u32::try_from(i).ok()).collect(),
        Property::ListUShort(v) => Some(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListInt(v) => v.iter().map(|&i| u32::try_from(i).ok()).collect(),
        Property::ListUInt(v) => Some(v.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foamprobe_core::{FieldKind, FieldValue};

    const BODY: &str = "ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
property float U_x
property float U_y
property float U_z
property float p
element face 1
property list uchar int vertex_indices
end_header
0 0 0 3 4 0 1000
1 0 0 1 0 0 -20
0 1 0 0 0 0 5
3 0 1 2
";

    #[test]
    fn test_read_mesh() {
        let mesh = read_mesh("body", &mut BODY.as_bytes()).unwrap();
        assert_eq!(mesh.name(), "body");
        assert_eq!(mesh.num_points(), 3);
        assert_eq!(mesh.faces(), &[vec![0u32, 1, 2]]);

        let kinds: Vec<(&str, FieldKind)> =
            mesh.fields().iter().map(|f| (f.name(), f.kind())).collect();
        assert_eq!(kinds, [("U", FieldKind::Vector), ("p", FieldKind::Scalar)]);
        assert_eq!(
            mesh.field("U").unwrap().value_at(0),
            Some(FieldValue::Vector(DVec3::new(3.0, 4.0, 0.0)))
        );
        assert_eq!(
            mesh.field("p").unwrap().value_at(1),
            Some(FieldValue::Scalar(-20.0))
        );
    }

    #[test]
    fn test_field_layouts() {
        let names: Vec<String> = ["k", "U_x", "U_y", "U_z", "n_x", "n_z"]
            .into_iter()
            .map(String::from)
            .collect();
        let layouts = field_layouts(&names);
        let described: Vec<String> = layouts
            .iter()
            .map(|l| match l {
                FieldLayout::Scalar(name) => format!("s:{name}"),
                FieldLayout::Vector(name, _) => format!("v:{name}"),
            })
            .collect();
        assert_eq!(described, ["s:k", "v:U", "s:n_x", "s:n_z"]);
    }

    #[test]
    fn test_missing_vertex_element() {
        let data = "ply
format ascii 1.0
element face 0
property list uchar int vertex_indices
end_header
";
        let err = read_mesh("broken", &mut data.as_bytes()).unwrap_err();
        assert!(matches!(err, FoamProbeError::InvalidMesh { .. }));
    }

    #[test]
    fn test_mesh_format() {
        assert_eq!(mesh_format(Path::new("data/body.vtp")), Some("vtp"));
        assert_eq!(mesh_format(Path::new("data/BODY.PLY")), Some("ply"));
        assert_eq!(mesh_format(Path::new("data/notes.txt")), None);
        assert_eq!(mesh_format(Path::new("data/body")), None);
    }

    #[test]
    fn test_load_mesh_unsupported_format() {
        assert!(matches!(
            load_mesh("/nonexistent/body.stl"),
            Err(FoamProbeError::InvalidMesh { .. })
        ));
    }

    #[test]
    fn test_load_mesh_missing_file() {
        assert!(matches!(
            load_mesh("/nonexistent/body.ply"),
            Err(FoamProbeError::IoError(_))
        ));
    }
}
