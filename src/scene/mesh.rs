use std::{error::Error, fs::OpenOptions, path::Path};

use stl_io::read_stl;

use crate::geometry::{Mesh, edges_from_faces};
use super::read_lines;

/// Imports a triangle mesh from disk. STL goes through `stl_io`'s indexed
/// reader; OBJ is a hand parse of `v`/`f` lines (triangles and quads,
/// 1-based indices, texture/normal references ignored). Face indices from
/// the file are range-checked before the mesh is handed to the renderer.
pub fn load_mesh(file_path: &str) -> Result<Mesh, Box<dyn Error>> {
    let file = Path::new(file_path);

    if !file.exists() {
        return Err(format!("Mesh file '{}' not found", file_path).into());
    }

    let extension = file
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "stl" => load_stl(file_path),
        "obj" => load_obj(file_path),
        _ => Err(format!("Mesh file extension '.{}' not supported", extension).into()),
    }
}

fn load_stl(file_path: &str) -> Result<Mesh, Box<dyn Error>> {
    let mut file = OpenOptions::new().read(true).open(file_path)?;
    let stl = read_stl(&mut file)?;

    let vertices: Vec<[f32; 4]> = stl
        .vertices
        .iter()
        .map(|v| [v[0], v[1], v[2], 1.0])
        .collect();
    let faces: Vec<Vec<usize>> = stl.faces.iter().map(|face| face.vertices.to_vec()).collect();
    let edges = edges_from_faces(&faces);

    Ok(Mesh { vertices, faces, edges })
}

fn load_obj(file_path: &str) -> Result<Mesh, Box<dyn Error>> {
    let mut vertices: Vec<[f32; 4]> = vec![];
    let mut faces: Vec<Vec<usize>> = vec![];

    for line in read_lines(file_path)?.map_while(Result::ok) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(format!("Malformed vertex line: {}", line).into());
                }
                vertices.push([parts[1].parse()?, parts[2].parse()?, parts[3].parse()?, 1.0]);
            }
            "f" => {
                let mut face = vec![];
                for part in &parts[1..] {
                    // `f v`, `f v/vt` and `f v/vt/vn` all start with the
                    // vertex index
                    let index: usize = part
                        .split('/')
                        .next()
                        .unwrap_or(part)
                        .parse()
                        .map_err(|_| format!("Malformed face index: {}", part))?;
                    if index == 0 {
                        return Err(format!("Face indices are 1-based: {}", line).into());
                    }
                    face.push(index - 1);
                }
                if face.len() != 3 && face.len() != 4 {
                    return Err(format!("Faces must have 3 or 4 vertices, got {}", face.len()).into());
                }
                faces.push(face);
            }
            _ => {}
        }
    }

    for face in &faces {
        for &index in face {
            if index >= vertices.len() {
                return Err(format!(
                    "Face references vertex {} but the file only has {}",
                    index + 1,
                    vertices.len()
                )
                .into());
            }
        }
    }

    let edges = edges_from_faces(&faces);

    Ok(Mesh { vertices, faces, edges })
}
