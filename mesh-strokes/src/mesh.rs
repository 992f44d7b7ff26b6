use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// A triangular mesh with per-vertex UV coordinates and per-face normals.
///
/// Vertices, faces, uvs and face_normals are flat row-major buffers rather
/// than per-row heap allocations, per the numeric-array design note.
pub struct Mesh {
    vertices: Vec<[f64; 3]>,
    faces: Vec<[u32; 3]>,
    uv: Vec<[f64; 2]>,
    face_normals: Vec<[f64; 3]>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, index: u32) -> [f64; 3] {
        self.vertices[index as usize]
    }

    pub fn uv(&self, index: u32) -> [f64; 2] {
        self.uv[index as usize]
    }

    pub fn face(&self, index: usize) -> [u32; 3] {
        self.faces[index]
    }

    pub fn faces(&self) -> impl Iterator<Item = (usize, [u32; 3])> + '_ {
        self.faces.iter().copied().enumerate()
    }

    pub fn face_normal(&self, index: usize) -> [f64; 3] {
        self.face_normals[index]
    }

    /// Triangle vertices of face `index`, in UV space.
    pub fn face_uv_triangle(&self, index: usize) -> [[f64; 2]; 3] {
        let [a, b, c] = self.faces[index];
        [self.uv(a), self.uv(b), self.uv(c)]
    }

    /// Triangle vertices of face `index`, in 3D space.
    pub fn face_vertices(&self, index: usize) -> [[f64; 3]; 3] {
        let [a, b, c] = self.faces[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Mesh::parse(&contents)
    }

    /// Parse Wavefront OBJ `v`, `vt`, and `f v/vt[/vn]` records. N-gon faces
    /// are fan-triangulated from the first vertex. Negative (relative)
    /// indices are resolved against the count seen so far.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut positions: Vec<[f64; 3]> = Vec::new();
        let mut tex_coords: Vec<[f64; 2]> = Vec::new();
        let mut vertices: Vec<(usize, usize)> = Vec::new();
        let mut faces: Vec<[u32; 3]> = Vec::new();
        let mut vertex_cache: HashMap<(usize, usize), usize> = HashMap::new();

        for (line_num, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "v" => {
                    if parts.len() < 4 {
                        return Err(Error::invalid_input(
                            "mesh",
                            format!("line {}: vertex needs 3 components", line_num + 1),
                        ));
                    }
                    let x = parse_float(parts[1], line_num)?;
                    let y = parse_float(parts[2], line_num)?;
                    let z = parse_float(parts[3], line_num)?;
                    positions.push([x, y, z]);
                }
                "vt" => {
                    if parts.len() < 3 {
                        return Err(Error::invalid_input(
                            "mesh",
                            format!("line {}: texture coordinate needs 2 components", line_num + 1),
                        ));
                    }
                    let u = parse_float(parts[1], line_num)?;
                    let v = parse_float(parts[2], line_num)?;
                    tex_coords.push([u, v]);
                }
                "f" => {
                    if parts.len() < 4 {
                        return Err(Error::invalid_input(
                            "mesh",
                            format!("line {}: face needs at least 3 vertices", line_num + 1),
                        ));
                    }
                    let mut face_verts = Vec::with_capacity(parts.len() - 1);
                    for spec in &parts[1..] {
                        let vertex_index = parse_face_vertex(
                            spec,
                            line_num,
                            positions.len(),
                            tex_coords.len(),
                            &mut vertices,
                            &mut vertex_cache,
                        )?;
                        face_verts.push(vertex_index as u32);
                    }
                    for i in 1..(face_verts.len() - 1) {
                        faces.push([face_verts[0], face_verts[i], face_verts[i + 1]]);
                    }
                }
                _ => {
                    // Ignore o, g, s, mtllib, usemtl, vn, and anything else.
                }
            }
        }

        if vertices.is_empty() {
            return Err(Error::invalid_input("mesh", "no vertices found in OBJ file"));
        }
        if faces.is_empty() {
            return Err(Error::invalid_input("mesh", "no faces found in OBJ file"));
        }
        if tex_coords.is_empty() {
            return Err(Error::invalid_input(
                "mesh",
                "mesh has no per-vertex UV coordinates",
            ));
        }

        let mut mesh_vertices = Vec::with_capacity(vertices.len());
        let mut mesh_uv = Vec::with_capacity(vertices.len());
        for &(pos_idx, tc_idx) in &vertices {
            mesh_vertices.push(positions[pos_idx]);
            if tc_idx == usize::MAX {
                return Err(Error::invalid_input(
                    "mesh",
                    "mesh has no per-vertex UV coordinates",
                ));
            }
            mesh_uv.push(tex_coords[tc_idx]);
        }

        let face_normals = compute_face_normals(&mesh_vertices, &faces);

        Ok(Mesh {
            vertices: mesh_vertices,
            faces,
            uv: mesh_uv,
            face_normals,
        })
    }
}

fn parse_float(s: &str, line_num: usize) -> Result<f64> {
    s.parse().map_err(|_| {
        Error::invalid_input(
            "mesh",
            format!("line {}: invalid float value '{}'", line_num + 1, s),
        )
    })
}

fn parse_index(s: &str, count: usize, line_num: usize) -> Result<usize> {
    let idx: i64 = s.parse().map_err(|_| {
        Error::invalid_input("mesh", format!("line {}: invalid index '{}'", line_num + 1, s))
    })?;
    let resolved = if idx > 0 {
        (idx - 1) as usize
    } else if idx < 0 {
        (count as i64 + idx) as usize
    } else {
        return Err(Error::invalid_input(
            "mesh",
            format!("line {}: index cannot be 0", line_num + 1),
        ));
    };
    if resolved >= count {
        return Err(Error::invalid_input(
            "mesh",
            format!("line {}: index {} out of range ({} elements)", line_num + 1, idx, count),
        ));
    }
    Ok(resolved)
}

/// Parse a face-vertex token like "1/2", "1//3", or "1" and deduplicate
/// repeated (position, texcoord) combinations into a single mesh vertex.
fn parse_face_vertex(
    spec: &str,
    line_num: usize,
    position_count: usize,
    texcoord_count: usize,
    vertices: &mut Vec<(usize, usize)>,
    cache: &mut HashMap<(usize, usize), usize>,
) -> Result<usize> {
    let parts: Vec<&str> = spec.split('/').collect();
    if parts.is_empty() || parts[0].is_empty() {
        return Err(Error::invalid_input(
            "mesh",
            format!("line {}: missing position index in face", line_num + 1),
        ));
    }
    let pos_idx = parse_index(parts[0], position_count, line_num)?;
    let tc_idx = if parts.len() > 1 && !parts[1].is_empty() {
        parse_index(parts[1], texcoord_count, line_num)?
    } else {
        usize::MAX
    };

    let key = (pos_idx, tc_idx);
    if let Some(&existing) = cache.get(&key) {
        return Ok(existing);
    }
    let index = vertices.len();
    vertices.push(key);
    cache.insert(key, index);
    Ok(index)
}

/// Unit cross product of two edge vectors per face.
fn compute_face_normals(vertices: &[[f64; 3]], faces: &[[u32; 3]]) -> Vec<[f64; 3]> {
    faces
        .iter()
        .map(|&[a, b, c]| {
            let v0 = vertices[a as usize];
            let v1 = vertices[b as usize];
            let v2 = vertices[c as usize];
            let edge0 = sub(v1, v0);
            let edge1 = sub(v2, v0);
            normalize(cross(edge0, edge1))
        })
        .collect()
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len == 0.0 {
        v
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_triangle() {
        let obj = r#"
# a triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
"#;
        let mesh = Mesh::parse(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn triangulates_quad_as_fan() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3 4/4
"#;
        let mesh = Mesh::parse(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn rejects_mesh_without_uv() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
"#;
        assert!(Mesh::parse(obj).is_err());
    }

    #[test]
    fn face_normal_is_unit_length() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
"#;
        let mesh = Mesh::parse(obj).unwrap();
        let n = mesh.face_normal(0);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-9);
    }

    #[test]
    fn resolves_negative_indices() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f -3/-3 -2/-2 -1/-1
"#;
        let mesh = Mesh::parse(obj).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }
}
