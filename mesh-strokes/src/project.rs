use crate::config::Config;
use crate::geometry::barycentric_2d;
use crate::mesh::Mesh;
use crate::trace::{Trace2D, Trace3D};

struct Match {
    face: usize,
    weights: (f64, f64, f64),
}

/// Locate a face whose UV triangle contains `p`, picking the lowest-indexed
/// face on ties (seams, overlapping UVs, shared edges).
fn locate_face(mesh: &Mesh, p: (f64, f64), epsilon: f64) -> Option<Match> {
    for (face_index, _) in mesh.faces() {
        let [v0, v1, v2] = mesh.face_uv_triangle(face_index);
        let weights = barycentric_2d(p, (v0[0], v0[1]), (v1[0], v1[1]), (v2[0], v2[1]));
        let (w0, w1, w2) = weights;
        if w0 >= -epsilon && w1 >= -epsilon && w2 >= -epsilon {
            return Some(Match { face: face_index, weights });
        }
    }
    None
}

fn position_3d(mesh: &Mesh, face: usize, weights: (f64, f64, f64)) -> [f64; 3] {
    let [v0, v1, v2] = mesh.face_vertices(face);
    let (w0, w1, w2) = weights;
    [
        w0 * v0[0] + w1 * v1[0] + w2 * v2[0],
        w0 * v0[1] + w1 * v1[1] + w2 * v2[1],
        w0 * v0[2] + w1 * v1[2] + w2 * v2[2],
    ]
}

fn normals_parallel(a: [f64; 3], b: [f64; 3], epsilon: f64) -> bool {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() <= epsilon
}

/// Project a 2D UV trace to 3D: every vertex must fall inside some UV
/// triangle, and the matched triangles must share a normal within
/// `parallel_normal_epsilon`. Returns `None` (not an error) if either
/// condition fails anywhere along the path.
pub fn project(trace: &Trace2D, mesh: &Mesh, config: &Config) -> Option<Trace3D> {
    let mut path = Vec::with_capacity(trace.path.len());
    let mut reference_normal: Option<[f64; 3]> = None;

    for &point in &trace.path {
        let matched = locate_face(mesh, point, config.barycentric_epsilon)?;
        let normal = mesh.face_normal(matched.face);

        match reference_normal {
            None => reference_normal = Some(normal),
            Some(reference) => {
                if !normals_parallel(reference, normal, config.parallel_normal_epsilon) {
                    return None;
                }
            }
        }

        path.push(position_3d(mesh, matched.face, matched.weights));
    }

    let face = reference_normal?;
    Some(Trace3D { color: trace.color, face, path })
}
