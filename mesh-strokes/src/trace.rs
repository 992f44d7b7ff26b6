/// One connected color region's outline, in UV space. `border` is a simple
/// closed polygon with no repeated closing vertex (K >= 3).
#[derive(Debug, Clone)]
pub struct Island {
    pub idx: usize,
    pub color: usize,
    pub border: Vec<(f64, f64)>,
}

/// A polyline to draw on the texture, tagged with a palette color index.
#[derive(Debug, Clone)]
pub struct Trace2D {
    pub color: usize,
    pub path: Vec<(f64, f64)>,
}

/// A polyline to draw on the mesh. All path points lie on one planar face
/// (or on faces whose normals are parallel within epsilon); `face` is that
/// face's normal.
#[derive(Debug, Clone)]
pub struct Trace3D {
    pub color: usize,
    pub face: [f64; 3],
    pub path: Vec<[f64; 3]>,
}
