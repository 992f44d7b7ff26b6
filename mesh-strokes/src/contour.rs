use crate::geometry::texture_to_uv;
use crate::layer::Layer;
use crate::trace::Island;

/// Clockwise 8-neighborhood offsets, starting at North.
const DIRS: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn is_foreground(layer: &Layer, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= layer.width as i64 || y >= layer.height as i64 {
        return false;
    }
    layer.is_foreground(x as u32, y as u32)
}

fn direction_index(from: (i64, i64), to: (i64, i64)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRS.iter().position(|&d| d == delta).expect("neighbor offset")
}

/// Moore-neighbor boundary trace (8-connected) of the external contour
/// containing `start`, given the background pixel `start` was entered from.
/// Returns pixel-space coordinates in trace order; a lone foreground pixel
/// with no foreground neighbor returns a single-point trace.
fn trace_boundary(layer: &Layer, start: (i64, i64), initial_backtrack: (i64, i64)) -> Vec<(i64, i64)> {
    let mut boundary = vec![start];
    let mut current = start;
    let mut backtrack = initial_backtrack;
    let stop_state = (start, initial_backtrack);
    let mut first_iteration = true;

    loop {
        let pivot_dir = direction_index(current, backtrack);
        let mut found = None;
        for step in 1..=8 {
            let dir_idx = (pivot_dir + step) % 8;
            let (dx, dy) = DIRS[dir_idx];
            let candidate = (current.0 + dx, current.1 + dy);
            if is_foreground(layer, candidate.0, candidate.1) {
                let back_idx = (dir_idx + 7) % 8;
                let (bdx, bdy) = DIRS[back_idx];
                let new_backtrack = (current.0 + bdx, current.1 + bdy);
                found = Some((candidate, new_backtrack));
                break;
            }
        }

        let (next_pixel, new_backtrack) = match found {
            Some(pair) => pair,
            None => break, // isolated foreground pixel
        };

        if !first_iteration && (next_pixel, new_backtrack) == stop_state {
            break;
        }
        first_iteration = false;

        boundary.push(next_pixel);
        current = next_pixel;
        backtrack = new_backtrack;

        if boundary.len() > layer.width as usize * layer.height as usize * 8 + 8 {
            // Defensive bound: should be unreachable for a well-formed mask,
            // but guarantees termination rather than an infinite loop.
            break;
        }
    }

    boundary
}

/// Mark every pixel of the 8-connected foreground component containing
/// `start` as visited. A ring with a hole is one component even though its
/// interior background pixels break 4-connectivity, so a plain
/// boundary-trace visited-mark (only the pixels actually stepped on) leaves
/// the far side of the ring unmarked and the raster scan re-enters it from
/// the hole, spawning a spurious second island for the hole's own
/// perimeter. Flood-filling the whole component up front prevents that.
fn flood_fill_component(layer: &Layer, visited: &mut [bool], start: (usize, usize)) {
    let width = layer.width as usize;
    let height = layer.height as usize;
    let mut stack = vec![start];
    visited[start.1 * width + start.0] = true;

    while let Some((x, y)) = stack.pop() {
        for &(dx, dy) in &DIRS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if visited[ny * width + nx] {
                continue;
            }
            if !layer.is_foreground(nx as u32, ny as u32) {
                continue;
            }
            visited[ny * width + nx] = true;
            stack.push((nx, ny));
        }
    }
}

/// Find zero or more islands in one binary layer: external contours of
/// 8-connected foreground regions, converted to closed UV polygons. Holes
/// are ignored (handled implicitly by the fill stage, which only ever
/// produces fills inside the border polygon).
pub fn detect_islands(layer: &Layer, color: usize) -> Vec<Island> {
    let width = layer.width as usize;
    let height = layer.height as usize;
    let mut visited = vec![false; width * height];
    let mut islands = Vec::new();
    let mut next_idx = 0usize;

    for y in 0..height {
        for x in 0..width {
            if !layer.is_foreground(x as u32, y as u32) {
                continue;
            }
            if visited[y * width + x] {
                continue;
            }
            let left_background = x == 0 || !layer.is_foreground(x as u32 - 1, y as u32);
            if !left_background {
                continue;
            }

            let start = (x as i64, y as i64);
            let initial_backtrack = (x as i64 - 1, y as i64);
            let boundary = trace_boundary(layer, start, initial_backtrack);

            flood_fill_component(layer, &mut visited, (x, y));

            if boundary.len() < 3 {
                continue;
            }

            let uv_border: Vec<(f64, f64)> = boundary
                .iter()
                .map(|&(px, py)| texture_to_uv(px as u32, py as u32, layer.width, layer.height))
                .collect();

            islands.push(Island {
                idx: next_idx,
                color,
                border: uv_border,
            });
            next_idx += 1;
        }
    }

    islands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_from_rows(rows: &[&str]) -> Layer {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut mask = Vec::with_capacity((width * height) as usize);
        for row in rows {
            for c in row.chars() {
                mask.push(if c == '#' { 255 } else { 0 });
            }
        }
        Layer { color: 0, width, height, mask }
    }

    #[test]
    fn solid_square_yields_one_island() {
        let layer = layer_from_rows(&["####", "####", "####", "####"]);
        let islands = detect_islands(&layer, 0);
        assert_eq!(islands.len(), 1);
        assert!(islands[0].border.len() >= 3);
    }

    #[test]
    fn square_with_interior_hole_yields_one_island() {
        // RETR_EXTERNAL semantics: the hole is interior to the outer
        // contour and must not spawn a second island for its own perimeter.
        let layer = layer_from_rows(&[
            "#####",
            "#####",
            "##.##",
            "#####",
            "#####",
        ]);
        let islands = detect_islands(&layer, 0);
        assert_eq!(islands.len(), 1);
    }

    #[test]
    fn empty_layer_yields_no_islands() {
        let layer = layer_from_rows(&["....", "....", "....", "...."]);
        let islands = detect_islands(&layer, 0);
        assert!(islands.is_empty());
    }

    #[test]
    fn two_separate_blobs_yield_two_islands() {
        let layer = layer_from_rows(&[
            "##....##",
            "##....##",
            "........",
            "........",
        ]);
        let islands = detect_islands(&layer, 0);
        assert_eq!(islands.len(), 2);
    }

    #[test]
    fn border_touching_texture_edge_is_retained() {
        let layer = layer_from_rows(&["##", "##"]);
        let islands = detect_islands(&layer, 0);
        assert_eq!(islands.len(), 1);
        // UV polygon should touch 0 or 1 on both axes.
        let (u_min, v_min, u_max, v_max) = crate::geometry::bounding_box(&islands[0].border);
        assert!(u_min <= 1e-9);
        assert!(v_max >= 1.0 - 1e-9);
        let _ = (v_min, u_max);
    }

    #[test]
    fn diamond_shape_traces_closed_polygon() {
        let layer = layer_from_rows(&[
            "..#..",
            ".###.",
            "#####",
            ".###.",
            "..#..",
        ]);
        let islands = detect_islands(&layer, 0);
        assert_eq!(islands.len(), 1);
        assert!(islands[0].border.len() >= 4);
    }
}
