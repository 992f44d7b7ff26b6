use crate::config::Config;
use crate::geometry::{bounding_box, clip_horizontal_line};
use crate::trace::{Island, Trace2D};

/// Emit, in order: one border trace for the island, then zero or more
/// fill-hatch traces from a horizontal-line sweep clipped to the polygon.
pub fn emit_2d(island: &Island, config: &Config) -> Vec<Trace2D> {
    let mut traces = Vec::new();

    traces.push(Trace2D {
        color: island.color,
        path: island.border.clone(),
    });

    traces.extend(emit_fill_traces(island, config));

    traces
}

fn emit_fill_traces(island: &Island, config: &Config) -> Vec<Trace2D> {
    let (u_min, v_min, u_max, v_max) = bounding_box(&island.border);
    let spacing = config.fill_slice_spacing;
    let mut traces = Vec::new();

    if spacing <= 0.0 {
        return traces;
    }

    let mut k = 1u64;
    loop {
        let v = v_min + k as f64 * spacing;
        if v >= v_max {
            break;
        }

        let mut segments = clip_horizontal_line(&island.border, v, config.barycentric_epsilon)
            .into_segments();
        segments.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        for (u_a, u_b) in segments {
            if u_a >= u_b {
                continue;
            }
            traces.push(Trace2D {
                color: island.color,
                path: vec![(u_a, v), (u_b, v)],
            });
        }

        k += 1;
    }

    traces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(color: usize) -> Island {
        Island {
            idx: 0,
            color,
            border: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        }
    }

    #[test]
    fn emits_border_then_fills() {
        let island = unit_square(2);
        let config = Config::default();
        let traces = emit_2d(&island, &config);
        assert!(traces.len() > 1);
        assert_eq!(traces[0].path, island.border);
        for trace in &traces[1..] {
            assert_eq!(trace.path.len(), 2);
            assert_eq!(trace.color, 2);
        }
    }

    #[test]
    fn large_spacing_yields_border_only() {
        let island = unit_square(0);
        let mut config = Config::default();
        config.fill_slice_spacing = 2.0; // >= v_max - v_min
        let traces = emit_2d(&island, &config);
        assert_eq!(traces.len(), 1);
    }

    #[test]
    fn fill_points_lie_within_bounding_box() {
        let island = unit_square(0);
        let config = Config::default();
        let traces = emit_2d(&island, &config);
        for trace in &traces[1..] {
            for &(u, v) in &trace.path {
                assert!((0.0..=1.0).contains(&u));
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn fills_are_ordered_by_ascending_v_then_u() {
        let island = unit_square(0);
        let config = Config::default();
        let traces = emit_2d(&island, &config);
        let mut last_v = f64::NEG_INFINITY;
        for trace in &traces[1..] {
            let v = trace.path[0].1;
            assert!(v >= last_v);
            last_v = v;
        }
    }
}
