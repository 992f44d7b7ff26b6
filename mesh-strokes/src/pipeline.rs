use log::{info, warn};

use crate::color::Palette;
use crate::config::Config;
use crate::contour;
use crate::debug::{DebugSink, NullDebugSink};
use crate::error::Result;
use crate::hatch;
use crate::layer;
use crate::mesh::Mesh;
use crate::project;
use crate::quantize;
use crate::texture::Texture;
use crate::trace::Trace3D;

/// Holds the pipeline configuration across a single-shot run, mirroring the
/// teacher crate's pattern of a struct that carries expensive-to-recompute
/// state between calls (here, just the tunables; the pipeline itself has no
/// cache to warm).
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full stage chain and return the surviving 3D traces, in
    /// emission order: layers in palette order, islands in detection order
    /// within a layer, border-then-fills within an island, 3D projection
    /// preserving 2D emission order.
    pub fn run(&self, texture: &Texture, mesh: &Mesh, palette: &Palette) -> Result<Vec<Trace3D>> {
        self.run_with_debug(texture, mesh, palette, &mut NullDebugSink)
    }

    pub fn run_with_debug(
        &self,
        texture: &Texture,
        mesh: &Mesh,
        palette: &Palette,
        debug: &mut dyn DebugSink,
    ) -> Result<Vec<Trace3D>> {
        let indexed = quantize::quantize(texture, palette)?;
        info!(
            "quantized {}x{} texture into {} palette indices",
            indexed.width,
            indexed.height,
            palette.len()
        );

        let layers = layer::split(&indexed, palette);
        info!("split into {} layers", layers.len());

        let mut traces_3d = Vec::new();
        let mut emitted_2d = 0usize;

        for layer in &layers {
            if self.config.debug {
                debug.on_layer(layer);
            }

            let islands = contour::detect_islands(layer, layer.color);
            info!("detected {} islands in layer {}", islands.len(), layer.color);

            if self.config.debug {
                debug.on_islands(layer.color, &islands);
            }

            for island in &islands {
                let traces_2d = hatch::emit_2d(island, &self.config);
                emitted_2d += traces_2d.len();

                for trace_2d in &traces_2d {
                    match project::project(trace_2d, mesh, &self.config) {
                        Some(trace_3d) => traces_3d.push(trace_3d),
                        None => warn!(
                            "dropped trace for color {} ({} points): failed to project",
                            trace_2d.color,
                            trace_2d.path.len()
                        ),
                    }
                }
            }
        }

        info!(
            "emitted {} traces, projected {}/{}",
            traces_3d.len(),
            traces_3d.len(),
            emitted_2d
        );

        if self.config.debug {
            debug.on_traces_3d(&traces_3d);
        }

        Ok(traces_3d)
    }
}
