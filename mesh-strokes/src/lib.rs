mod color;
mod config;
mod contour;
mod debug;
mod error;
mod geometry;
mod hatch;
mod layer;
mod mesh;
mod output;
mod pipeline;
mod project;
mod quantize;
mod texture;
mod trace;

pub use color::{Color, Palette};
pub use config::Config;
pub use debug::{DebugSink, NullDebugSink};
pub use error::{Error, Result};
pub use layer::{split, Layer};
pub use mesh::Mesh;
pub use output::{confirm_overwrite, write_document, OutputDocument};
pub use pipeline::Pipeline;
pub use quantize::{quantize, IndexedImage};
pub use texture::Texture;
pub use trace::{Island, Trace2D, Trace3D};
