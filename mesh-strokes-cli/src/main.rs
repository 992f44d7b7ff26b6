use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use mesh_strokes::{
    confirm_overwrite, write_document, Color, Config, Mesh, OutputDocument, Palette, Pipeline,
    Result, Texture,
};

/// Convert a textured mesh and an artist palette into an ordered collection
/// of 3D pen-strokes.
#[derive(Debug, Parser)]
#[command(name = "mesh-strokes")]
struct Cli {
    /// Path to the source texture (PNG or JPEG).
    texture: PathBuf,
    /// Path to the Wavefront OBJ mesh.
    model: PathBuf,
    /// Ordered palette as comma-separated hex triplets, e.g. "ff0000,00ff00".
    #[arg(value_parser = clap::builder::ValueParser::new(parse_color_list))]
    palette: ColorList,
    /// Path the output JSON document is written to.
    output: PathBuf,

    /// Call the debug-visualization hooks while running.
    #[arg(long, default_value_t = false)]
    debug: bool,
    /// Epsilon used for barycentric/point-in-triangle containment tests.
    #[arg(long, default_value_t = Config::default().barycentric_epsilon)]
    barycentric_epsilon: f64,
    /// Maximum distance between two face normals still considered coplanar.
    #[arg(long, default_value_t = Config::default().parallel_normal_epsilon)]
    parallel_normal_epsilon: f64,
    /// Spacing, in UV units, between consecutive fill-hatch sweep lines.
    #[arg(long, default_value_t = Config::default().fill_slice_spacing)]
    fill_slice_spacing: f64,
}

#[derive(Debug, Clone)]
struct ColorList(Vec<Color>);

impl std::ops::Deref for ColorList {
    type Target = [Color];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn parse_color_list(list: &str) -> std::result::Result<ColorList, String> {
    let mut colors = vec![];
    for (i, color_str) in list.split(',').enumerate() {
        if color_str.len() != 6 {
            Err(format!("Color {i} isn't valid: wrong length."))?
        }
        if !color_str.is_ascii() {
            Err(format!("Color list contains non-ascii characters."))?
        }
        colors.push(Color::new(
            u8::from_str_radix(&color_str[..2], 16)
                .map_err(|e| format!("Invalid R comp. in color {i}: {e}"))?,
            u8::from_str_radix(&color_str[2..4], 16)
                .map_err(|e| format!("Invalid G comp. in color {i}: {e}"))?,
            u8::from_str_radix(&color_str[4..], 16)
                .map_err(|e| format!("Invalid B comp. in color {i}: {e}"))?,
        ));
    }
    Ok(ColorList(colors))
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config {
        debug: cli.debug,
        barycentric_epsilon: cli.barycentric_epsilon,
        parallel_normal_epsilon: cli.parallel_normal_epsilon,
        fill_slice_spacing: cli.fill_slice_spacing,
    };

    if !confirm_overwrite(&cli.output)? {
        info!("refusing to overwrite {}", cli.output.display());
        return Ok(2);
    }

    let texture = Texture::load(&cli.texture)?;
    let mesh = Mesh::load(&cli.model)?;
    let palette = Palette::new(cli.palette.0.clone())?;

    let pipeline = Pipeline::new(config);
    let traces = pipeline.run(&texture, &mesh, &palette)?;

    let generated_at = chrono::Local::now().format("%+").to_string();
    let document = OutputDocument::new(
        generated_at,
        cli.model.display().to_string(),
        cli.texture.display().to_string(),
        &traces,
    );
    write_document(&cli.output, &document)?;
    info!(
        "wrote {} traces to {}",
        document.trace_count(),
        cli.output.display()
    );

    if traces.is_empty() {
        info!("pipeline produced no traces");
        return Ok(3);
    }

    Ok(0)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            match err {
                mesh_strokes::Error::InvalidInput { .. } => 1,
                mesh_strokes::Error::Io { .. } | mesh_strokes::Error::Image { .. } => 2,
                mesh_strokes::Error::Json(_) | mesh_strokes::Error::Fatal { .. } => 2,
            }
        }
    };

    std::process::exit(exit_code);
}
