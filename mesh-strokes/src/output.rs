use std::io::{IsTerminal, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::trace::Trace3D;

#[derive(Serialize)]
struct TraceDoc {
    face: [f64; 3],
    color: usize,
    path: Vec<[f64; 3]>,
}

#[derive(Serialize)]
pub struct OutputDocument {
    pub generated_at: String,
    pub model: String,
    pub texture: String,
    traces: Vec<TraceDoc>,
}

impl OutputDocument {
    pub fn new(generated_at: String, model: String, texture: String, traces: &[Trace3D]) -> Self {
        OutputDocument {
            generated_at,
            model,
            texture,
            traces: traces
                .iter()
                .map(|t| TraceDoc { face: t.face, color: t.color, path: t.path.clone() })
                .collect(),
        }
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }
}

/// Whether an existing output file at `path` may be overwritten, applying
/// the TTY-confirmation policy from the external interface contract: on a
/// TTY, prompt with default No; off a TTY, always default to No.
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    print!("{} already exists. Overwrite? [y/N] ", path.display());
    std::io::stdout().flush().map_err(|source| Error::io(path, source))?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|source| Error::io(path, source))?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Serialize the output document as JSON with 4-space indentation, per the
/// external interface contract (`serde_json`'s default pretty printer uses
/// 2 spaces, so we supply our own indent rather than hand-rolling the
/// serializer).
pub fn write_document(path: &Path, document: &OutputDocument) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| Error::io(path, source))?;
    let mut writer = std::io::BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    document.serialize(&mut serializer).map_err(Error::Json)?;
    writer.flush().map_err(|source| Error::io(path, source))?;
    Ok(())
}
