use std::path::PathBuf;

/// Error taxonomy for the pipeline.
///
/// `ProjectionFailure` from the design is deliberately not a variant here:
/// a trace that fails to project is not an error, it is a `None` returned by
/// [`crate::project::project`] and silently dropped by the pipeline driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input in {stage}: {message}")]
    InvalidInput { stage: &'static str, message: String },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error decoding image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("io error encoding output: {0}")]
    Json(#[source] serde_json::Error),

    #[error("internal invariant violated in {stage}: {message}")]
    Fatal { stage: &'static str, message: String },
}

impl Error {
    pub fn invalid_input(stage: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            stage,
            message: message.into(),
        }
    }

    pub fn fatal(stage: &'static str, message: impl Into<String>) -> Self {
        Error::Fatal {
            stage,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
