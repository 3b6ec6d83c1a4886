//! Error types for mesh loading and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a mesh or rendering it.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The mesh file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numeric token in the mesh could not be parsed.
    #[error("line {line}: unparsable number {token:?}")]
    Parse { line: usize, token: String },

    /// A face refers to a vertex that was not declared before it.
    #[error("line {line}: face index {index} does not name a declared vertex")]
    FaceIndex { line: usize, index: i64 },

    /// Triangle vertices are colinear.
    #[error("degenerate triangle: vertices are colinear")]
    DegenerateTriangle,

    /// Attempted to normalize a vector with zero length.
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    /// Render options are out of range.
    #[error("invalid render options: {0}")]
    Config(String),

    /// The render configuration file is malformed.
    #[error("failed to parse render options: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The framebuffer could not be encoded.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
