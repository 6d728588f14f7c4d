use std::io;
use std::path::PathBuf;

/// Failures reading or writing map documents on disk.
///
/// Content problems inside a well-formed document are not errors here;
/// they come back as an [`ImportResult`](super::ImportResult).
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid map file format: {}", .0.display())]
    InvalidFormat(PathBuf),
}
