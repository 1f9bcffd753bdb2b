use thiserror::Error;

/// Result type for proxy geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or placing proxies
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate crop boundary: {0}")]
    DegenerateBoundary(String),

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Host model error: {0}")]
    HostError(#[from] viewrange_core::Error),
}
