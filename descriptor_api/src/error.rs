use thiserror::Error;

/// Failures surfaced across the service boundary. Malformed descriptor
/// fields are never an error (coercion absorbs them); these cover the
/// collaborators on either side of the engine.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The metadata backend could not resolve the URL. The caller sent bad
    /// input; the backend's message rides along.
    #[error("failed to extract formats: {0}")]
    Extraction(String),
    /// The download/transcode collaborator failed server-side.
    #[error("download failed: {0}")]
    Download(String),
}
