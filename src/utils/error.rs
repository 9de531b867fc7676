use thiserror::Error;

// Define error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported GeoJSON payload")]
    UnsupportedPayload,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Error parsing GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
