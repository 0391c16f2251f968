use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobscanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No valid values in grid")]
    NoValidData,

    #[error("Invalid ASCII grid: {0}")]
    InvalidGrid(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene {scene_id}: {source}")]
    Scene {
        scene_id: String,
        #[source]
        source: Box<BlobscanError>,
    },
}

pub type Result<T> = std::result::Result<T, BlobscanError>;
