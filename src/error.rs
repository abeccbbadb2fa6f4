//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, property-list, image and JSON errors, and provides
//! semantic variants for the two input-loading failures of a run.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Property list error: {0}")]
    Plist(#[from] crate::io::PlistError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not load sprite sheet descriptor {path:?}: {source}")]
    Descriptor {
        path: PathBuf,
        #[source]
        source: crate::io::PlistError,
    },

    #[error("Could not load sprite sheet texture {path:?}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Sprite {sprite:?} would be overwritten by the frame manifest {path:?}")]
    ManifestCollision { sprite: String, path: PathBuf },
}
