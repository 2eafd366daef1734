use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an image file into a pixel buffer.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("image not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ResourceLoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ResourceLoadError::Missing { path } | ResourceLoadError::Decode { path, .. } => path,
        }
    }
}
