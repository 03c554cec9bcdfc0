//! Error types.
//!
//! Only failures that invalidate every downstream artifact are errors.
//! Missing fonts and a missing `iconutil` are reported as values instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while composing the master image.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("icon size must be positive, got {0}")]
    InvalidSize(u32),

    #[error("could not allocate a {0}x{0} canvas")]
    Allocation(u32),
}

/// Failure while writing icon assets.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    WritePng {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}", path.display())]
    WriteIco {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while loading an [`IconStyle`](crate::IconStyle) file.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read style file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid style file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
