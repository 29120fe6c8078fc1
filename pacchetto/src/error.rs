//! Error types for packaging and installation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for pacchetto operations.
pub type Result<T> = std::result::Result<T, PacchettoError>;

/// Errors that can occur while locating, packaging or installing.
#[derive(Debug, Error)]
pub enum PacchettoError {
    /// No installation was found by the discovery strategy.
    #[error("failed to locate Assetto Corsa directory")]
    NotFound,

    /// Installation discovery is not available on this platform.
    #[error("{0} is not currently supported")]
    Unsupported(String),

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Creating or reading a zip archive failed.
    #[error("archive error at {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// Content expected in the installation is absent.
    #[error("Assetto Corsa content '{0}' does not exist")]
    ContentMissing(String),

    /// An archive expected during installation is absent.
    #[error("the '{0}' package is missing")]
    PackageMissing(String),

    /// Configuration file problem.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PacchettoError {
    /// Wrap an I/O error with the path it concerns.
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a zip error with the archive path it concerns.
    pub(crate) fn archive(path: impl AsRef<Path>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_missing_display() {
        let err = PacchettoError::ContentMissing("weather".to_string());
        assert_eq!(
            err.to_string(),
            "Assetto Corsa content 'weather' does not exist"
        );
    }

    #[test]
    fn test_package_missing_display() {
        let err = PacchettoError::PackageMissing("server".to_string());
        assert_eq!(err.to_string(), "the 'server' package is missing");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = PacchettoError::io(
            "/missing/file",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/missing/file"));
        assert!(err.source().is_some());
    }
}
