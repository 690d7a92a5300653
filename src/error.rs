//! Error types for scanning operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a scan. Per-folder permission failures are not
/// errors: the scanner records the folder as inaccessible and keeps going.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Selected root path does not name an existing directory.
    #[error("not a directory: {path}")]
    InvalidRoot { path: PathBuf },

    /// Scan or layout limits are out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unexpected I/O failure during traversal.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scan worker died without producing a tree.
    #[error("{message}")]
    Failed { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_display() {
        let err = ScanError::InvalidRoot {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(err.to_string(), "not a directory: /no/such/dir");
    }

    #[test]
    fn test_io_keeps_source_message() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::Other, "disk fell over"),
        );
        assert!(err.to_string().contains("/test/path"));
        assert!(err.to_string().contains("disk fell over"));
    }
}
