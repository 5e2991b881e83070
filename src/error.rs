//! Error types for pdf-trim

use thiserror::Error;

/// Result type alias for pdf-trim
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pdf-trim
#[derive(Error, Debug)]
pub enum Error {
    /// The PDFium shared library could not be loaded
    #[error("PDFium library unavailable: {reason}")]
    Startup { reason: String },

    /// Input file not found
    #[error("File not found: {path}")]
    InputNotFound { path: String },

    /// Input exists but is not a readable PDF
    #[error("Cannot open {path}: {reason}")]
    Open { path: String, reason: String },

    /// Rendering a page to a raster failed
    #[error("Failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },

    /// Encoding or decoding a scratch image failed
    #[error("Image encoding error: {reason}")]
    Encode { reason: String },

    /// Building the output document failed
    #[error("Failed to assemble output PDF: {reason}")]
    Assemble { reason: String },

    /// Writing the output document failed
    #[error("Failed to save {path}: {reason}")]
    Save { path: String, reason: String },

    /// Rejected configuration value
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures that happen while pages are being processed, after
    /// startup checks and input resolution have passed.
    pub fn is_processing(&self) -> bool {
        !matches!(
            self,
            Error::Startup { .. } | Error::InputNotFound { .. } | Error::InvalidConfig { .. }
        )
    }
}

impl From<png::EncodingError> for Error {
    fn from(e: png::EncodingError) -> Self {
        Error::Encode {
            reason: e.to_string(),
        }
    }
}

impl From<png::DecodingError> for Error {
    fn from(e: png::DecodingError) -> Self {
        Error::Encode {
            reason: e.to_string(),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Encode {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::InputNotFound {
            path: "/tmp/missing.pdf".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: /tmp/missing.pdf");

        let err = Error::Render {
            page: 3,
            reason: "boom".to_string(),
        };
        assert!(err.to_string().contains("page 3"));
    }

    #[test]
    fn test_processing_classification() {
        assert!(!Error::Startup {
            reason: "no lib".to_string()
        }
        .is_processing());
        assert!(!Error::InputNotFound {
            path: "x".to_string()
        }
        .is_processing());
        assert!(Error::Open {
            path: "x".to_string(),
            reason: "bad".to_string()
        }
        .is_processing());
        assert!(Error::from(std::io::Error::other("disk full")).is_processing());
    }
}
