//! Error types for the renderer

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or rendering a listing image
#[derive(Error, Debug)]
pub enum Error {
    /// A font file could not be read or parsed. Text rendering recovers
    /// from this by switching to the built-in face.
    #[error("Failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    /// Canvas dimensions out of range
    #[error("Invalid canvas dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// Malformed configuration file
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Unknown preset name
    #[error("Unknown preset '{0}' (expected 'laptop' or 'monitor')")]
    UnknownPreset(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoder error
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = Error::InvalidDimensions {
            width: 0,
            height: 10,
            reason: "width must be non-zero",
        };
        assert_eq!(
            e.to_string(),
            "Invalid canvas dimensions 0x10: width must be non-zero"
        );
        let e = Error::UnknownPreset("tablet".into());
        assert!(e.to_string().contains("tablet"));
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
