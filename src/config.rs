//! Render configuration.
//!
//! Every field has a default matching the stock listing image, so an empty
//! JSON object (or no file at all) renders the monitor scene at 2000×2000.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scene::Preset;

/// Largest accepted canvas edge.
pub const MAX_DIMENSION: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub preset: Preset,
    /// Output PNG path.
    pub output: PathBuf,
    /// Directory the TTF files are loaded from.
    pub font_dir: PathBuf,
    /// Use the slowest, smallest PNG compression.
    pub optimize: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            preset: Preset::default(),
            output: PathBuf::from("etsy-assets/etsy-listing-main.png"),
            font_dir: PathBuf::from("fonts"),
            optimize: true,
        }
    }
}

impl RenderConfig {
    /// Load a configuration file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check the canvas dimensions.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.width == 0 {
            "width must be non-zero"
        } else if self.height == 0 {
            "height must be non-zero"
        } else if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            "dimensions must not exceed 16384"
        } else {
            return Ok(());
        };
        Err(Error::InvalidDimensions {
            width: self.width,
            height: self.height,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RenderConfig::default();
        assert_eq!((c.width, c.height), (2000, 2000));
        assert_eq!(c.preset, Preset::Monitor);
        assert_eq!(c.output, PathBuf::from("etsy-assets/etsy-listing-main.png"));
        assert!(c.optimize);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = RenderConfig::from_json(r#"{ "preset": "laptop", "width": 800 }"#).unwrap();
        assert_eq!(c.preset, Preset::Laptop);
        assert_eq!(c.width, 800);
        assert_eq!(c.height, 2000);
        assert_eq!(RenderConfig::from_json("{}").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(RenderConfig::from_json("{ width: }"), Err(Error::Config(_))));
        assert!(matches!(
            RenderConfig::from_json(r#"{ "preset": "tablet" }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validate() {
        let mut c = RenderConfig::default();
        c.height = 0;
        assert!(matches!(c.validate(), Err(Error::InvalidDimensions { height: 0, .. })));
        c.height = MAX_DIMENSION + 1;
        assert!(c.validate().is_err());
        c.height = MAX_DIMENSION;
        c.width = 1;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let r = RenderConfig::from_json_file(Path::new("/nonexistent/render.json"));
        assert!(matches!(r, Err(Error::Io(_))));
    }
}
