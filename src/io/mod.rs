//! Centerline file input.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Notes |
//! |--------|-----------|------|-------|
//! | PLY | `.ply` | ✓ | `vertex` and `edge` elements, ASCII or binary |
//!
//! # Usage
//!
//! ```no_run
//! use vasgraph::io::load;
//!
//! let centerline = load("aorta.ply").unwrap();
//! println!("{} points", centerline.num_points());
//! ```

pub mod ply;

use std::path::Path;

use crate::centerline::Centerline;
use crate::error::{GraphError, Result};

/// Supported centerline file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Load a centerline from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Centerline> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| GraphError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Ply => ply::load(path),
    }
}
