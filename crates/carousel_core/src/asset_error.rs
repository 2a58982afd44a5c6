//! Font lookup errors
//!
//! Text geometry names its font by family. A scene whose fonts cannot be
//! resolved is reported through [`AssetError`] so the caller can pick a
//! fallback instead of aborting.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error resolving the fonts a scene asks for
#[derive(Debug)]
pub enum AssetError {
    /// A font directory could not be listed
    FontDir { path: PathBuf, source: io::Error },
    /// No font of this family is installed
    MissingFamily { family: String },
    /// Glyph size must be a positive finite number
    InvalidSize { family: String, size: f32 },
}

impl AssetError {
    /// Family the failed request was for, if any
    pub fn family(&self) -> Option<&str> {
        match self {
            AssetError::FontDir { .. } => None,
            AssetError::MissingFamily { family } | AssetError::InvalidSize { family, .. } => {
                Some(family)
            }
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::FontDir { path, source } => {
                write!(f, "Cannot read font directory {}: {}", path.display(), source)
            }
            AssetError::MissingFamily { family } => {
                write!(f, "Font family '{}' is not installed", family)
            }
            AssetError::InvalidSize { family, size } => {
                write!(f, "Font '{}' requested at unusable size {}", family, size)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::FontDir { source, .. } => Some(source),
            AssetError::MissingFamily { .. } | AssetError::InvalidSize { .. } => None,
        }
    }
}
