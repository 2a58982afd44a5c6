//! Font resources
//!
//! Extruded text geometry references fonts by family name. The
//! [`FontLibrary`] knows which families are available and turns a
//! `(family, size)` request into a [`FontRef`], or a recoverable
//! [`AssetError`] when the family is missing.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::asset_error::AssetError;

/// File extensions recognised when scanning a font directory
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// A resolved font: family name plus point size in scene units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRef {
    /// Font family name (e.g. "Helvetica")
    pub family: String,
    /// Glyph size in scene units
    pub size: f32,
}

/// Set of font families available to the scene
///
/// Family lookup is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    families: BTreeSet<String>,
}

impl FontLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library from a list of family names
    pub fn from_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut library = Self::new();
        for family in families {
            library.register(family.as_ref());
        }
        library
    }

    /// Add a family to the library
    pub fn with_family(mut self, family: &str) -> Self {
        self.register(family);
        self
    }

    /// Register a family, returning `true` if it was not already known
    pub fn register(&mut self, family: &str) -> bool {
        let key = family.trim().to_lowercase();
        if key.is_empty() {
            return false;
        }
        self.families.insert(key)
    }

    /// Register every font file found directly inside `dir`
    ///
    /// The family name is the file stem, so `fonts/Chalkduster.ttf` registers
    /// "Chalkduster". Returns the number of newly registered families.
    pub fn scan_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, AssetError> {
        let dir = dir.as_ref();
        let mut added = 0;
        let font_dir_error = |source| AssetError::FontDir { path: dir.to_path_buf(), source };
        for entry in fs::read_dir(dir).map_err(font_dir_error)? {
            let path = entry.map_err(font_dir_error)?.path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FONT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if !is_font {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if self.register(stem) {
                    log::debug!("Registered font '{}' from {}", stem, path.display());
                    added += 1;
                }
            }
        }
        log::info!("Scanned {}: {} new font families", dir.display(), added);
        Ok(added)
    }

    /// Check whether a family is available
    pub fn contains(&self, family: &str) -> bool {
        self.families.contains(&family.trim().to_lowercase())
    }

    /// Number of known families
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if no families are known
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Resolve a font request
    pub fn resolve(&self, family: &str, size: f32) -> Result<FontRef, AssetError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(AssetError::InvalidSize { family: family.to_string(), size });
        }
        if !self.contains(family) {
            return Err(AssetError::MissingFamily { family: family.to_string() });
        }
        Ok(FontRef {
            family: family.to_string(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("carousel_fonts_{}_{}", tag, nanos));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolve_known_family() {
        let library = FontLibrary::from_families(["Helvetica", "Chalkduster"]);
        let font = library.resolve("Helvetica", 0.5).unwrap();
        assert_eq!(font.family, "Helvetica");
        assert_eq!(font.size, 0.5);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let library = FontLibrary::new().with_family("Chalkduster");
        assert!(library.resolve("chalkduster", 0.5).is_ok());
        assert!(library.contains("  CHALKDUSTER "));
    }

    #[test]
    fn test_resolve_missing_family() {
        let library = FontLibrary::new().with_family("Helvetica");
        match library.resolve("Chalkduster", 0.5) {
            Err(AssetError::MissingFamily { family }) => assert_eq!(family, "Chalkduster"),
            other => panic!("Expected MissingFamily, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_bad_size() {
        let library = FontLibrary::new().with_family("Helvetica");
        assert!(matches!(library.resolve("Helvetica", 0.0), Err(AssetError::InvalidSize { .. })));
        assert!(matches!(library.resolve("Helvetica", f32::NAN), Err(AssetError::InvalidSize { .. })));
    }

    #[test]
    fn test_register_ignores_blank_and_duplicates() {
        let mut library = FontLibrary::new();
        assert!(!library.register("   "));
        assert!(library.register("Helvetica"));
        assert!(!library.register("helvetica"));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_scan_dir_registers_font_files() {
        let dir = temp_dir("scan");
        fs::write(dir.join("Chalkduster.ttf"), b"").unwrap();
        fs::write(dir.join("Menlo.OTF"), b"").unwrap();
        fs::write(dir.join("readme.txt"), b"").unwrap();

        let mut library = FontLibrary::new();
        let added = library.scan_dir(&dir).unwrap();

        assert_eq!(added, 2);
        assert!(library.contains("Chalkduster"));
        assert!(library.contains("Menlo"));
        assert!(!library.contains("readme"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_scan_missing_dir_is_io_error() {
        let mut library = FontLibrary::new();
        let result = library.scan_dir("/definitely/not/a/font/dir");
        match result {
            Err(AssetError::FontDir { path, .. }) => {
                assert_eq!(path, Path::new("/definitely/not/a/font/dir"));
            }
            other => panic!("Expected FontDir, got {:?}", other),
        }
    }
}
