//! Colors and materials
//!
//! Materials are stored once in the [`SceneGraph`](crate::SceneGraph) and
//! referenced by key, so every node pointing at the same material sees the
//! same color.

use serde::{Serialize, Deserialize};

/// An RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const GRAY: Self = Self([0.5, 0.5, 0.5, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const CYAN: Self = Self([0.0, 1.0, 1.0, 1.0]);
    pub const MAGENTA: Self = Self([1.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);

    /// Create a color from RGBA components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// Components as an RGBA array
    pub fn rgba(&self) -> [f32; 4] {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Surface appearance: diffuse and specular color
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Optional name (for lookup and debugging)
    #[serde(default)]
    pub name: Option<String>,
    /// Base surface color
    pub diffuse: Color,
    /// Highlight color
    pub specular: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
        }
    }
}

impl Material {
    /// Create a material with the given diffuse color and a white highlight
    pub fn glossy(diffuse: Color) -> Self {
        Self {
            name: None,
            diffuse,
            specular: Color::WHITE,
        }
    }

    /// Set the name of this material
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::CYAN.rgba(), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::MAGENTA.rgba(), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(Color::new(0.2, 0.3, 0.4, 0.5).rgba(), [0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_glossy_material() {
        let material = Material::glossy(Color::YELLOW).with_name("yellow");
        assert_eq!(material.diffuse, Color::YELLOW);
        assert_eq!(material.specular, Color::WHITE);
        assert_eq!(material.name.as_deref(), Some("yellow"));
    }

    #[test]
    fn test_material_serialization() {
        let material = Material::glossy(Color::RED);
        let serialized = ron::to_string(&material).unwrap();
        let deserialized: Material = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, material);
    }
}
