//! Primitive geometry descriptions
//!
//! Geometry is pure parameter data: the host renderer tessellates it.
//! Every variant is built in **local space**, centered on its node.

use serde::{Serialize, Deserialize};

use crate::font::FontRef;

/// A primitive shape and its construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Rectangular box, optionally with rounded edges
    Box {
        width: f32,
        height: f32,
        length: f32,
        /// Edge rounding radius (0 = sharp)
        chamfer_radius: f32,
    },
    /// Cylinder with hemispherical caps
    Capsule {
        cap_radius: f32,
        height: f32,
    },
    /// Sphere, tessellated either by latitude/longitude or geodesically
    Sphere {
        radius: f32,
        geodesic: bool,
    },
    /// Hollow cylinder
    Tube {
        inner_radius: f32,
        outer_radius: f32,
        height: f32,
    },
    /// Four-sided pyramid standing on its base
    Pyramid {
        width: f32,
        height: f32,
        length: f32,
    },
    /// Extruded text
    Text {
        string: String,
        font: FontRef,
        extrusion_depth: f32,
        underline: bool,
    },
    /// One-sided rectangle
    Plane {
        width: f32,
        height: f32,
    },
    /// Cone or frustum (top radius 0 gives a pointed cone)
    Cone {
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
    },
    /// Ring torus
    Torus {
        ring_radius: f32,
        pipe_radius: f32,
    },
    /// Infinite ground plane at the node's height
    Floor,
}

impl Geometry {
    /// Create a box
    pub fn cuboid(width: f32, height: f32, length: f32, chamfer_radius: f32) -> Self {
        Geometry::Box { width, height, length, chamfer_radius }
    }

    /// Create a capsule
    pub fn capsule(cap_radius: f32, height: f32) -> Self {
        Geometry::Capsule { cap_radius, height }
    }

    /// Create a latitude/longitude sphere
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius, geodesic: false }
    }

    /// Create a geodesic sphere
    pub fn geodesic_sphere(radius: f32) -> Self {
        Geometry::Sphere { radius, geodesic: true }
    }

    /// Create a tube
    pub fn tube(inner_radius: f32, outer_radius: f32, height: f32) -> Self {
        Geometry::Tube { inner_radius, outer_radius, height }
    }

    /// Create a pyramid
    pub fn pyramid(width: f32, height: f32, length: f32) -> Self {
        Geometry::Pyramid { width, height, length }
    }

    /// Create underlined extruded text
    pub fn text(string: impl Into<String>, font: FontRef, extrusion_depth: f32) -> Self {
        Geometry::Text {
            string: string.into(),
            font,
            extrusion_depth,
            underline: true,
        }
    }

    /// Create a plane
    pub fn plane(width: f32, height: f32) -> Self {
        Geometry::Plane { width, height }
    }

    /// Create a cone or frustum
    pub fn cone(top_radius: f32, bottom_radius: f32, height: f32) -> Self {
        Geometry::Cone { top_radius, bottom_radius, height }
    }

    /// Create a torus
    pub fn torus(ring_radius: f32, pipe_radius: f32) -> Self {
        Geometry::Torus { ring_radius, pipe_radius }
    }

    /// Short name of the shape kind
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Box { .. } => "box",
            Geometry::Capsule { .. } => "capsule",
            Geometry::Sphere { .. } => "sphere",
            Geometry::Tube { .. } => "tube",
            Geometry::Pyramid { .. } => "pyramid",
            Geometry::Text { .. } => "text",
            Geometry::Plane { .. } => "plane",
            Geometry::Cone { .. } => "cone",
            Geometry::Torus { .. } => "torus",
            Geometry::Floor => "floor",
        }
    }

    /// Check the construction parameters, returning a description of the
    /// first problem found
    pub fn check(&self) -> Result<(), String> {
        fn positive(name: &str, value: f32) -> Result<(), String> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be positive, got {}", name, value))
            }
        }

        fn non_negative(name: &str, value: f32) -> Result<(), String> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(format!("{} must not be negative, got {}", name, value))
            }
        }

        match self {
            Geometry::Box { width, height, length, chamfer_radius } => {
                positive("width", *width)?;
                positive("height", *height)?;
                positive("length", *length)?;
                non_negative("chamfer_radius", *chamfer_radius)
            }
            Geometry::Capsule { cap_radius, height } => {
                positive("cap_radius", *cap_radius)?;
                positive("height", *height)
            }
            Geometry::Sphere { radius, .. } => positive("radius", *radius),
            Geometry::Tube { inner_radius, outer_radius, height } => {
                non_negative("inner_radius", *inner_radius)?;
                positive("outer_radius", *outer_radius)?;
                positive("height", *height)?;
                if inner_radius >= outer_radius {
                    return Err(format!(
                        "inner_radius {} must be below outer_radius {}",
                        inner_radius, outer_radius
                    ));
                }
                Ok(())
            }
            Geometry::Pyramid { width, height, length } => {
                positive("width", *width)?;
                positive("height", *height)?;
                positive("length", *length)
            }
            Geometry::Text { string, font, extrusion_depth, .. } => {
                if string.is_empty() {
                    return Err("text must not be empty".to_string());
                }
                positive("font size", font.size)?;
                non_negative("extrusion_depth", *extrusion_depth)
            }
            Geometry::Plane { width, height } => {
                positive("width", *width)?;
                positive("height", *height)
            }
            Geometry::Cone { top_radius, bottom_radius, height } => {
                non_negative("top_radius", *top_radius)?;
                non_negative("bottom_radius", *bottom_radius)?;
                positive("height", *height)?;
                if *top_radius == 0.0 && *bottom_radius == 0.0 {
                    return Err("cone radii must not both be zero".to_string());
                }
                Ok(())
            }
            Geometry::Torus { ring_radius, pipe_radius } => {
                positive("ring_radius", *ring_radius)?;
                positive("pipe_radius", *pipe_radius)
            }
            Geometry::Floor => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontRef {
        FontRef { family: "Helvetica".to_string(), size: 0.5 }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Geometry::cuboid(1.0, 1.0, 1.0, 0.0).kind(), "box");
        assert_eq!(Geometry::geodesic_sphere(1.0).kind(), "sphere");
        assert_eq!(Geometry::Floor.kind(), "floor");
    }

    #[test]
    fn test_sphere_variants() {
        assert_eq!(Geometry::sphere(0.25), Geometry::Sphere { radius: 0.25, geodesic: false });
        assert_eq!(Geometry::geodesic_sphere(0.25), Geometry::Sphere { radius: 0.25, geodesic: true });
    }

    #[test]
    fn test_text_is_underlined() {
        match Geometry::text("hello", font(), 0.05) {
            Geometry::Text { underline, extrusion_depth, .. } => {
                assert!(underline);
                assert_eq!(extrusion_depth, 0.05);
            }
            _ => panic!("Expected Text variant"),
        }
    }

    #[test]
    fn test_check_accepts_valid_shapes() {
        assert!(Geometry::cuboid(0.5, 0.5, 0.25, 0.2).check().is_ok());
        assert!(Geometry::tube(0.2, 0.25, 0.5).check().is_ok());
        assert!(Geometry::cone(0.0, 0.125, 0.5).check().is_ok());
        assert!(Geometry::text("hello", font(), 0.05).check().is_ok());
        assert!(Geometry::Floor.check().is_ok());
    }

    #[test]
    fn test_check_rejects_bad_tube() {
        let err = Geometry::tube(0.5, 0.4, 1.0).check().unwrap_err();
        assert!(err.contains("inner_radius"));
    }

    #[test]
    fn test_check_rejects_degenerate_cone() {
        assert!(Geometry::cone(0.0, 0.0, 1.0).check().is_err());
    }

    #[test]
    fn test_check_rejects_non_positive_extent() {
        assert!(Geometry::plane(0.0, 1.0).check().is_err());
        assert!(Geometry::torus(1.0, -0.1).check().is_err());
        assert!(Geometry::sphere(f32::NAN).check().is_err());
    }

    #[test]
    fn test_check_rejects_empty_text() {
        assert!(Geometry::text("", font(), 0.05).check().is_err());
    }

    #[test]
    fn test_geometry_serialization() {
        let geometry = Geometry::tube(0.2, 0.25, 0.5);
        let serialized = ron::to_string(&geometry).unwrap();
        let deserialized: Geometry = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, geometry);
    }
}
