//! Declarative layout tables
//!
//! The demo scene is described by data: which primitives ride the carousel
//! and how big they are, and where each camera sits and what it watches.
//! [`SceneBuilder`](super::SceneBuilder) turns these tables into a graph.

use carousel_core::{Camera, FontRef, Geometry, Light, Vec3};
use serde::{Serialize, Deserialize};

/// One of the shapes that can ride the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    ChamferedBox,
    Box,
    Capsule,
    Sphere,
    Tube,
    GeodesicSphere,
    Pyramid,
    Text,
    Plane,
    Cone,
    TruncatedCone,
    Torus,
}

impl PrimitiveKind {
    /// Every primitive in carousel order
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::ChamferedBox,
        PrimitiveKind::Box,
        PrimitiveKind::Capsule,
        PrimitiveKind::Sphere,
        PrimitiveKind::Tube,
        PrimitiveKind::GeodesicSphere,
        PrimitiveKind::Pyramid,
        PrimitiveKind::Text,
        PrimitiveKind::Plane,
        PrimitiveKind::Cone,
        PrimitiveKind::TruncatedCone,
        PrimitiveKind::Torus,
    ];

    /// Node name used for this primitive
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::ChamferedBox => "chamfered_box",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Capsule => "capsule",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Tube => "tube",
            PrimitiveKind::GeodesicSphere => "geodesic_sphere",
            PrimitiveKind::Pyramid => "pyramid",
            PrimitiveKind::Text => "text",
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::TruncatedCone => "truncated_cone",
            PrimitiveKind::Torus => "torus",
        }
    }

    /// Whether this primitive needs a font
    pub fn needs_font(self) -> bool {
        self == PrimitiveKind::Text
    }

    /// Geometry of this primitive for base size `s`
    ///
    /// `font` is only read by [`PrimitiveKind::Text`].
    pub fn geometry(self, s: f32, font: &FontRef) -> Geometry {
        match self {
            PrimitiveKind::ChamferedBox => Geometry::cuboid(s, s, s / 2.0, 0.2),
            PrimitiveKind::Box => Geometry::cuboid(s / 2.0, s, s, 0.0),
            PrimitiveKind::Capsule => Geometry::capsule(s / 4.0, s),
            PrimitiveKind::Sphere => Geometry::sphere(s / 2.0),
            PrimitiveKind::Tube => Geometry::tube(0.4 * s, 0.5 * s, s),
            PrimitiveKind::GeodesicSphere => Geometry::geodesic_sphere(s / 2.0),
            PrimitiveKind::Pyramid => Geometry::pyramid(s / 3.0, s / 5.0, s),
            PrimitiveKind::Text => Geometry::text(PRIMITIVE_TEXT, font.clone(), s / 10.0),
            PrimitiveKind::Plane => Geometry::plane(s, s),
            PrimitiveKind::Cone => Geometry::cone(0.0, s / 4.0, s),
            PrimitiveKind::TruncatedCone => Geometry::cone(s / 6.0, s / 3.0, s),
            PrimitiveKind::Torus => Geometry::torus(s, s / 8.0),
        }
    }
}

/// String extruded by the text primitive
pub const PRIMITIVE_TEXT: &str = "hello";

/// String extruded by the center label
pub const CENTER_TEXT: &str = "center";

/// What a camera keeps in view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraTarget {
    /// The carousel's center
    Carousel,
    /// The last primitive placed on the carousel
    LastPrimitive,
}

/// The three demo cameras
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraRole {
    /// Straight above the carousel center
    Overhead,
    /// Oblique view from a fixed point
    Fixed,
    /// Tracks one primitive and lights it with a shadow-casting spot
    Follow,
}

impl CameraRole {
    /// Cameras in the order they are added to the scene
    pub const ALL: [CameraRole; 3] = [CameraRole::Follow, CameraRole::Overhead, CameraRole::Fixed];

    /// Node name used for this camera
    pub fn name(self) -> &'static str {
        match self {
            CameraRole::Overhead => "overhead_camera",
            CameraRole::Fixed => "fixed_camera",
            CameraRole::Follow => "follow_camera",
        }
    }

    /// Scene-space position for the given layout
    pub fn position(self, params: &SceneParams) -> Vec3 {
        let r = params.carousel_radius();
        match self {
            CameraRole::Overhead => Vec3::new(0.0, params.overhead_height_factor * r, 0.0),
            CameraRole::Fixed => Vec3::new(-r, r, r),
            CameraRole::Follow => Vec3::new(r, r / 2.0, r),
        }
    }

    /// Camera projection for the given layout
    pub fn camera(self, params: &SceneParams) -> Camera {
        match self {
            CameraRole::Overhead | CameraRole::Fixed => Camera::with_fov(params.static_fov),
            CameraRole::Follow => Camera::with_fov(params.follow_fov),
        }
    }

    /// Light carried alongside the camera
    pub fn light(self) -> Option<Light> {
        match self {
            CameraRole::Follow => Some(Light::shadow_spot()),
            CameraRole::Overhead | CameraRole::Fixed => None,
        }
    }

    /// Node this camera looks at
    pub fn target(self) -> CameraTarget {
        match self {
            CameraRole::Overhead | CameraRole::Fixed => CameraTarget::Carousel,
            CameraRole::Follow => CameraTarget::LastPrimitive,
        }
    }
}

/// Layout parameters for the demo scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    /// Base size every primitive is derived from
    pub object_size: f32,
    /// Carousel radius as a multiple of `object_size`
    pub radius_factor: f32,
    /// Seconds per carousel revolution
    pub rotation_period: f32,
    /// Primitives placed around the carousel, in order
    pub primitives: Vec<PrimitiveKind>,
    /// Field of view of the overhead and fixed cameras, in degrees
    pub static_fov: f32,
    /// Field of view of the follow camera, in degrees
    pub follow_fov: f32,
    /// Overhead camera height as a multiple of the carousel radius
    pub overhead_height_factor: f32,
    pub marker_radius: f32,
    pub marker_height: f32,
    pub label_font: String,
    pub label_font_size: f32,
    pub primitive_font: String,
    pub primitive_font_size: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            object_size: 0.5,
            radius_factor: 5.0,
            rotation_period: 20.0,
            primitives: PrimitiveKind::ALL.to_vec(),
            static_fov: 60.0,
            follow_fov: 30.0,
            overhead_height_factor: 3.0,
            marker_radius: 0.1,
            marker_height: 0.2,
            label_font: "Helvetica".to_string(),
            label_font_size: 0.5,
            primitive_font: "Chalkduster".to_string(),
            primitive_font_size: 0.5,
        }
    }
}

impl SceneParams {
    /// Radius of the circle the primitives sit on
    #[inline]
    pub fn carousel_radius(&self) -> f32 {
        self.radius_factor * self.object_size
    }

    /// Cone drawn at each camera so it is visible in the scene
    pub fn camera_marker(&self) -> Geometry {
        Geometry::cone(0.0, self.marker_radius, self.marker_height)
    }

    /// Whether any configured primitive needs the primitive font
    pub fn needs_primitive_font(&self) -> bool {
        self.primitives.iter().any(|p| p.needs_font())
    }
}
