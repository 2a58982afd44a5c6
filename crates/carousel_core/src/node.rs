//! Scene nodes and their payloads
//!
//! A [`SceneNode`] is a point in the scene tree with a position relative to
//! its parent. It may carry geometry, a camera, a light, constraints, and
//! actions. Constraints and actions are declarations only; the host engine
//! evaluates them every frame.

use std::f32::consts::TAU;

use carousel_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::geometry::Geometry;
use crate::graph::{MaterialSetKey, NodeKey};

/// Perspective camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal field of view in degrees
    pub x_fov: f32,
    /// Vertical field of view in degrees
    pub y_fov: f32,
    /// Near clipping plane
    pub z_near: f32,
    /// Far clipping plane
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x_fov: 60.0,
            y_fov: 60.0,
            z_near: 1.0,
            z_far: 100.0,
        }
    }
}

impl Camera {
    /// Create a camera with the same field of view on both axes
    pub fn with_fov(fov_degrees: f32) -> Self {
        Self {
            x_fov: fov_degrees,
            y_fov: fov_degrees,
            ..Self::default()
        }
    }
}

/// Kind of light source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    /// Uniform light from every direction; position is irrelevant
    Ambient,
    /// Cone of light along the node's facing direction
    Spot,
}

/// A light source
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    /// Whether this light casts shadows
    pub casts_shadow: bool,
}

impl Light {
    /// Ambient light
    pub fn ambient() -> Self {
        Self { kind: LightKind::Ambient, casts_shadow: false }
    }

    /// Spot light casting shadows
    pub fn shadow_spot() -> Self {
        Self { kind: LightKind::Spot, casts_shadow: true }
    }
}

/// Orientation constraint solved by the host engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Keep facing the target node
    LookAt { target: NodeKey },
    /// Keep facing the active viewpoint
    Billboard,
}

impl Constraint {
    /// The target node, if this constraint has one
    pub fn target(&self) -> Option<NodeKey> {
        match self {
            Constraint::LookAt { target } => Some(*target),
            Constraint::Billboard => None,
        }
    }
}

/// Animation declared on a node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Rotate by `angle` radians about `axis` over `duration` seconds
    RotateBy { axis: Vec3, angle: f32, duration: f32 },
    /// Repeat the inner action with no end
    RepeatForever(Box<Action>),
}

impl Action {
    /// One full turn about `axis` every `period` seconds, forever
    pub fn spin_forever(axis: Vec3, period: f32) -> Self {
        Action::RepeatForever(Box::new(Action::RotateBy {
            axis: axis.normalized(),
            angle: TAU,
            duration: period,
        }))
    }

    /// Duration of one pass through this action in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Action::RotateBy { duration, .. } => *duration,
            Action::RepeatForever(inner) => inner.duration(),
        }
    }

    /// Whether the action never finishes
    pub fn is_infinite(&self) -> bool {
        matches!(self, Action::RepeatForever(_))
    }

    /// Rotation axis and angular speed in radians per second
    pub fn angular_velocity(&self) -> Option<(Vec3, f32)> {
        match self {
            Action::RotateBy { axis, angle, duration } => {
                if *duration > 0.0 {
                    Some((*axis, angle / duration))
                } else {
                    None
                }
            }
            Action::RepeatForever(inner) => inner.angular_velocity(),
        }
    }

    /// Seconds for one full revolution, if this action rotates
    pub fn revolution_period(&self) -> Option<f32> {
        self.angular_velocity()
            .filter(|(_, speed)| *speed != 0.0)
            .map(|(_, speed)| TAU / speed.abs())
    }
}

/// A node in the scene tree
///
/// Parent and child links are kept by the owning
/// [`SceneGraph`](crate::SceneGraph), not by the node.
#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    /// Optional name for lookup
    pub name: Option<String>,
    /// Position relative to the parent node
    pub position: Vec3,
    /// Shape drawn at this node
    pub geometry: Option<Geometry>,
    /// Ordered materials applied to the geometry
    pub materials: Option<MaterialSetKey>,
    /// Viewpoint carried by this node
    pub camera: Option<Camera>,
    /// Light carried by this node
    pub light: Option<Light>,
    /// Orientation constraints
    pub constraints: Vec<Constraint>,
    /// Animations
    pub actions: Vec<Action>,
}

impl SceneNode {
    /// Create an empty node at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node drawing the given geometry
    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    /// Set the name of this node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the position of this node
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Apply a material set
    pub fn with_materials(mut self, materials: MaterialSetKey) -> Self {
        self.materials = Some(materials);
        self
    }

    /// Attach a camera
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Attach a light
    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    /// Add a constraint
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Add an action
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Look-at target of the first look-at constraint
    pub fn look_at_target(&self) -> Option<NodeKey> {
        self.constraints.iter().find_map(Constraint::target)
    }

    /// Whether the node has a billboard constraint
    pub fn is_billboard(&self) -> bool {
        self.constraints.contains(&Constraint::Billboard)
    }
}
