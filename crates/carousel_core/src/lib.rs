//! Core types for the carousel scene
//!
//! This crate provides the scene-graph data model consumed by a host
//! renderer:
//!
//! - [`SceneGraph`] - Tree of nodes plus shared materials
//! - [`SceneNode`] - A node with position, geometry, camera, light, constraints
//! - [`Geometry`] - Primitive shape parameters
//! - [`Material`] / [`Color`] - Surface appearance
//! - [`Camera`], [`Light`], [`Constraint`], [`Action`] - Node payloads
//! - [`FontLibrary`] - Available font families for extruded text
//! - [`SceneValidator`] - Structural checks before hand-off
//! - [`SceneDocument`] - RON snapshot of a graph

mod asset_error;
mod font;
mod material;
mod geometry;
mod node;
mod graph;
mod scene_file;
mod scene_validator;

pub use asset_error::AssetError;
pub use font::{FontLibrary, FontRef};
pub use material::{Color, Material};
pub use geometry::Geometry;
pub use node::{Action, Camera, Constraint, Light, LightKind, SceneNode};
pub use graph::{GraphError, MaterialKey, MaterialSetKey, NodeKey, SceneGraph};
pub use scene_file::{ConstraintRecord, NodeRecord, SceneDocument, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};

// Re-export commonly used types from carousel_math for convenience
pub use carousel_math::Vec3;
