//! Scene construction utilities
//!
//! This module provides the declarative layout tables and the builder for
//! the carousel demo scene.

mod layout;
mod scene_builder;

pub use layout::{CameraRole, CameraTarget, PrimitiveKind, SceneParams, CENTER_TEXT, PRIMITIVE_TEXT};
pub use scene_builder::{BuildError, DemoScene, SceneBuilder, PALETTE};
