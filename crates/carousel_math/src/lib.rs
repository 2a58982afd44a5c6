//! Carousel Mathematics Library
//!
//! Small vector and angle toolkit for laying out the carousel scene.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//!
//! ## Layout
//!
//! - [`ring_position`] / [`ring_positions`] - equal-angle slots on a circle
//! - [`rad_to_deg`], [`wrap_angle`] - angle helpers

mod vec3;
pub mod ring;

pub use vec3::Vec3;
pub use ring::{rad_to_deg, ring_position, ring_positions, ring_step, wrap_angle};
