//! Carousel - procedural demo scene
//!
//! Builds a rotating carousel of primitive shapes with cameras, lights, and
//! shared materials, ready to hand to a host renderer.

pub mod config;
pub mod scene;
