//! Angle helpers and circular layout
//!
//! Objects on the carousel sit at equal angular steps around a circle in the
//! XZ plane. Index `i` of `n` lands at heading `i * 2π / n`.

use std::f32::consts::TAU;

use crate::Vec3;

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Wrap an angle in radians into `[0, 2π)`
#[inline]
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angular step between neighbours on a ring of `count` slots, in radians
///
/// Returns 0 for an empty ring.
#[inline]
pub fn ring_step(count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        TAU / count as f32
    }
}

/// Position of slot `index` on a ring of `count` slots
///
/// The point lies at height 0 in the ring's local frame:
/// `(radius * cos θ, 0, radius * sin θ)` with `θ = index * 2π / count`.
#[inline]
pub fn ring_position(radius: f32, index: usize, count: usize) -> Vec3 {
    let angle = ring_step(count) * index as f32;
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, 0.0, radius * sin)
}

/// All slot positions on a ring of `count` slots, in slot order
pub fn ring_positions(radius: f32, count: usize) -> Vec<Vec3> {
    (0..count).map(|i| ring_position(radius, i, count)).collect()
}
