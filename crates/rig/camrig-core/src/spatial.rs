//! Spatial state shared by every writer.
//! All numeric types use f32; rotations are Euler angles in degrees.

use serde::{Deserialize, Serialize};

/// One of the three coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Position + orientation of an object for one tick.
///
/// `rotation` holds Euler angles in degrees, applied Z first, then X, then Y
/// (intrinsic Y-X-Z), which is the convention camera tooling usually exposes
/// in inspectors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialState {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
}

impl SpatialState {
    pub fn new(position: [f32; 3], rotation: [f32; 3]) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            rotation: [0.0; 3],
        }
    }
}

#[inline]
pub fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Componentwise product.
#[inline]
pub fn scale(a: [f32; 3], s: [f32; 3]) -> [f32; 3] {
    [a[0] * s[0], a[1] * s[1], a[2] * s[2]]
}

/// `base + (current - base) * s`, the scaled-offset formula used by the
/// relative proxy and the axis scaler.
#[inline]
pub fn scale_about(base: [f32; 3], current: [f32; 3], s: [f32; 3]) -> [f32; 3] {
    add(base, scale(sub(current, base), s))
}

/// Euler angles (degrees) that point the forward axis (+Z) along `dir`.
/// Returns `None` for a zero-length direction. Roll is always zero.
pub fn look_rotation(dir: [f32; 3]) -> Option<[f32; 3]> {
    let horizontal = (dir[0] * dir[0] + dir[2] * dir[2]).sqrt();
    if horizontal <= f32::EPSILON && dir[1].abs() <= f32::EPSILON {
        return None;
    }
    let yaw = dir[0].atan2(dir[2]).to_degrees();
    // Positive pitch tilts the forward axis downwards.
    let pitch = (-dir[1]).atan2(horizontal).to_degrees();
    Some([pitch, yaw, 0.0])
}
