//! Rotation state carried from frame to frame

use std::f64::consts::TAU;

use crate::rasterizer::Rotation;

/// Tilt (A) and spin (B) angles plus their per-frame increments.
///
/// Angles are never wrapped. They grow for the life of the run and only
/// ever reach the renderer through sin/cos, which are periodic. They are
/// accumulated in f64: an f32 angle stops resolving a 0.02 rad step after
/// a few hours at 60 fps, while f64 keeps it exact to well under a
/// microradian for centuries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub a: f64,
    pub b: f64,
    pub a_vel: f32,
    pub b_vel: f32,
}

impl RotationState {
    pub fn new(a_vel: f32, b_vel: f32) -> Self {
        Self { a: 0.0, b: 0.0, a_vel, b_vel }
    }

    /// Step one frame. Frame-counted, not time-scaled: wall-clock time
    /// between calls has no effect.
    pub fn advance(&mut self) {
        self.a += self.a_vel as f64;
        self.b += self.b_vel as f64;
    }

    /// Per-frame trig. Angles are reduced to one turn before narrowing to
    /// f32 so the rendered pose stays accurate however long the run.
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.a.rem_euclid(TAU) as f32, self.b.rem_euclid(TAU) as f32)
    }
}
