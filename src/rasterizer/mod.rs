//! Minimal software rasterizer
//!
//! Features:
//! - Packed RGBA8888 framebuffer, row-major, one `u32` per pixel
//! - Clipped point, rectangle and fill primitives
//! - Thick Bresenham lines and midpoint circles
//! - Fused sweep/tilt/spin rotation with a perspective divide

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default viewport dimensions
pub const WIDTH: usize = 600;
pub const HEIGHT: usize = 600;
