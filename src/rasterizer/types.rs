//! Core types for the rasterizer

use super::{HEIGHT, WIDTH};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack from `0xRRGGBBAA`
    pub fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Pack as `0xRRGGBBAA` (the framebuffer's storage format)
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
    }

    /// Convert to [u8; 4] for texture upload
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Per-run rendering settings, fixed once the driver is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Viewport width in pixels
    pub width: usize,
    /// Viewport height in pixels
    pub height: usize,
    /// Camera standoff along the view axis (K2)
    pub camera_distance: f32,
    /// Clear color at the start of every frame
    pub background: Color,
    /// Color of every plotted surface sample
    pub foreground: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            camera_distance: 800.0,
            background: Color::WHITE,
            foreground: Color::BLACK,
        }
    }
}
