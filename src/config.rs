//! Startup configuration
//!
//! Uses RON (Rusty Object Notation) for overrides passed inline on the
//! command line, e.g. `--config "(radius: 150.0, tube_samples: 720)"`.
//! Missing fields keep their defaults. Nothing is read from disk.

use serde::{Deserialize, Serialize};

use crate::donut::{AngleMode, TorusSpec};
use crate::error::DonutError;
use crate::rasterizer::{Color, RenderSettings, HEIGHT, WIDTH};

/// Everything fixed for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DonutConfig {
    pub width: usize,
    pub height: usize,
    /// Host-side frame pacing only; never reaches the renderer
    pub fps: u32,
    /// Distance from the torus center to the middle of the tube
    pub radius: f32,
    /// Radius of the tube
    pub tube_width: f32,
    pub tube_samples: u32,
    pub sweep_samples: u32,
    /// Radians added to the tilt angle (A) every frame
    pub tilt_velocity: f32,
    /// Radians added to the spin angle (B) every frame
    pub spin_velocity: f32,
    /// Camera standoff (K2)
    pub camera_distance: f32,
    pub angle_mode: AngleMode,
    /// Packed 0xRRGGBBAA
    pub background: u32,
    /// Packed 0xRRGGBBAA
    pub foreground: u32,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fps: 60,
            radius: 200.0,
            tube_width: 100.0,
            tube_samples: 360,
            sweep_samples: 360,
            tilt_velocity: 0.02,
            spin_velocity: 0.02,
            camera_distance: 800.0,
            angle_mode: AngleMode::Raw,
            background: Color::WHITE.to_u32(),
            foreground: Color::BLACK.to_u32(),
        }
    }
}

impl DonutConfig {
    /// Parse a RON struct; absent fields fall back to [`Default`]
    pub fn from_ron(s: &str) -> Result<Self, DonutError> {
        let config: DonutConfig = ron::from_str(s)?;
        Ok(config)
    }

    /// Single-line RON, suitable for logging or pasting back into `--config`
    pub fn to_ron(&self) -> String {
        ron::to_string(self).unwrap_or_else(|e| format!("<unserializable config: {}>", e))
    }

    /// Check the values that the torus and framebuffer constructors don't
    pub fn validate(&self) -> Result<(), DonutError> {
        if self.fps == 0 {
            return Err(DonutError::InvalidConfig("fps must be positive".to_string()));
        }
        if !self.tilt_velocity.is_finite() || !self.spin_velocity.is_finite() {
            return Err(DonutError::InvalidConfig(format!(
                "angular velocities must be finite, got {} and {}",
                self.tilt_velocity, self.spin_velocity
            )));
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return Err(DonutError::InvalidConfig(format!(
                "camera distance must be positive, got {}",
                self.camera_distance
            )));
        }
        Ok(())
    }

    pub fn torus_spec(&self) -> Result<TorusSpec, DonutError> {
        TorusSpec::new(
            self.radius,
            self.tube_width,
            self.tube_samples,
            self.sweep_samples,
            self.angle_mode,
        )
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            camera_distance: self.camera_distance,
            background: Color::from_u32(self.background),
            foreground: Color::from_u32(self.foreground),
        }
    }
}
