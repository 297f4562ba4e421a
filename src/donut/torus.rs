//! Torus surface sampling

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::DonutError;
use crate::rasterizer::Vec3;

/// How an integer sample index becomes an angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleMode {
    /// The index itself is the angle in radians. Consecutive samples land
    /// about 57 degrees apart and wrap around the circle many times, which
    /// gives the classic scattered-dot donut.
    #[default]
    Raw,
    /// `index * 2π / count`: evenly spaced samples covering one turn.
    Normalized,
}

impl AngleMode {
    pub fn angle(self, index: u32, count: u32) -> f32 {
        match self {
            AngleMode::Raw => index as f32,
            AngleMode::Normalized => index as f32 * TAU / count as f32,
        }
    }
}

/// Shape of the torus, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusSpec {
    radius: f32,
    tube_width: f32,
    tube_samples: u32,
    sweep_samples: u32,
    angle_mode: AngleMode,
}

impl TorusSpec {
    /// `radius` is the distance from the torus center to the middle of the
    /// tube; `tube_width` is the radius of the tube itself.
    pub fn new(
        radius: f32,
        tube_width: f32,
        tube_samples: u32,
        sweep_samples: u32,
        angle_mode: AngleMode,
    ) -> Result<Self, DonutError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DonutError::InvalidTorus(format!("radius must be positive, got {}", radius)));
        }
        if !(tube_width.is_finite() && tube_width > 0.0) {
            return Err(DonutError::InvalidTorus(format!(
                "tube width must be positive, got {}",
                tube_width
            )));
        }
        if tube_samples == 0 || sweep_samples == 0 {
            return Err(DonutError::InvalidTorus(format!(
                "sample counts must be positive, got {}x{}",
                tube_samples, sweep_samples
            )));
        }

        Ok(Self {
            radius,
            tube_width,
            tube_samples,
            sweep_samples,
            angle_mode,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tube_width(&self) -> f32 {
        self.tube_width
    }

    pub fn tube_samples(&self) -> u32 {
        self.tube_samples
    }

    pub fn sweep_samples(&self) -> u32 {
        self.sweep_samples
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Farthest distance of any surface point from the torus center
    pub fn extent(&self) -> f32 {
        self.radius + self.tube_width
    }

    /// Point on the tube cross-section for tube index `theta`, in the
    /// torus' local frame (z = 0 plane, before the sweep rotation)
    pub fn sample(&self, theta: u32) -> Vec3 {
        let angle = self.angle_mode.angle(theta, self.tube_samples);
        Vec3::new(
            self.radius + self.tube_width * angle.cos(),
            self.tube_width * angle.sin(),
            0.0,
        )
    }

    /// Angle of sweep index `phi` around the ring axis
    pub fn sweep_angle(&self, phi: u32) -> f32 {
        self.angle_mode.angle(phi, self.sweep_samples)
    }
}
