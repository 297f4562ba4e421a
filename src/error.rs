//! Error type shared by the renderer core and the host

use thiserror::Error;

/// Everything that can go wrong before the first frame is drawn.
///
/// Once a [`crate::donut::FrameDriver`] exists, rendering is infallible:
/// out-of-range pixels are clipped and degenerate projections are culled.
#[derive(Debug, Error)]
pub enum DonutError {
    #[error("framebuffer dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("failed to allocate a {width}x{height} framebuffer")]
    Allocation { width: usize, height: usize },

    #[error("invalid torus: {0}")]
    InvalidTorus(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}
