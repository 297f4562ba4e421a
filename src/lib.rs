//! Donut Raster: a spinning torus on a hand-written software rasterizer
//!
//! The library is backend-agnostic:
//! - [`donut`] samples the torus, advances its rotation, and drives frames
//! - [`rasterizer`] owns the pixel buffer and the drawing primitives
//! - [`config`] describes a run and parses inline RON overrides
//!
//! Window creation and presentation live in the `donut-raster` binary.

pub mod config;
pub mod donut;
pub mod error;
pub mod log;
pub mod rasterizer;

pub use config::DonutConfig;
pub use donut::{render_frame, CancelSource, DisplaySink, FrameDriver, RotationState, TorusSpec};
pub use error::DonutError;
pub use rasterizer::{Color, Framebuffer, FrameView};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
