//! Spinning torus: shape, rotation state, and the frame driver

mod driver;
mod state;
mod torus;

pub use driver::*;
pub use state::*;
pub use torus::*;
