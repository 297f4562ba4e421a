//! Command line for the host binary

use clap::{Parser, ValueEnum};
use donut_raster::donut::AngleMode;
use donut_raster::{DonutConfig, DonutError};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AngleModeArg {
    /// Sample index used directly as radians (classic look)
    Raw,
    /// Samples spread evenly over one turn
    Normalized,
}

impl From<AngleModeArg> for AngleMode {
    fn from(arg: AngleModeArg) -> Self {
        match arg {
            AngleModeArg::Raw => AngleMode::Raw,
            AngleModeArg::Normalized => AngleMode::Normalized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "donut-raster", version, about = "Spinning torus on a software rasterizer")]
pub struct Cli {
    /// Inline RON overrides, e.g. "(radius: 150.0, tube_samples: 720)"
    #[arg(long, value_name = "RON")]
    pub config: Option<String>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Target frame rate
    #[arg(long)]
    pub fps: Option<u32>,

    #[arg(long, value_enum)]
    pub angle_mode: Option<AngleModeArg>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Quit after this many frames
    #[arg(long)]
    pub frames: Option<u64>,
}

impl Cli {
    /// Defaults, then `--config`, then the individual flags
    pub fn resolve(&self) -> Result<DonutConfig, DonutError> {
        let mut config = match &self.config {
            Some(ron) => DonutConfig::from_ron(ron)?,
            None => DonutConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(mode) = self.angle_mode {
            config.angle_mode = mode.into();
        }

        Ok(config)
    }
}
