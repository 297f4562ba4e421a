//! Donut Raster: spinning torus demo
//!
//! Hosts the renderer in a macroquad window:
//! - uploads the software framebuffer as a texture every frame
//! - quits on window close or Escape
//! - paces frames to the configured fps

mod cli;

use clap::Parser;
use cli::Cli;
use donut_raster::donut::{CancelSource, DisplaySink, FrameDriver, FrameLimit};
use donut_raster::{DonutConfig, FrameView, VERSION};
use macroquad::prelude::*;

fn window_conf() -> Conf {
    // Errors are reported from main once logging is up
    let config = Cli::parse().resolve().unwrap_or_default();
    Conf {
        window_title: format!("Donut Raster v{}", VERSION),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Presents frames by streaming them into a GPU texture
struct WindowSink {
    image: Image,
    texture: Texture2D,
}

impl WindowSink {
    fn new(width: u16, height: u16) -> Self {
        let image = Image::gen_image_color(width, height, BLACK);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self { image, texture }
    }
}

impl DisplaySink for WindowSink {
    fn present(&mut self, frame: FrameView<'_>) {
        frame.write_rgba8(&mut self.image.bytes);
        self.texture.update(&self.image);

        // Scale to fit, keeping the square pixels square
        let (sw, sh) = (screen_width(), screen_height());
        let scale = (sw / frame.width as f32).min(sh / frame.height as f32);
        let (dw, dh) = (frame.width as f32 * scale, frame.height as f32 * scale);

        clear_background(BLACK);
        draw_texture_ex(
            &self.texture,
            (sw - dw) / 2.0,
            (sh - dh) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dw, dh)),
                ..Default::default()
            },
        );
    }
}

/// Window close, Escape, or an optional frame budget
struct WindowCancel {
    limit: Option<FrameLimit>,
}

impl CancelSource for WindowCancel {
    fn should_stop(&mut self) -> bool {
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            return true;
        }
        self.limit.as_mut().map_or(false, |limit| limit.should_stop())
    }
}

/// Sleeps off whatever is left of each frame's time slice
struct FramePacer {
    frame_time: f64,
    last: f64,
}

impl FramePacer {
    fn new(fps: u32) -> Self {
        Self {
            frame_time: 1.0 / fps as f64,
            last: get_time(),
        }
    }

    fn wait(&mut self) {
        let elapsed = get_time() - self.last;
        if elapsed < self.frame_time {
            sleep_for(self.frame_time - elapsed);
        }
        self.last = get_time();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn sleep_for(secs: f64) {
    std::thread::sleep(std::time::Duration::from_secs_f64(secs));
}

// The browser drives the loop on wasm; blocking there would stall it
#[cfg(target_arch = "wasm32")]
fn sleep_for(_secs: f64) {}

fn fatal(msg: impl std::fmt::Display) -> ! {
    log::error!("{}", msg);
    eprintln!("donut-raster: {}", msg);
    std::process::exit(1);
}

fn texture_size(config: &DonutConfig) -> (u16, u16) {
    match (u16::try_from(config.width), u16::try_from(config.height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => fatal(format!("viewport {}x{} is too large for a texture", config.width, config.height)),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = donut_raster::log::init_log(cli.log_level.into()) {
        eprintln!("donut-raster: {}", e);
    }

    let config = cli.resolve().unwrap_or_else(|e| fatal(e));
    log::info!("Donut Raster v{}", VERSION);
    log::debug!("config: {}", config.to_ron());

    let (tex_w, tex_h) = texture_size(&config);
    let mut driver = FrameDriver::new(&config).unwrap_or_else(|e| fatal(e));
    let mut sink = WindowSink::new(tex_w, tex_h);
    let mut cancel = WindowCancel {
        limit: cli.frames.map(FrameLimit::new),
    };
    let mut pacer = FramePacer::new(config.fps);

    // Route window close through is_quit_requested so cleanup still runs
    prevent_quit();

    while !cancel.should_stop() {
        driver.step();
        driver.present(&mut sink);
        pacer.wait();
        next_frame().await;
    }

    driver.cleanup();
    log::info!("bye");
}
