//! Per-frame orchestration: sample, rotate, project, plot, present

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::state::RotationState;
use super::torus::TorusSpec;
use crate::config::DonutConfig;
use crate::error::DonutError;
use crate::rasterizer::{FrameView, Framebuffer, Point2, Projection, RenderSettings, Sweep};

/// Receives each finished frame. Implemented by the host.
pub trait DisplaySink {
    fn present(&mut self, frame: FrameView<'_>);
}

/// Polled once before every frame; `true` ends the run.
pub trait CancelSource {
    fn should_stop(&mut self) -> bool;
}

/// Stops after a fixed number of frames
#[derive(Debug, Clone, Copy)]
pub struct FrameLimit {
    remaining: u64,
}

impl FrameLimit {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl CancelSource for FrameLimit {
    fn should_stop(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Shareable stop flag, e.g. flipped from a signal handler
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl CancelSource for CancelFlag {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    /// Samples that projected to a screen coordinate (on or off surface)
    pub plotted: usize,
    /// Samples dropped by the depth guard
    pub culled: usize,
}

fn projection_for(spec: &TorusSpec, settings: &RenderSettings) -> Projection {
    Projection::new(settings.width, settings.height, settings.camera_distance, spec.extent())
}

/// Visit every projected surface sample for one pose, theta-major.
/// Returns how many samples the depth guard culled.
fn for_each_point(
    spec: &TorusSpec,
    state: &RotationState,
    projection: &Projection,
    mut plot: impl FnMut(Point2),
) -> usize {
    let rotation = state.rotation();
    let sweeps: Vec<Sweep> = (0..spec.sweep_samples())
        .map(|phi| Sweep::new(spec.sweep_angle(phi)))
        .collect();

    let mut culled = 0;
    for theta in 0..spec.tube_samples() {
        let local = spec.sample(theta);
        for &sweep in &sweeps {
            match projection.project_local(local, &rotation, sweep) {
                Some(p) => plot(p),
                None => culled += 1,
            }
        }
    }
    culled
}

/// Clear `fb` and draw one frame of the torus at `state`.
///
/// Pure with respect to its inputs: the same spec, state and settings
/// always produce the same pixels. Does not advance `state`. The viewport
/// comes from `settings`, exactly as in [`project_points`]; a buffer of any
/// other size just clips that frame.
pub fn render_into(
    fb: &mut Framebuffer,
    spec: &TorusSpec,
    state: &RotationState,
    settings: &RenderSettings,
) -> FrameStats {
    let projection = projection_for(spec, settings);
    fb.fill(settings.background);

    let mut plotted = 0;
    let culled = for_each_point(spec, state, &projection, |p| {
        fb.put_point(p.x, p.y, settings.foreground);
        plotted += 1;
    });

    FrameStats { frame: 0, plotted, culled }
}

/// Allocate a framebuffer sized by `settings` and render one frame into it
pub fn render_frame(
    spec: &TorusSpec,
    state: &RotationState,
    settings: &RenderSettings,
) -> Result<Framebuffer, DonutError> {
    let mut fb = Framebuffer::new(settings.width, settings.height)?;
    render_into(&mut fb, spec, state, settings);
    Ok(fb)
}

/// Every screen point one frame would plot, in draw order
pub fn project_points(spec: &TorusSpec, state: &RotationState, settings: &RenderSettings) -> Vec<Point2> {
    let projection = projection_for(spec, settings);
    let mut points =
        Vec::with_capacity(spec.tube_samples() as usize * spec.sweep_samples() as usize);
    for_each_point(spec, state, &projection, |p| points.push(p));
    points
}

/// Owns the framebuffer and rotation state for a run
pub struct FrameDriver {
    spec: TorusSpec,
    state: RotationState,
    settings: RenderSettings,
    framebuffer: Framebuffer,
    frames: u64,
}

impl FrameDriver {
    pub fn new(config: &DonutConfig) -> Result<Self, DonutError> {
        config.validate()?;
        let spec = config.torus_spec()?;
        let settings = config.render_settings();
        let state = RotationState::new(config.tilt_velocity, config.spin_velocity);
        Self::with_parts(spec, state, settings)
    }

    pub fn with_parts(
        spec: TorusSpec,
        state: RotationState,
        settings: RenderSettings,
    ) -> Result<Self, DonutError> {
        let framebuffer = Framebuffer::new(settings.width, settings.height)?;
        log::debug!(
            "driver ready: R={} w={} samples={}x{} K2={}",
            spec.radius(),
            spec.tube_width(),
            spec.tube_samples(),
            spec.sweep_samples(),
            settings.camera_distance
        );
        Ok(Self {
            spec,
            state,
            settings,
            framebuffer,
            frames: 0,
        })
    }

    pub fn spec(&self) -> &TorusSpec {
        &self.spec
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render the current pose, then advance the angles by one frame
    pub fn step(&mut self) -> FrameStats {
        let mut stats = render_into(&mut self.framebuffer, &self.spec, &self.state, &self.settings);
        self.state.advance();
        self.frames += 1;
        stats.frame = self.frames;

        if stats.culled > 0 {
            log::warn!("frame {}: {} samples behind the camera", stats.frame, stats.culled);
        }
        log::trace!("frame {}: {} points", stats.frame, stats.plotted);
        stats
    }

    /// Hand the last rendered frame to `sink`. The buffer stays borrowed
    /// until `present` returns, so the sink never sees a half-drawn frame.
    pub fn present<S: DisplaySink + ?Sized>(&self, sink: &mut S) {
        sink.present(self.framebuffer.view());
    }

    /// Step and present until `cancel` asks to stop. Returns frames drawn.
    pub fn run<S, C>(&mut self, sink: &mut S, cancel: &mut C) -> u64
    where
        S: DisplaySink + ?Sized,
        C: CancelSource + ?Sized,
    {
        let start = self.frames;
        while !cancel.should_stop() {
            self.step();
            self.present(sink);
        }
        self.frames - start
    }

    /// Release the framebuffer
    pub fn cleanup(self) {
        log::info!("rendered {} frames", self.frames);
        self.framebuffer.cleanup();
    }
}
