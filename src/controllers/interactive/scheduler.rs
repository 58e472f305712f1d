//! The animation-tick driver.
//!
//! One [`RenderScheduler::tick`] per display refresh: frame statistics are
//! recorded unconditionally, and the view is regenerated and painted only when
//! the viewport is dirty (or on every tick under [`RedrawPolicy::EveryTick`]).
//! Failures are logged and reported in the [`TickOutcome`]; they never stop
//! the loop.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::controllers::interactive::errors::RenderError;
use crate::controllers::interactive::ports::clock::FrameClock;
use crate::controllers::interactive::ports::display_surface::DisplaySurface;
use crate::controllers::interactive::ports::render_engine::{EngineError, RenderEngine};
use crate::controllers::interactive::viewport::ViewportController;
use crate::core::stats::frame_stats::FrameStatsTracker;
use crate::presenters::surface::adapter::DisplaySurfaceAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawPolicy {
    /// Regenerate only after the view changed.
    #[default]
    WhenDirty,
    /// Regenerate on every tick, whether or not anything changed.
    EveryTick,
}

impl RedrawPolicy {
    pub const ALL: &'static [Self] = &[Self::WhenDirty, Self::EveryTick];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::WhenDirty => "when dirty",
            Self::EveryTick => "every tick",
        }
    }
}

impl fmt::Display for RedrawPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for RedrawPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "when-dirty" | "dirty" => Ok(Self::WhenDirty),
            "every-tick" | "always" => Ok(Self::EveryTick),
            other => Err(format!(
                "unknown redraw policy `{other}` (expected when-dirty or every-tick)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The scheduler is stopped; nothing happened.
    Stopped,
    /// Statistics were recorded; the image was already current.
    Idle,
    Painted { generation: u64 },
    /// Regeneration or paint failed; the previous image stays on screen.
    Skipped { generation: u64, error: RenderError },
}

/// Tally of a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: usize,
    pub painted: usize,
    pub skipped: usize,
    pub idle: usize,
}

impl std::ops::AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.ticks += other.ticks;
        self.painted += other.painted;
        self.skipped += other.skipped;
        self.idle += other.idle;
    }
}

impl RunSummary {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Painted { .. } => self.painted += 1,
            TickOutcome::Skipped { .. } => self.skipped += 1,
            TickOutcome::Idle | TickOutcome::Stopped => self.idle += 1,
        }
    }
}

pub struct RenderScheduler<E: RenderEngine, S: DisplaySurface> {
    viewport: ViewportController,
    engine: E,
    display: DisplaySurfaceAdapter<S>,
    stats: FrameStatsTracker,
    policy: RedrawPolicy,
    running: bool,
    generation: u64,
    last_render_duration: Option<Duration>,
    last_error: Option<RenderError>,
}

impl<E: RenderEngine, S: DisplaySurface> RenderScheduler<E, S> {
    /// Builds a stopped scheduler and pushes the viewport's depth to the engine.
    pub fn new(
        viewport: ViewportController,
        mut engine: E,
        display: DisplaySurfaceAdapter<S>,
        stats: FrameStatsTracker,
        policy: RedrawPolicy,
    ) -> Result<Self, RenderError> {
        engine.set_iteration_depth(viewport.view().iteration_depth)?;

        Ok(Self {
            viewport,
            engine,
            display,
            stats,
            policy,
            running: false,
            generation: 0,
            last_render_duration: None,
            last_error: None,
        })
    }

    /// Starts (or restarts) ticking. Statistics restart too, so the pause
    /// does not show up as one very slow frame.
    pub fn start(&mut self) {
        if !self.running {
            info!(policy = %self.policy, "render loop started");
        }
        self.running = true;
        self.stats.reset();
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(generation = self.generation, "render loop stopped");
        }
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs one animation tick observed at `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.running {
            return TickOutcome::Stopped;
        }

        self.stats.record_frame(now);

        if self.policy == RedrawPolicy::WhenDirty && !self.viewport.is_dirty() {
            return TickOutcome::Idle;
        }

        self.generation += 1;
        let generation = self.generation;

        let outcome = match self.render() {
            Ok(elapsed) => {
                debug!(
                    generation,
                    regenerate_ms = elapsed.as_secs_f64() * 1000.0,
                    "painted frame"
                );
                self.last_render_duration = Some(elapsed);
                self.last_error = None;
                TickOutcome::Painted { generation }
            }
            Err(err) => {
                log_failure(generation, &err);
                self.last_error = Some(err.clone());
                TickOutcome::Skipped {
                    generation,
                    error: err,
                }
            }
        };

        // Only after the paint (or its failure) so input arriving before the
        // next tick is never lost.
        self.viewport.mark_clean();
        outcome
    }

    /// Drives `ticks` ticks from `clock`, starting the loop if needed.
    pub fn run_ticks(&mut self, clock: &mut dyn FrameClock, ticks: usize) -> RunSummary {
        if !self.running {
            self.start();
        }

        let mut summary = RunSummary::default();
        for _ in 0..ticks {
            let outcome = self.tick(clock.now());
            summary.record(&outcome);
        }
        summary
    }

    fn render(&mut self) -> Result<Duration, RenderError> {
        let region = self.viewport.region().map_err(EngineError::from)?;

        let started = Instant::now();
        self.engine.regenerate(region)?;
        let elapsed = started.elapsed();

        self.display.paint_from_engine(&self.engine)?;
        Ok(elapsed)
    }

    /// The pieces input handling may touch: the view, the engine's depth
    /// setting and the surface geometry. Nothing here paints.
    pub fn input_targets(&mut self) -> (&mut ViewportController, &mut E, &S) {
        (&mut self.viewport, &mut self.engine, self.display.surface())
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn display(&self) -> &DisplaySurfaceAdapter<S> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplaySurfaceAdapter<S> {
        &mut self.display
    }

    #[must_use]
    pub fn stats(&self) -> &FrameStatsTracker {
        &self.stats
    }

    #[must_use]
    pub fn policy(&self) -> RedrawPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RedrawPolicy) {
        if policy != self.policy {
            debug!(%policy, "redraw policy changed");
        }
        self.policy = policy;
    }

    /// Number of regenerations attempted so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }
}

fn log_failure(generation: u64, err: &RenderError) {
    match err {
        RenderError::BufferSizeMismatch {
            expected, actual, ..
        } => error!(generation, expected, actual, "refusing to paint misshapen buffer"),
        RenderError::Engine(engine_error) => {
            warn!(generation, error = %engine_error, "engine failed, paint skipped");
        }
        RenderError::InvalidInput(input_error) => {
            debug!(generation, error = %input_error, "invalid view, paint skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::ports::clock::FixedStepClock;
    use crate::core::data::complex::Complex;
    use crate::core::data::complex_rect::ComplexRect;
    use crate::core::data::pixel_buffer::PixelBufferView;
    use crate::core::data::view_state::ViewState;
    use crate::controllers::interactive::ports::display_surface::SurfaceSize;
    use crate::presenters::memory::surface::MemorySurface;
    use crate::presenters::surface::strategy::RgbaPaint;

    /// Records every call; fills its buffer with the call count.
    struct RecordingEngine {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
        regenerated: Vec<ComplexRect>,
        depths: Vec<u32>,
        fail_next: Option<EngineError>,
        short_buffer: bool,
    }

    impl RecordingEngine {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                rgba: vec![0; width as usize * height as usize * 4],
                regenerated: Vec::new(),
                depths: Vec::new(),
                fail_next: None,
                short_buffer: false,
            }
        }
    }

    impl RenderEngine for RecordingEngine {
        fn regenerate(&mut self, region: ComplexRect) -> Result<(), EngineError> {
            if let Some(err) = self.fail_next.take() {
                return Err(err);
            }
            self.regenerated.push(region);
            let fill = self.regenerated.len() as u8;
            self.rgba.iter_mut().for_each(|b| *b = fill);
            Ok(())
        }

        fn pixel_buffer(&self) -> PixelBufferView<'_> {
            let data = if self.short_buffer {
                &self.rgba[..self.rgba.len() - 4]
            } else {
                &self.rgba[..]
            };
            PixelBufferView::new(data, self.width, self.height)
        }

        fn set_iteration_depth(&mut self, depth: u32) -> Result<(), EngineError> {
            self.depths.push(depth);
            Ok(())
        }

        fn max_iteration_depth(&self) -> u32 {
            self.depths.last().copied().unwrap_or(100)
        }

        fn depth_limit(&self) -> u32 {
            255
        }
    }

    fn scheduler(policy: RedrawPolicy) -> RenderScheduler<RecordingEngine, MemorySurface> {
        let viewport =
            ViewportController::new(ViewState::default(), Complex::new(4.0, 4.0), 255).unwrap();
        let display = DisplaySurfaceAdapter::new(
            MemorySurface::new(4, 4),
            SurfaceSize {
                width: 4,
                height: 4,
            },
            Box::new(RgbaPaint),
        );

        RenderScheduler::new(
            viewport,
            RecordingEngine::new(4, 4),
            display,
            FrameStatsTracker::new(100),
            policy,
        )
        .unwrap()
    }

    fn clock() -> FixedStepClock {
        FixedStepClock::new(Instant::now(), Duration::from_millis(20))
    }

    #[test]
    fn new_pushes_initial_depth_to_engine() {
        let scheduler = scheduler(RedrawPolicy::WhenDirty);

        assert_eq!(scheduler.engine().depths, vec![100]);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn stopped_scheduler_ignores_ticks() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);

        assert_eq!(scheduler.tick(Instant::now()), TickOutcome::Stopped);
        assert!(scheduler.engine().regenerated.is_empty());
        assert!(scheduler.viewport().is_dirty());
    }

    #[test]
    fn first_tick_regenerates_and_paints_once() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        scheduler.start();

        let outcome = scheduler.tick(Instant::now());

        assert_eq!(outcome, TickOutcome::Painted { generation: 1 });
        assert_eq!(scheduler.engine().regenerated.len(), 1);
        assert_eq!(scheduler.display().surface().draw_count(), 1);
        assert!(!scheduler.viewport().is_dirty());
    }

    #[test]
    fn clean_view_is_not_regenerated() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        let summary = scheduler.run_ticks(&mut clock(), 5);

        assert_eq!(summary.painted, 1);
        assert_eq!(summary.idle, 4);
        assert_eq!(scheduler.engine().regenerated.len(), 1);
        assert_eq!(scheduler.stats().len(), 4);
    }

    #[test]
    fn every_tick_policy_always_regenerates() {
        let mut scheduler = scheduler(RedrawPolicy::EveryTick);
        let summary = scheduler.run_ticks(&mut clock(), 3);

        assert_eq!(summary.painted, 3);
        assert_eq!(scheduler.generation(), 3);
        assert_eq!(scheduler.display().surface().pixels()[0], 3);
    }

    #[test]
    fn input_between_ticks_coalesces_into_one_regeneration() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        let mut clock = clock();
        scheduler.run_ticks(&mut clock, 1);

        {
            let (viewport, _, _) = scheduler.input_targets();
            viewport.zoom(0.5).unwrap();
            viewport.zoom(0.5).unwrap();
        }
        let summary = scheduler.run_ticks(&mut clock, 3);

        assert_eq!(summary.painted, 1);
        let last = scheduler.engine().regenerated.last().copied().unwrap();
        assert!((last.width() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn engine_failure_skips_paint_and_keeps_ticking() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        scheduler.start();
        scheduler.engine.fail_next = Some(EngineError::Render("boom".into()));

        let outcome = scheduler.tick(Instant::now());

        assert!(matches!(
            outcome,
            TickOutcome::Skipped {
                generation: 1,
                error: RenderError::Engine(_)
            }
        ));
        assert_eq!(scheduler.display().surface().draw_count(), 0);
        assert!(!scheduler.viewport().is_dirty());
        assert!(scheduler.last_error().is_some());

        scheduler.input_targets().0.zoom(2.0).unwrap();
        assert_eq!(
            scheduler.tick(Instant::now()),
            TickOutcome::Painted { generation: 2 }
        );
        assert!(scheduler.last_error().is_none());
    }

    #[test]
    fn short_buffer_is_never_painted() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        scheduler.start();
        scheduler.engine.short_buffer = true;

        let outcome = scheduler.tick(Instant::now());

        assert!(matches!(
            outcome,
            TickOutcome::Skipped {
                error: RenderError::BufferSizeMismatch {
                    expected: 64,
                    actual: 60,
                    ..
                },
                ..
            }
        ));
        assert_eq!(scheduler.display().surface().draw_count(), 0);
    }

    #[test]
    fn restart_resets_frame_statistics() {
        let mut scheduler = scheduler(RedrawPolicy::WhenDirty);
        scheduler.run_ticks(&mut clock(), 4);
        scheduler.stop();

        scheduler.start();

        assert!(scheduler.stats().is_empty());
        assert!(scheduler.is_running());
    }

    #[test]
    fn redraw_policy_parses_cli_names() {
        assert_eq!("every-tick".parse::<RedrawPolicy>(), Ok(RedrawPolicy::EveryTick));
        assert_eq!("When-Dirty".parse::<RedrawPolicy>(), Ok(RedrawPolicy::WhenDirty));
        assert!("sometimes".parse::<RedrawPolicy>().is_err());
    }
}
