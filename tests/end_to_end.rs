use std::time::{Duration, Instant};

use fractal_viewport::{
    BoundingBox, Complex, ComplexRect, DisplaySurface, EngineError, ExplorerConfig, FixedStepClock,
    FrameStatsTracker, InputBindings, InputEvent, MandelbrotEngine, MemorySurface,
    PixelBufferView, RenderEngine, RenderScheduler, SurfaceGeometry, TickOutcome, ViewState,
    ViewportController,
};

const EPSILON: f64 = 1e-9;

/// Counts calls and serves a solid buffer of the configured size.
struct CountingEngine {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    regenerations: usize,
    depth_calls: Vec<u32>,
}

impl CountingEngine {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![7; width as usize * height as usize * 4],
            regenerations: 0,
            depth_calls: Vec::new(),
        }
    }
}

impl RenderEngine for CountingEngine {
    fn regenerate(&mut self, _region: ComplexRect) -> Result<(), EngineError> {
        self.regenerations += 1;
        Ok(())
    }

    fn pixel_buffer(&self) -> PixelBufferView<'_> {
        PixelBufferView::new(&self.rgba, self.width, self.height)
    }

    fn set_iteration_depth(&mut self, depth: u32) -> Result<(), EngineError> {
        self.depth_calls.push(depth);
        Ok(())
    }

    fn max_iteration_depth(&self) -> u32 {
        self.depth_calls.last().copied().unwrap_or(100)
    }

    fn depth_limit(&self) -> u32 {
        255
    }
}

fn scheduler_500() -> RenderScheduler<CountingEngine, MemorySurface> {
    let config = ExplorerConfig::default();
    let mut scheduler = config
        .build_scheduler(CountingEngine::new(500, 500), MemorySurface::new(500, 500))
        .unwrap();
    scheduler.start();
    scheduler
}

fn settle(scheduler: &mut RenderScheduler<CountingEngine, MemorySurface>) {
    assert!(matches!(
        scheduler.tick(Instant::now()),
        TickOutcome::Painted { .. }
    ));
}

#[test]
fn first_tick_regenerates_and_paints_exactly_once() {
    let mut scheduler = scheduler_500();
    assert!(scheduler.viewport().is_dirty());

    let outcome = scheduler.tick(Instant::now());

    assert_eq!(outcome, TickOutcome::Painted { generation: 1 });
    assert_eq!(scheduler.engine().regenerations, 1);
    assert_eq!(scheduler.display().surface().draw_count(), 1);
    assert!(!scheduler.viewport().is_dirty());
    assert!(scheduler.display().surface().pixels().iter().all(|&b| b == 7));
}

#[test]
fn wheel_up_by_500_halves_the_zoom() {
    let mut scheduler = scheduler_500();
    let mut bindings = InputBindings::new(1.0, 100);
    settle(&mut scheduler);
    let before = scheduler.viewport().view().zoom;

    let response = bindings.dispatch_to(InputEvent::Wheel { delta_y: -500.0 }, &mut scheduler);

    assert!(response.suppress_default);
    assert!((scheduler.viewport().view().zoom - before * 0.5).abs() < EPSILON);
    assert!(scheduler.viewport().is_dirty());
}

#[test]
fn click_at_surface_centre_keeps_the_centre() {
    let mut scheduler = scheduler_500();
    let mut bindings = InputBindings::new(1.0, 100);
    settle(&mut scheduler);

    bindings.dispatch_to(
        InputEvent::Click {
            client_x: 250.0,
            client_y: 250.0,
        },
        &mut scheduler,
    );

    assert_eq!(scheduler.viewport().view().center, Complex::ZERO);
}

#[test]
fn slider_from_100_to_50_sets_depth_once() {
    let mut scheduler = scheduler_500();
    let mut bindings = InputBindings::new(1.0, 100);
    settle(&mut scheduler);
    assert_eq!(scheduler.engine().depth_calls, vec![100]);

    bindings.dispatch_to(InputEvent::SliderChanged { value: 50.0 }, &mut scheduler);

    assert_eq!(scheduler.engine().depth_calls, vec![100, 50]);
    assert_eq!(bindings.depth_readout(), "50");
    assert!(scheduler.viewport().is_dirty());
}

#[test]
fn dirty_flag_only_returns_after_input() {
    let mut scheduler = scheduler_500();
    let mut bindings = InputBindings::new(1.0, 100);
    let mut clock = FixedStepClock::new(Instant::now(), Duration::from_millis(16));

    let summary = scheduler.run_ticks(&mut clock, 10);
    assert_eq!(summary.painted, 1);
    assert!(!scheduler.viewport().is_dirty());

    bindings.dispatch_to(InputEvent::Wheel { delta_y: 100.0 }, &mut scheduler);
    bindings.dispatch_to(InputEvent::Wheel { delta_y: 100.0 }, &mut scheduler);
    assert!(scheduler.viewport().is_dirty());

    let summary = scheduler.run_ticks(&mut clock, 5);
    assert_eq!(summary.painted, 1);
    assert_eq!(scheduler.engine().regenerations, 2);
}

#[test]
fn recenter_compensates_for_2x_surface_scaling() {
    let view = ViewState::default();
    let span = Complex::new(4.0, 4.0);
    let mut scaled = ViewportController::new(view, span, 255).unwrap();
    let mut unscaled = ViewportController::new(view, span, 255).unwrap();

    scaled
        .recenter(
            100.0,
            100.0,
            SurfaceGeometry {
                surface_width: 1000.0,
                surface_height: 1000.0,
                displayed_width: 500.0,
                displayed_height: 500.0,
            },
        )
        .unwrap();
    unscaled
        .recenter(200.0, 200.0, SurfaceGeometry::unscaled(1000.0, 1000.0))
        .unwrap();

    let a = scaled.view().center;
    let b = unscaled.view().center;
    assert!((a.real - b.real).abs() < EPSILON);
    assert!((a.imag - b.imag).abs() < EPSILON);
}

#[test]
fn zoom_factors_compose_multiplicatively() {
    let span = Complex::new(4.0, 4.0);
    let factors = [(0.5, 3.0), (1.7, 0.2), (0.9, 0.9), (12.0, 0.01)];

    for (f1, f2) in factors {
        let mut stepwise = ViewportController::new(ViewState::default(), span, 255).unwrap();
        let mut combined = ViewportController::new(ViewState::default(), span, 255).unwrap();

        stepwise.zoom(f1).unwrap();
        stepwise.zoom(f2).unwrap();
        combined.zoom(f1 * f2).unwrap();

        assert!((stepwise.view().zoom - combined.view().zoom).abs() < EPSILON);
    }
}

#[test]
fn frame_history_keeps_the_last_100_samples() {
    let mut tracker = FrameStatsTracker::new(100);
    let start = Instant::now();
    let mut now = start;
    tracker.record_frame(now);

    // deltas 1ms, 2ms, ... 150ms
    for step in 1..=150u64 {
        now += Duration::from_millis(step);
        tracker.record_frame(now);
    }

    let samples: Vec<f64> = tracker.samples().collect();
    assert_eq!(samples.len(), 100);
    assert!((samples[0] - 1000.0 / 51.0).abs() < EPSILON);
    assert!((samples[99] - 1000.0 / 150.0).abs() < EPSILON);

    let snapshot = tracker.snapshot().unwrap();
    assert_eq!(snapshot.latest, (1000.0_f64 / 150.0).round() as u64);
}

#[test]
fn mandelbrot_engine_paints_through_the_pipeline() {
    let config = ExplorerConfig {
        plot_width: 32,
        plot_height: 24,
        ..ExplorerConfig::default()
    };
    let engine: MandelbrotEngine = config.build_engine().unwrap();
    let surface = MemorySurface::with_display(
        32,
        24,
        BoundingBox {
            left: 10.0,
            top: 10.0,
            width: 64.0,
            height: 48.0,
        },
    );
    let mut scheduler = config.build_scheduler(engine, surface).unwrap();
    let mut bindings = config.build_bindings();
    let mut clock = FixedStepClock::new(Instant::now(), Duration::from_millis(16));

    scheduler.run_ticks(&mut clock, 2);
    let surface = scheduler.display().surface();
    assert_eq!(surface.draw_count(), 1);
    assert!(surface.pixels().chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(surface.size().width, 32);

    // displayed at 2x: clicking the right edge of the displayed plot moves
    // the centre half a span to the right
    bindings.dispatch_to(
        InputEvent::Click {
            client_x: 10.0 + 64.0 - 1e-9,
            client_y: 10.0 + 24.0,
        },
        &mut scheduler,
    );
    let center = scheduler.viewport().view().center;
    assert!((center.real - 2.0).abs() < 1e-6);
    assert!(center.imag.abs() < 1e-6);

    let summary = scheduler.run_ticks(&mut clock, 1);
    assert_eq!(summary.painted, 1);
}
