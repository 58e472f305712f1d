//! Headless runner: drives the render loop against an in-memory surface and
//! reports frame statistics.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fractal_viewport::{
    ExplorerArgs, ExplorerConfig, InputEvent, MemorySurface, SystemClock,
    WHEEL_DELTA_SCALE,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ExplorerArgs::parse();
    let config = ExplorerConfig::try_from(&args)?;

    let engine = config.build_engine()?;
    let surface = MemorySurface::new(config.plot_width, config.plot_height);
    let mut scheduler = config.build_scheduler(engine, surface)?;
    let mut bindings = config.build_bindings();
    let mut clock = SystemClock;

    let mut summary = scheduler.run_ticks(&mut clock, 1);
    for &factor in &args.zoom_script {
        // replay each factor as the wheel movement that produces it
        let delta_y = (factor - 1.0) * WHEEL_DELTA_SCALE / bindings.wheel_sensitivity();
        bindings.dispatch_to(InputEvent::Wheel { delta_y }, &mut scheduler);
        summary += scheduler.run_ticks(&mut clock, 1);
    }

    let remaining = args.ticks.saturating_sub(summary.ticks);
    summary += scheduler.run_ticks(&mut clock, remaining);

    let view = scheduler.viewport().view();
    info!(
        ticks = summary.ticks,
        painted = summary.painted,
        skipped = summary.skipped,
        idle = summary.idle,
        center_re = view.center.real,
        center_im = view.center.imag,
        zoom = view.zoom,
        depth = view.iteration_depth,
        "headless run finished"
    );
    if let Some(snapshot) = scheduler.stats().snapshot() {
        info!("{snapshot}");
    }

    scheduler.stop();
    Ok(())
}
