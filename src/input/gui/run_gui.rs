use thiserror::Error;
use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::{ConfigError, ExplorerConfig};
use crate::input::gui::app::GuiApp;
use crate::presenters::pixels::surface::PixelsSurface;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
    #[error("pixels surface error: {0}")]
    Pixels(#[from] pixels::Error),
}

/// Opens the explorer window and runs until it is closed.
///
/// Each redraw is one animation tick; while the scheduler runs, a new redraw
/// is requested as soon as the event queue drains.
pub fn run_gui(config: &ExplorerConfig) -> Result<(), GuiError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title("Fractal Viewport")
            .with_inner_size(LogicalSize::new(
                f64::from(config.plot_width),
                f64::from(config.plot_height),
            ))
            .with_min_inner_size(LogicalSize::new(200.0, 200.0))
            .build(&event_loop)?,
    ));

    let surface = PixelsSurface::new(window, config.plot_size())?;
    let engine = config.build_engine()?;
    let mut scheduler = config.build_scheduler(engine, surface)?;
    scheduler.start();

    let mut app = GuiApp::new(window, &event_loop, scheduler, config.build_bindings());
    let mut redraw_pending = true;

    info!(
        width = config.plot_width,
        height = config.plot_height,
        "explorer window opened"
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == window.id() => {
            if app.handle_window_event(window, event) {
                redraw_pending = true;
            }

            match event {
                WindowEvent::CloseRequested => {
                    app.scheduler.stop();
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    redraw_pending = false;

                    let egui_output = app.update(window);
                    app.egui_state
                        .handle_platform_output(window, egui_output.platform_output.clone());

                    if egui_output
                        .viewport_output
                        .values()
                        .any(|v| v.repaint_delay.is_zero())
                    {
                        redraw_pending = true;
                    }

                    if let Err(err) = app.render(egui_output) {
                        error!(error = %err, "presenting frame failed");
                        elwt.exit();
                    }
                }
                WindowEvent::Resized(size) => {
                    app.resize(size.width, size.height);
                    redraw_pending = true;
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                    let size = window.inner_size();
                    app.resize(size.width, size.height);
                    redraw_pending = true;
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            if redraw_pending || app.scheduler.is_running() {
                window.request_redraw();
            }
        }
        _ => {}
    })?;

    Ok(())
}
