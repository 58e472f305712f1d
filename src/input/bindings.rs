//! Maps host input events onto viewport transforms.
//!
//! Bindings hold no view state of their own; the only thing they keep is the
//! depth readout label, which mirrors the last accepted slider value.

use tracing::{debug, warn};

use crate::controllers::interactive::errors::RenderError;
use crate::controllers::interactive::ports::display_surface::DisplaySurface;
use crate::controllers::interactive::ports::render_engine::RenderEngine;
use crate::controllers::interactive::scheduler::RenderScheduler;
use crate::controllers::interactive::viewport::{
    SurfaceGeometry, ViewportController, parse_iteration_depth, wheel_zoom_factor,
};

/// Input as reported by the host, in host (window) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click { client_x: f64, client_y: f64 },
    /// Positive deltas scroll down, i.e. zoom out.
    Wheel { delta_y: f64 },
    SliderChanged { value: f64 },
    /// Depth typed into a text field.
    DepthEntered { text: String },
    ResetView,
}

/// What the host should do with the event after it was handled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventResponse {
    /// The host must not apply its default action (page scroll for wheels).
    pub suppress_default: bool,
    pub view_changed: bool,
    /// Why the event did not change the view, if it was refused.
    pub rejected: Option<RenderError>,
}

impl EventResponse {
    fn changed(suppress_default: bool) -> Self {
        Self {
            suppress_default,
            view_changed: true,
            rejected: None,
        }
    }

    fn unchanged(suppress_default: bool) -> Self {
        Self {
            suppress_default,
            ..Self::default()
        }
    }

    fn rejected(suppress_default: bool, error: RenderError) -> Self {
        Self {
            suppress_default,
            view_changed: false,
            rejected: Some(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputBindings {
    wheel_sensitivity: f64,
    depth_readout: String,
}

impl InputBindings {
    #[must_use]
    pub fn new(wheel_sensitivity: f64, initial_depth: u32) -> Self {
        Self {
            wheel_sensitivity,
            depth_readout: initial_depth.to_string(),
        }
    }

    /// Label text shown next to the depth slider.
    #[must_use]
    pub fn depth_readout(&self) -> &str {
        &self.depth_readout
    }

    #[must_use]
    pub fn wheel_sensitivity(&self) -> f64 {
        self.wheel_sensitivity
    }

    /// Handles one event against a scheduler's view, engine and surface.
    pub fn dispatch_to<E: RenderEngine, S: DisplaySurface>(
        &mut self,
        event: InputEvent,
        scheduler: &mut RenderScheduler<E, S>,
    ) -> EventResponse {
        let (viewport, engine, surface) = scheduler.input_targets();
        self.dispatch(event, viewport, engine, surface)
    }

    pub fn dispatch<E, S>(
        &mut self,
        event: InputEvent,
        viewport: &mut ViewportController,
        engine: &mut E,
        surface: &S,
    ) -> EventResponse
    where
        E: RenderEngine + ?Sized,
        S: DisplaySurface + ?Sized,
    {
        match event {
            InputEvent::Click { client_x, client_y } => {
                let bounds = surface.bounding_box();
                if !bounds.contains(client_x, client_y) {
                    return EventResponse::unchanged(false);
                }

                let geometry = SurfaceGeometry::from_surface(surface.size(), bounds);
                let result =
                    viewport.recenter(client_x - bounds.left, client_y - bounds.top, geometry);
                settle(result.map_err(RenderError::from), false)
            }
            InputEvent::Wheel { delta_y } => {
                let factor = wheel_zoom_factor(delta_y, self.wheel_sensitivity);
                settle(viewport.zoom(factor).map_err(RenderError::from), true)
            }
            InputEvent::SliderChanged { value } => self.apply_depth(value, viewport, engine),
            InputEvent::DepthEntered { text } => match parse_iteration_depth(&text) {
                Ok(value) => self.apply_depth(value, viewport, engine),
                Err(err) => settle(Err(err.into()), false),
            },
            InputEvent::ResetView => {
                let depth = viewport.initial_view().iteration_depth;
                if let Err(err) = engine.set_iteration_depth(depth) {
                    return settle(Err(err.into()), false);
                }

                viewport.reset_view();
                self.depth_readout = depth.to_string();
                settle(Ok(()), false)
            }
        }
    }

    /// The engine sees the depth first; the view and the readout only follow
    /// once it has been accepted.
    fn apply_depth<E: RenderEngine + ?Sized>(
        &mut self,
        value: f64,
        viewport: &mut ViewportController,
        engine: &mut E,
    ) -> EventResponse {
        settle(self.commit_depth(value, viewport, engine), false)
    }

    fn commit_depth<E: RenderEngine + ?Sized>(
        &mut self,
        value: f64,
        viewport: &mut ViewportController,
        engine: &mut E,
    ) -> Result<(), RenderError> {
        let depth = viewport.resolve_iteration_depth(value)?;
        engine.set_iteration_depth(depth)?;

        let applied = viewport.set_iteration_depth(f64::from(depth))?;
        self.depth_readout = applied.to_string();
        Ok(())
    }
}

fn settle(result: Result<(), RenderError>, suppress_default: bool) -> EventResponse {
    match result {
        Ok(()) => EventResponse::changed(suppress_default),
        Err(err) => {
            match &err {
                RenderError::InvalidInput(input_error) => {
                    debug!(error = %input_error, "input ignored");
                }
                other => warn!(error = %other, "input could not be applied"),
            }
            EventResponse::rejected(suppress_default, err)
        }
    }
}
