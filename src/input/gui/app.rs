use std::time::Instant;

use egui::Context;
use egui_winit::State as EguiWinitState;
use tracing::warn;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::adapters::engine::mandelbrot::MandelbrotEngine;
use crate::controllers::interactive::scheduler::{RedrawPolicy, RenderScheduler, TickOutcome};
use crate::input::bindings::{InputBindings, InputEvent};
use crate::input::gui::events::{key_event, wheel_event};
use crate::presenters::pixels::surface::PixelsSurface;

pub type GuiScheduler = RenderScheduler<MandelbrotEngine, PixelsSurface>;

/// Window-side state: the scheduler, the bindings and the egui overlay.
pub struct GuiApp {
    pub scheduler: GuiScheduler,
    bindings: InputBindings,
    cursor: Option<(f64, f64)>,
    slider_depth: u32,
    depth_text: String,
    last_message: Option<String>,
    pub egui_ctx: Context,
    pub egui_state: EguiWinitState,
}

impl GuiApp {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<()>,
        scheduler: GuiScheduler,
        bindings: InputBindings,
    ) -> Self {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None,
        );
        let slider_depth = scheduler.viewport().view().iteration_depth;

        Self {
            scheduler,
            depth_text: bindings.depth_readout().to_owned(),
            bindings,
            cursor: None,
            slider_depth,
            last_message: None,
            egui_ctx,
            egui_state,
        }
    }

    /// Feeds the event to egui, then to the bindings unless egui used it.
    /// Returns whether egui wants a repaint.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);

        if let WindowEvent::CursorMoved { position, .. } = event {
            self.cursor = Some((position.x, position.y));
        }
        if response.consumed {
            return response.repaint;
        }

        let input = match event {
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.cursor.map(|(client_x, client_y)| InputEvent::Click {
                client_x,
                client_y,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(wheel_event(*delta)),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !self.egui_ctx.wants_keyboard_input() =>
            {
                key_event(&event.logical_key)
            }
            _ => None,
        };

        if let Some(input) = input {
            self.dispatch(input);
        }
        response.repaint
    }

    fn dispatch(&mut self, event: InputEvent) {
        let response = self.bindings.dispatch_to(event, &mut self.scheduler);

        self.last_message = response.rejected.map(|err| err.to_string());
        self.slider_depth = self.scheduler.viewport().view().iteration_depth;
        self.depth_text = self.bindings.depth_readout().to_owned();
    }

    /// One animation tick: builds the overlay, applies what it produced and
    /// lets the scheduler repaint if the view changed.
    pub fn update(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let mut pending = Vec::new();
        let mut policy = self.scheduler.policy();
        let mut running = self.scheduler.is_running();

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Viewport")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 260.0])
                .show(ctx, |ui| {
                    let limit = self.scheduler.viewport().depth_limit();

                    ui.horizontal(|ui| {
                        ui.label("Iteration depth:");
                        let slider = ui.add(
                            egui::Slider::new(&mut self.slider_depth, 1..=limit).show_value(false),
                        );
                        if slider.changed() {
                            pending.push(InputEvent::SliderChanged {
                                value: f64::from(self.slider_depth),
                            });
                        }
                        ui.label(self.bindings.depth_readout());
                    });

                    ui.horizontal(|ui| {
                        ui.label("Set depth:");
                        let field = ui.add(
                            egui::TextEdit::singleline(&mut self.depth_text).desired_width(60.0),
                        );
                        if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            pending.push(InputEvent::DepthEntered {
                                text: self.depth_text.clone(),
                            });
                        }
                    });

                    ui.separator();
                    let view = self.scheduler.viewport().view();
                    ui.label(format!("Center: {:.6} {:+.6}i", view.center.real, view.center.imag));
                    ui.label(format!("Zoom: {:.3e}", view.zoom));
                    if ui.button("Reset view (R)").clicked() {
                        pending.push(InputEvent::ResetView);
                    }

                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("Redraw:");
                        for &option in RedrawPolicy::ALL {
                            ui.radio_value(&mut policy, option, option.display_name());
                        }
                    });
                    ui.checkbox(&mut running, "Running");

                    ui.separator();
                    match self.scheduler.stats().snapshot() {
                        Some(snapshot) => ui.monospace(snapshot.to_string()),
                        None => ui.monospace("Frames per Second:\n(waiting for frames)"),
                    };
                    ui.label(format!("Generation: {}", self.scheduler.generation()));
                    if let Some(duration) = self.scheduler.last_render_duration() {
                        ui.label(format!("Last render: {} ms", duration.as_millis()));
                    }
                    if let Some(message) = &self.last_message {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        });

        for event in pending {
            self.dispatch(event);
        }
        self.scheduler.set_policy(policy);
        if running && !self.scheduler.is_running() {
            self.scheduler.start();
        } else if !running && self.scheduler.is_running() {
            self.scheduler.stop();
        }

        if let TickOutcome::Skipped { error, .. } = self.scheduler.tick(Instant::now()) {
            self.last_message = Some(error.to_string());
        }

        output
    }

    pub fn render(&mut self, egui_output: egui::FullOutput) -> Result<(), pixels::Error> {
        self.scheduler
            .display_mut()
            .surface_mut()
            .render(egui_output, &self.egui_ctx)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.scheduler.display_mut().surface_mut().resize(width, height) {
            warn!(width, height, error = %err, "surface resize failed");
        }
    }
}
