//! Windowed frontend: winit for the window and input, pixels for the plot
//! framebuffer, egui for the control panel.

mod app;
mod events;
mod run_gui;

pub use run_gui::{GuiError, run_gui};
