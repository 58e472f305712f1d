//! Input adapters: host events and command-line options.

pub mod bindings;
pub mod cli;
#[cfg(feature = "gui")]
pub mod gui;
