//! Translation of winit input into [`InputEvent`]s.

use winit::event::MouseScrollDelta;
use winit::keyboard::Key;

use crate::input::bindings::InputEvent;

/// Wheel delta of one scroll "line", in the pixel units the zoom factor
/// expects.
pub const LINE_DELTA: f64 = 100.0;

/// Converts a winit scroll into a wheel event whose positive `delta_y`
/// means scrolling down (zooming out).
#[must_use]
pub fn wheel_event(delta: MouseScrollDelta) -> InputEvent {
    let delta_y = match delta {
        MouseScrollDelta::LineDelta(_, lines) => -f64::from(lines) * LINE_DELTA,
        MouseScrollDelta::PixelDelta(position) => -position.y,
    };

    InputEvent::Wheel { delta_y }
}

/// Keyboard shortcuts that map onto view commands.
#[must_use]
pub fn key_event(key: &Key) -> Option<InputEvent> {
    match key {
        Key::Character(text) if text.eq_ignore_ascii_case("r") => Some(InputEvent::ResetView),
        _ => None,
    }
}
