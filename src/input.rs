//! Keyboard handling for the demo window

use macroquad::prelude::*;

use span_raster::app::DemoState;

/// Result of processing input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing that needs the caller's attention
    None,
    /// Save the current frame buffer to disk
    Screenshot,
}

/// Process input and update demo state
pub fn process_input(state: &mut DemoState) -> InputResult {
    if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
        state.quit();
        return InputResult::None;
    }

    if is_key_pressed(KeyCode::Space) {
        state.toggle_pause();
    }
    if is_key_pressed(KeyCode::L) {
        state.toggle_wireframe();
    }

    if is_key_pressed(KeyCode::F12) {
        return InputResult::Screenshot;
    }

    InputResult::None
}
