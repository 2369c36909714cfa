//! Reusable UI components

mod button;
mod dialog;
mod field;

pub use button::{render_button, Button, BUTTON_HEIGHT};
pub use dialog::{render_confirm_dialog, render_error_dialog};
pub use field::{draw_field, input_lines, CURSOR};
