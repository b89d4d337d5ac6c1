//! Widgets shared by the dashboard views

mod dialog;
mod text_input;

pub use dialog::DialogBuilder;
pub use text_input::TextInputState;
