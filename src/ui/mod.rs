//! UI module for rendering the TUI

mod builder;
mod components;
mod editor;
mod form;
mod layout;
mod login;
mod portfolios;
mod submissions;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Portfolios => portfolios::draw(frame, main_area, app),
        View::Form => form::draw(frame, main_area, app),
        View::Complete => form::draw_complete(frame, main_area),
        View::Login => login::draw(frame, main_area, app),
        View::Submissions => submissions::draw_list(frame, main_area, app),
        View::SubmissionDetail => submissions::draw_detail(frame, main_area, app),
        View::Builder => builder::draw(frame, main_area, app),
        View::BuilderEditor => editor::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Errors overlay everything until dismissed
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count() - 1);
    }
}
