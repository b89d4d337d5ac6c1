use super::*;

pub(super) fn draw_confirm_dialog(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ConfirmAction::Stop { id, name }) = &app.confirm_action {
        DialogBuilder::new("Confirm")
            .min_width(50)
            .empty_line()
            .message(format!("Stop container '{}'?", name))
            .help(format!("({})", id.short()))
            .empty_line()
            .buttons(app.dialog_focus)
            .empty_line()
            .help("Tab: Switch  Enter: Select  Esc: Cancel")
            .render(frame, area);
    }
}
