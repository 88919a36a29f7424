use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(confirm) = app.confirm.take() {
                match app.session.delete(&confirm.tool_id) {
                    Ok(()) => app.set_status(format!("deleted {}", confirm.name)),
                    Err(e) => app.set_status(format!("could not delete: {e}")),
                }
            }
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
