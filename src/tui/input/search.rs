use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.commit_search();
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            // Abandon the edit, keep the committed term
            app.search_input = app.search.clone();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            if let Some(boundary) =
                unicode::prev_grapheme_boundary(&app.search_input, app.search_input.len())
            {
                app.search_input.truncate(boundary);
            }
        }
        KeyCode::Char(c)
            if !c.is_control() && !key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
        {
            app.search_input.push(c);
        }
        _ => {}
    }
}
