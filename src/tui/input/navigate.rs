use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmState, FormState, Mode, MoveState};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }
        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => {
            let len = app.visible().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
            let len = app.visible().len();
            app.cursor = len.saturating_sub(1);
        }
        // Search
        (_, KeyCode::Char('/')) => {
            app.search_input = app.search.clone();
            app.mode = Mode::Search;
        }
        // Tag filter bar
        (_, KeyCode::Char('f')) => {
            if app.tags().is_empty() {
                app.set_status("no tags yet; add tags to tools first");
            } else {
                app.tag_cursor = 0;
                app.mode = Mode::TagFilter;
            }
        }
        // Clear filters
        (_, KeyCode::Char('x')) => {
            app.search.clear();
            app.search_input.clear();
            app.selected_tags.clear();
            app.cursor = 0;
            app.scroll_offset = 0;
        }
        // Add / edit / delete
        (_, KeyCode::Char('a')) => {
            app.form = Some(FormState::blank());
            app.mode = Mode::Form;
        }
        (_, KeyCode::Char('e')) => {
            if let Some(id) = app.cursor_tool_id()
                && let Some(tool) = app.session.tools().iter().find(|t| t.id == id)
            {
                app.form = Some(FormState::for_tool(tool));
                app.mode = Mode::Form;
            }
        }
        (_, KeyCode::Char('d')) => {
            if let Some(id) = app.cursor_tool_id()
                && let Some(tool) = app.session.tools().iter().find(|t| t.id == id)
            {
                app.confirm = Some(ConfirmState {
                    tool_id: tool.id.clone(),
                    name: tool.name.clone(),
                });
                app.mode = Mode::Confirm;
            }
        }
        // Reorder
        (_, KeyCode::Char('m')) => enter_move_mode(app),
        _ => {}
    }
}

/// Enter MOVE mode for the tool under the cursor. Reordering is over the
/// whole shelf, so it is only offered when no filter narrows the view;
/// otherwise ranks written against the filtered subset would scramble
/// the hidden tools.
pub(super) fn enter_move_mode(app: &mut App) {
    if app.filters_active() {
        app.set_status("clear search/tags before reordering (x)");
        return;
    }
    let tools = app.session.tools().to_vec();
    if tools.len() < 2 {
        return;
    }
    let Some(tool_id) = app.cursor_tool_id() else {
        return;
    };
    app.move_state = Some(MoveState {
        tool_id,
        original: tools.clone(),
        working: tools,
    });
    app.mode = Mode::Move;
}
