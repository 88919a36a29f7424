use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_tag_filter(app: &mut App, key: KeyEvent) {
    let tags = app.tags();
    if tags.is_empty() {
        app.mode = Mode::Navigate;
        return;
    }
    if app.tag_cursor >= tags.len() {
        app.tag_cursor = tags.len() - 1;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Enter => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.tag_cursor = app.tag_cursor.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.tag_cursor + 1 < tags.len() {
                app.tag_cursor += 1;
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('t') => {
            let tag = tags[app.tag_cursor].clone();
            toggle_tag(app, &tag);
        }
        KeyCode::Char('c') => {
            app.selected_tags.clear();
            app.cursor = 0;
            app.scroll_offset = 0;
        }
        _ => {}
    }
}

/// Toggle a tag in the selected set (AND semantics across the set).
pub(super) fn toggle_tag(app: &mut App, tag: &str) {
    if let Some(pos) = app.selected_tags.iter().position(|t| t == tag) {
        app.selected_tags.remove(pos);
    } else {
        app.selected_tags.push(tag.to_string());
    }
    app.cursor = 0;
    app.scroll_offset = 0;
}
