use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{NewTool, ToolPatch};
use crate::ops::tool_ops::{parse_links, parse_tags, validate};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::*;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.form else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.form = None;
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => submit_form(app),
        // Field focus
        (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
            let next = form.field.next();
            form.focus(next);
        }
        (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
            let prev = form.field.prev();
            form.focus(prev);
        }
        // Cursor movement within the focused field
        (_, KeyCode::Left) => {
            if let Some(boundary) = unicode::prev_grapheme_boundary(form.focused(), form.cursor) {
                form.cursor = boundary;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(boundary) = unicode::next_grapheme_boundary(form.focused(), form.cursor) {
                form.cursor = boundary;
            }
        }
        (_, KeyCode::Home) => form.cursor = 0,
        (_, KeyCode::End) => form.cursor = form.focused().len(),
        // Editing
        (_, KeyCode::Backspace) => {
            if let Some(boundary) = unicode::prev_grapheme_boundary(form.focused(), form.cursor) {
                let cursor = form.cursor;
                form.focused_mut().replace_range(boundary..cursor, "");
                form.cursor = boundary;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(boundary) = unicode::next_grapheme_boundary(form.focused(), form.cursor) {
                let cursor = form.cursor;
                form.focused_mut().replace_range(cursor..boundary, "");
            }
        }
        (m, KeyCode::Char(c)) if !c.is_control() && !m.contains(KeyModifiers::CONTROL) => {
            let cursor = form.cursor;
            form.focused_mut().insert(cursor, c);
            form.cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Validate and persist the form. Validation failures keep the form open
/// with the error shown; store failures surface in the status row and the
/// next snapshot settles what actually happened.
fn submit_form(app: &mut App) {
    let Some(form) = &app.form else { return };

    let payload = NewTool {
        name: form.name.clone(),
        links: parse_links(&form.links),
        pr_link: (!form.pr.trim().is_empty()).then(|| form.pr.trim().to_string()),
        tags: parse_tags(&form.tags),
    };

    let fields = match validate(payload) {
        Ok(fields) => fields,
        Err(e) => {
            if let Some(form) = &mut app.form {
                form.error = Some(e.to_string());
            }
            return;
        }
    };

    let editing = form.editing.clone();
    let result = match &editing {
        Some(id) => app.session.update(id, ToolPatch::replace(fields)).map(|_| ()),
        None => app.session.create(fields).map(|_| ()),
    };
    if let Err(e) = result {
        app.set_status(format!("could not save: {e}"));
    }

    app.form = None;
    app.mode = Mode::Navigate;
}
