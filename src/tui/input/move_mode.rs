use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::order::compute_move;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm: one reorder against the order the move started from
        KeyCode::Enter | KeyCode::Char('m') => {
            if let Some(ms) = app.move_state.take() {
                let landed = ms.working.iter().position(|t| t.id == ms.tool_id);
                if let Some(landed) = landed {
                    let target_id = ms.original[landed].id.clone();
                    if target_id != ms.tool_id {
                        if let Err(e) = app.session.reorder(&ms.tool_id, &target_id) {
                            app.set_status(format!("could not save order: {e}"));
                        }
                    }
                    app.cursor = landed;
                }
            }
            app.mode = Mode::Navigate;
        }
        // Cancel: discard the preview
        KeyCode::Esc => {
            if let Some(ms) = app.move_state.take() {
                if let Some(pos) = ms.original.iter().position(|t| t.id == ms.tool_id) {
                    app.cursor = pos;
                }
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Down | KeyCode::Char('j') => step(app, 1),
        KeyCode::Up | KeyCode::Char('k') => step(app, -1),
        KeyCode::Char('g') | KeyCode::Home => to_boundary(app, true),
        KeyCode::Char('G') | KeyCode::End => to_boundary(app, false),
        _ => {}
    }
}

/// Swap the grabbed tool one position up or down in the preview.
fn step(app: &mut App, direction: i32) {
    let Some(ms) = &mut app.move_state else { return };
    let Some(cur) = ms.working.iter().position(|t| t.id == ms.tool_id) else {
        return;
    };
    let len = ms.working.len();
    let new_idx = (cur as i32 + direction).clamp(0, len as i32 - 1) as usize;
    if new_idx == cur {
        return;
    }
    let neighbor_id = ms.working[new_idx].id.clone();
    ms.working = compute_move(std::mem::take(&mut ms.working), &ms.tool_id, &neighbor_id);
    app.cursor = new_idx;
}

/// Send the grabbed tool to the top or bottom of the preview.
fn to_boundary(app: &mut App, to_top: bool) {
    let Some(ms) = &mut app.move_state else { return };
    let len = ms.working.len();
    if len == 0 {
        return;
    }
    let target_idx = if to_top { 0 } else { len - 1 };
    let target_id = ms.working[target_idx].id.clone();
    ms.working = compute_move(std::mem::take(&mut ms.working), &ms.tool_id, &target_id);
    app.cursor = target_idx;
}
