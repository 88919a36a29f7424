mod confirm;
mod form;
mod move_mode;
mod navigate;
mod search;
mod tags;

use crossterm::event::KeyEvent;

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use form::*;
#[allow(unused_imports)]
use move_mode::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;
#[allow(unused_imports)]
use tags::*;

/// Route a key press to the active mode's handler.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any key dismisses the help overlay
    if app.show_help {
        app.show_help = false;
        return;
    }
    // A key press consumes the last status message
    app.status_message = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::TagFilter => handle_tag_filter(app, key),
        Mode::Move => handle_move(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}
