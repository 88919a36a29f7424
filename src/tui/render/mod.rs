mod confirm;
mod dashboard;
mod help_overlay;
mod status_row;
mod tag_bar;
mod tool_form;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::app::{App, Mode};

/// Top-level render: header, tag bar, tool list, status row, overlays.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill the whole screen with the theme background
    let bg = Paragraph::new("").style(Style::default().bg(app.theme.background));
    frame.render_widget(bg, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // tag bar
        Constraint::Min(0),    // tool list
        Constraint::Length(1), // status row
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    tag_bar::render_tag_bar(frame, app, chunks[1]);
    dashboard::render_dashboard(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    if app.mode == Mode::Form {
        tool_form::render_tool_form(frame, app, area);
    }
    if app.mode == Mode::Confirm {
        confirm::render_confirm(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// One-line header: shelf name, signed-in user, tool count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let total = app.session.tools().len();
    let shown = app.visible().len();

    let mut spans = vec![
        Span::styled(
            format!(" [>] {}", app.config.shelf.name),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!("  {}", app.session.owner().unwrap_or("signed out")),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    let counts = if shown == total {
        format!("{total} tools ")
    } else {
        format!("{shown}/{total} tools ")
    };
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let width = area.width as usize;
    let counts_width = counts.chars().count();
    if used + counts_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - counts_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            counts,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Center a popup of the given size within `area`.
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}
