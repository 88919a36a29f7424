use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const KEYS: [(&str, &str); 13] = [
    ("j / k", "move cursor"),
    ("g / G", "top / bottom"),
    ("/", "search name and tags"),
    ("f", "tag filter bar (space toggles, c clears)"),
    ("x", "clear search and tag filters"),
    ("a", "add a tool"),
    ("e", "edit the tool under the cursor"),
    ("d", "delete the tool under the cursor"),
    ("m", "move mode: j/k reorder, Enter confirm, Esc cancel"),
    ("Enter", "confirm"),
    ("Esc", "cancel"),
    ("?", "this help"),
    ("q", "quit"),
];

/// Render the help overlay.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let height = (KEYS.len() + 4) as u16;
    let popup = centered_rect(area, 60, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = vec![Line::default()];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {key:>7}  "),
                Style::default().fg(app.theme.highlight).bg(bg),
            ),
            Span::styled(action, Style::default().fg(app.theme.text).bg(bg)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}
