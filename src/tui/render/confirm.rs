use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::centered_rect;

/// Render the delete confirmation popup.
pub fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else { return };

    let bg = app.theme.background;
    let popup = centered_rect(area, 44, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let name = truncate_to_width(&confirm.name, inner.width.saturating_sub(12) as usize);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Delete ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled(
                name,
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(app.theme.text).bg(bg)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            " y delete   n / Esc cancel",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}
