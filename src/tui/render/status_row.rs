use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = app.theme.dim;
    let width = area.width as usize;

    // A status message trumps everything for one render cycle
    if let Some(message) = &app.status_message {
        let line = padded(
            vec![Span::styled(
                format!(" {message}"),
                Style::default().fg(app.theme.highlight).bg(bg),
            )],
            "",
            width,
            bg,
            dim,
        );
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let line = match app.mode {
        Mode::Navigate => {
            // Empty in navigate mode; show the active search dimmed
            if !app.search.is_empty() {
                padded(
                    vec![Span::styled(
                        format!("/{}", app.search),
                        Style::default().fg(dim).bg(bg),
                    )],
                    "x clear",
                    width,
                    bg,
                    dim,
                )
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
        Mode::Search => padded(
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ],
            "Enter search  Esc cancel",
            width,
            bg,
            dim,
        ),
        Mode::TagFilter => padded(
            vec![Span::styled(
                " tags".to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            )],
            "h/l move  space toggle  c clear  Esc done",
            width,
            bg,
            dim,
        ),
        Mode::Move => padded(
            vec![Span::styled(
                " move".to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            )],
            "j/k reorder  g/G ends  Enter confirm  Esc cancel",
            width,
            bg,
            dim,
        ),
        // The form and confirm popups carry their own hints
        Mode::Form | Mode::Confirm => {
            Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Left content padded out to `width`, with a dim right-aligned hint.
fn padded(
    mut spans: Vec<Span<'static>>,
    hint: &'static str,
    width: usize,
    bg: Color,
    dim: Color,
) -> Line<'static> {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        if !hint.is_empty() {
            spans.push(Span::styled(hint, Style::default().fg(dim).bg(bg)));
        }
    }
    Line::from(spans)
}
