use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the tag filter bar: every distinct tag as a colored chip.
/// Selected chips render solid; in TagFilter mode the chip under the
/// cursor is underlined.
pub fn render_tag_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let tags = app.tags();

    if tags.is_empty() {
        let hint = Paragraph::new(" no tags").style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(hint, area);
        return;
    }

    let picking = app.mode == Mode::TagFilter;
    let mut spans: Vec<Span> = vec![Span::styled(" ".to_string(), Style::default().bg(bg))];
    let mut used = 1usize;

    for (i, tag) in tags.iter().enumerate() {
        let selected = app.selected_tags.contains(tag);
        let chip = if selected {
            format!("✓{tag} ")
        } else {
            format!("#{tag} ")
        };
        let chip_width = chip.chars().count();

        // Stop with a +n marker when the bar overflows
        if used + chip_width + 6 > width && i + 1 < tags.len() {
            spans.push(Span::styled(
                format!("+{} ", tags.len() - i),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
            break;
        }

        let mut style = if selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.tag_solid(tag))
        } else {
            Style::default().fg(app.theme.tag_color(tag)).bg(bg)
        };
        if picking && i == app.tag_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(chip, style));
        used += chip_width;
    }

    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
