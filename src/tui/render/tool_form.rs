use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};
use crate::util::unicode::{display_width, prev_grapheme_boundary, truncate_to_width};

use super::centered_rect;

const FIELDS: [(FormField, &str); 4] = [
    (FormField::Name, "Name"),
    (FormField::Links, "Links"),
    (FormField::Pr, "PR"),
    (FormField::Tags, "Tags"),
];

/// Render the add/edit form popup.
pub fn render_tool_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else { return };

    let bg = app.theme.background;
    let popup = centered_rect(area, 58, 13);
    frame.render_widget(Clear, popup);

    let title = match &form.editing {
        Some(id) => format!(" Edit {id} "),
        None => " Add Tool ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let inner_w = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::default());

    for (field, label) in FIELDS {
        let focused = form.field == field;
        let value = match field {
            FormField::Name => &form.name,
            FormField::Links => &form.links,
            FormField::Pr => &form.pr,
            FormField::Tags => &form.tags,
        };

        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let value_style = Style::default().fg(app.theme.text_bright).bg(bg);

        let mut spans = vec![Span::styled(format!(" {label:<6}"), label_style)];
        let budget = inner_w.saturating_sub(9);
        if focused {
            let (before, after) = cursor_window(value, form.cursor, budget);
            spans.push(Span::styled(before, value_style));
            spans.push(Span::styled(
                "\u{258C}".to_string(),
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            spans.push(Span::styled(after, value_style));
        } else {
            spans.push(Span::styled(truncate_to_width(value, budget), value_style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        " links: url or label|url, comma separated".to_string(),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " Enter save   Tab next field   Esc cancel".to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}

/// The slice of `value` to show around the cursor within `budget` cells:
/// up to budget-1 cells ending at the cursor, then whatever fits after.
fn cursor_window(value: &str, cursor: usize, budget: usize) -> (String, String) {
    let cursor = cursor.min(value.len());
    let head_budget = budget.saturating_sub(1);

    let mut start = cursor;
    let mut width = 0;
    while let Some(prev) = prev_grapheme_boundary(value, start) {
        let w = display_width(&value[prev..start]);
        if width + w > head_budget {
            break;
        }
        start = prev;
        width += w;
    }

    let before = value[start..cursor].to_string();
    let after = truncate_to_width(&value[cursor..], head_budget.saturating_sub(width));
    (before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_show_whole_string() {
        let (before, after) = cursor_window("hello", 2, 40);
        assert_eq!(before, "he");
        assert_eq!(after, "llo");
    }

    #[test]
    fn long_values_keep_the_cursor_visible() {
        let value = "x".repeat(100);
        let (before, after) = cursor_window(&value, 100, 20);
        assert_eq!(display_width(&before), 19);
        assert!(after.is_empty());
    }

    #[test]
    fn cursor_at_start_shows_the_head() {
        let value = "abcdef";
        let (before, after) = cursor_window(value, 0, 4);
        assert!(before.is_empty());
        assert_eq!(after, "ab\u{2026}");
    }
}
