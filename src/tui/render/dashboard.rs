use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Tool;
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Hostname shown for a link: scheme and leading www stripped, path cut.
fn display_host(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.split('/').next().unwrap_or(rest)
}

/// Render the ordered, filtered tool list.
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.session.is_loading() {
        let loading = Paragraph::new(" Loading your shelf...")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(loading, area);
        return;
    }

    let visible = app.visible();
    if visible.is_empty() {
        let message = if app.session.tools().is_empty() {
            " Shelf is empty. Press a to add your first tool."
        } else {
            " No tools found."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let mut scroll = app.scroll_offset.min(visible.len().saturating_sub(1));
    // Keep the cursor on screen
    if app.cursor < scroll {
        scroll = app.cursor;
    } else if height > 0 && app.cursor >= scroll + height {
        scroll = app.cursor + 1 - height;
    }

    let grabbed = matches!(app.mode, Mode::Move);
    let mut lines: Vec<Line> = Vec::new();
    for (i, tool) in visible.iter().enumerate().skip(scroll).take(height) {
        let is_cursor = i == app.cursor;
        lines.push(tool_row(app, tool, is_cursor, grabbed && is_cursor, area.width));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// One row: `  t-004  Name                figma.com     #design #ui +2`
fn tool_row(app: &App, tool: &Tool, is_cursor: bool, is_grabbed: bool, width: u16) -> Line<'static> {
    let width = width as usize;
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let marker = if is_grabbed { "◆ " } else { "  " };
    let marker_style = Style::default().fg(app.theme.selection_border).bg(bg);

    let id_style = Style::default().fg(app.theme.dim).bg(bg);
    let name_style = if is_cursor {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };

    let mut spans: Vec<Span> = vec![
        Span::styled(marker.to_string(), marker_style),
        Span::styled(format!("{:<7}", tool.id), id_style),
        Span::styled(format!("{:<22}", truncate_to_width(&tool.name, 20)), name_style),
    ];

    // First link's host, plus a count when there are more
    let links = tool.effective_links();
    let link_text = match links.len() {
        0 => String::new(),
        1 => display_host(&links[0].url).to_string(),
        n => format!("{} (+{})", display_host(&links[0].url), n - 1),
    };
    spans.push(Span::styled(
        format!("{:<26}", truncate_to_width(&link_text, 24)),
        Style::default().fg(app.theme.text).bg(bg),
    ));

    // PR marker
    if tool.pr_link.is_some() {
        spans.push(Span::styled(
            "⇵ ".to_string(),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    // First 3 tags, then a +n count
    for tag in tool.tags.iter().take(3) {
        spans.push(Span::styled(
            format!("#{tag} "),
            Style::default().fg(app.theme.tag_color(tag)).bg(bg),
        ));
    }
    if tool.tags.len() > 3 {
        spans.push(Span::styled(
            format!("+{} ", tool.tags.len() - 3),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    // Pad to full width so the selection background spans the row
    let used: usize = spans
        .iter()
        .map(|s| crate::util::unicode::display_width(&s.content))
        .sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    Line::from(spans)
}
