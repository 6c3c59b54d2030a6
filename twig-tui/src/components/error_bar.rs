use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub fn draw(f: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    // git diagnostics can span lines; the bar has one
    let message = error.lines().next().unwrap_or_default();
    let line = Paragraph::new(Span::styled(
        format!(" Error: {message}"),
        Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(line, area);
}
