use super::{list_rows, search_bar};
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use twig_core::state::{AppState, Mode};

pub const FILTER_PLACEHOLDER: &str = "Press i to filter branches...";

pub fn header_text(current: Option<&str>) -> String {
    match current {
        Some(name) => format!(" on branch {name}"),
        None => " (no branch)".to_string(),
    }
}

/// Numbered row label; the highlighted row is bracketed
pub fn item_label(index: usize, name: &str, highlighted: bool) -> String {
    if highlighted {
        format!("[{}] {name}", index + 1)
    } else {
        format!(" {}. {name}", index + 1)
    }
}

pub fn draw(f: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(Span::styled(
        header_text(state.branches.current_name()),
        Style::default()
            .fg(theme.secondary)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(header, chunks[0]);

    search_bar::draw(
        f,
        chunks[1],
        &search_bar::SearchBarStyle {
            title: "filter",
            placeholder: FILTER_PLACEHOLDER,
            border_color: if state.mode == Mode::FilterInsert {
                theme.accent
            } else {
                theme.border
            },
            placeholder_color: theme.hint,
        },
        &state.filter,
        state.mode == Mode::FilterInsert,
    );

    state.list.set_page_rows(list_rows(chunks[2].height));
    state.list.update_scroll_offset();
    draw_list(f, chunks[2], state, theme);

    let footer = match (&state.pending, state.selected_branch()) {
        (Some(pending), _) => Span::styled(
            format!("{pending}..."),
            Style::default().fg(theme.warning),
        ),
        (None, Some(branch)) => Span::styled(branch.name.as_str(), Style::default().fg(theme.muted)),
        (None, None) => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(footer)), chunks[3]);
}

fn draw_list(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = list_rows(area.height);
    let offset = state.list.scroll_offset();
    let selected = state.list.selected_index();

    let items: Vec<ListItem> = state
        .list
        .items()
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, branch)| {
            let highlighted = selected == Some(i);
            let style = if highlighted {
                Style::default()
                    .fg(theme.highlight_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                item_label(i, &branch.name, highlighted),
                style,
            )))
        })
        .collect();

    let title = if state.filter.is_empty() {
        format!(" {} branches ", state.list.len())
    } else {
        format!(" {}/{} branches ", state.list.len(), state.branches.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(list, area);
}
