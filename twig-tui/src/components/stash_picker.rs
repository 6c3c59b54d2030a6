use super::{branch_list::item_label, list_rows};
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use twig_core::stash::StashState;

const HINT: &str = " s stage · u unstage · enter stash · q cancel";

pub fn draw(f: &mut Frame, area: Rect, stash: &mut StashState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(60),
        Constraint::Min(3),
    ])
    .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(theme.hint))),
        chunks[0],
    );

    stash.changes.set_page_rows(list_rows(chunks[1].height));
    stash.changes.update_scroll_offset();

    let selected = stash.changes.selected_index();
    let changes: Vec<ListItem> = stash
        .changes
        .items()
        .iter()
        .enumerate()
        .skip(stash.changes.scroll_offset())
        .take(list_rows(chunks[1].height))
        .map(|(i, path)| {
            let highlighted = selected == Some(i);
            let style = if highlighted {
                Style::default()
                    .fg(theme.highlight_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(item_label(i, path, highlighted), style))
        })
        .collect();
    f.render_widget(
        List::new(changes).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" changes ({}) ", stash.changes.len()))
                .border_style(Style::default().fg(theme.border)),
        ),
        chunks[1],
    );

    let staged: Vec<ListItem> = stash
        .staged
        .iter()
        .map(|path| {
            ListItem::new(Line::from(Span::styled(
                format!(" {path}"),
                Style::default().fg(theme.success),
            )))
        })
        .collect();
    f.render_widget(
        List::new(staged).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" to stash ({}) ", stash.staged.len()))
                .border_style(Style::default().fg(theme.border)),
        ),
        chunks[2],
    );
}
