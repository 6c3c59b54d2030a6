use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use twig_core::input::TextInput;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct SearchBarStyle<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub border_color: Color,
    pub placeholder_color: Color,
}

/// Byte range of the text that fits the bar, and the cursor column inside it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

fn visible_slice(text: &str, cursor: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();

    // Column at which each grapheme starts, plus one trailing entry for the end
    let mut columns = Vec::with_capacity(graphemes.len() + 1);
    let mut col = 0;
    for (_, g) in &graphemes {
        columns.push(col);
        col += g.width();
    }
    columns.push(col);

    let cursor = cursor.min(text.len());
    let cursor_idx = graphemes
        .iter()
        .position(|(i, _)| *i >= cursor)
        .unwrap_or(graphemes.len());
    let cursor_col = columns[cursor_idx];

    let max_width = usize::from(max_width);
    let last_col = max_width - 1;
    let scroll = cursor_col.saturating_sub(last_col);

    // First grapheme starting at or before the scroll column
    let start_idx = columns
        .iter()
        .rposition(|&c| c <= scroll)
        .unwrap_or(0)
        .min(graphemes.len() - 1);

    let mut end_idx = start_idx;
    while end_idx < graphemes.len() && columns[end_idx + 1] - columns[start_idx] <= max_width {
        end_idx += 1;
    }

    let byte_at = |idx: usize| graphemes.get(idx).map_or(text.len(), |(i, _)| *i);
    let cursor_col = (cursor_col - columns[start_idx]).min(last_col);

    VisibleSlice {
        start: byte_at(start_idx),
        end: byte_at(end_idx),
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

/// Render a bordered single-line input. The terminal cursor is placed only when `focused`.
pub fn draw(f: &mut Frame, area: Rect, style: &SearchBarStyle<'_>, input: &TextInput, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", style.title))
        .border_style(Style::default().fg(style.border_color));
    let inner = block.inner(area);

    let (content, cursor_col) = if input.is_empty() {
        let placeholder = if focused { "" } else { style.placeholder };
        (
            Line::from(Span::styled(
                placeholder,
                Style::default().fg(style.placeholder_color),
            )),
            0,
        )
    } else {
        let slice = visible_slice(input.text(), input.cursor(), inner.width);
        (
            Line::from(Span::raw(&input.text()[slice.start..slice.end])),
            slice.cursor_col,
        )
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }
}
