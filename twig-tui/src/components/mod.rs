pub mod branch_list;
pub mod confirm;
pub mod error_bar;
pub mod search_bar;
pub mod stash_picker;

/// Rows a bordered list can show inside `height` terminal rows
pub fn list_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(2)).max(1)
}

/// Flatten a rendered buffer into text, one line per row
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push(buffer[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        output.push('\n');
    }
    output
}
