use super::search_bar;
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use twig_core::{git::Branch, input::TextInput};

/// Force-delete prompt, drawn in place of the branch list
pub fn draw(f: &mut Frame, area: Rect, branch: &Branch, answer: &TextInput, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(area);

    let prompt = vec![
        Line::from(vec![
            Span::raw("Branch "),
            Span::styled(
                branch.name.as_str(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" is not fully merged,"),
        ]),
        Line::raw("are you sure you want to delete? (y/n)"),
    ];
    f.render_widget(Paragraph::new(prompt), chunks[0]);

    search_bar::draw(
        f,
        chunks[1],
        &search_bar::SearchBarStyle {
            title: "confirm",
            placeholder: "",
            border_color: theme.warning,
            placeholder_color: theme.muted,
        },
        answer,
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_prompt_names_branch_and_echoes_answer() {
        let theme = Theme::default();
        let mut answer = TextInput::new();
        answer.set("ye");

        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw(f, area, &Branch::new("feature-x"), &answer, &theme);
            })
            .unwrap();
        let output = buffer_text(terminal.backend().buffer());

        assert!(output.contains("Branch feature-x is not fully merged,"));
        assert!(output.contains("are you sure you want to delete? (y/n)"));
        assert!(output.contains("ye"));
    }
}
