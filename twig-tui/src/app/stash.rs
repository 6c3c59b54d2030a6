use crate::{components::stash_picker, keymap, theme::Theme};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use twig_core::{keyboard::KeyEvent, list::ListSignal, stash::StashState};

/// Drive the stash picker until the user finishes or cancels
pub fn run_stash(
    terminal: &mut DefaultTerminal,
    stash: &mut StashState,
    theme: &Theme,
) -> anyhow::Result<ListSignal> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            stash_picker::draw(f, area, stash, theme);
        })?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = KeyEvent::from_crossterm(key).and_then(keymap::resolve_stash_action) {
                stash.apply(action);
            }
            if let Some(signal) = stash.changes.take_signal() {
                return Ok(signal);
            }
        }
    }
}
