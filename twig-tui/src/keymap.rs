use twig_core::{
    action::{Action, StashAction},
    keyboard::{KeyCode, KeyEvent},
    state::Mode,
};

/// Resolve a key event into an Action based on the current mode.
///
/// Ctrl-C cancels from every mode; otherwise confirmation wins over filter input, which
/// wins over normal navigation.
pub fn resolve_action(key: KeyEvent, mode: &Mode) -> Option<Action> {
    if key.is_ctrl('c') {
        return Some(Action::Cancel);
    }

    match mode {
        Mode::ConfirmDestructive { .. } => resolve_confirm_key(key),
        Mode::FilterInsert => resolve_filter_key(key),
        Mode::Normal => resolve_normal_key(key),
    }
}

fn resolve_confirm_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::ConfirmSubmit),
        KeyCode::Esc => Some(Action::ConfirmAbort),
        KeyCode::Backspace => Some(Action::ConfirmPop),
        _ => key.printable().map(Action::ConfirmPush),
    }
}

fn resolve_filter_key(key: KeyEvent) -> Option<Action> {
    if key.is_ctrl('w') {
        return Some(Action::FilterDeleteWord);
    }
    if key.is_ctrl('a') {
        return Some(Action::CursorStart);
    }
    if key.is_ctrl('e') {
        return Some(Action::CursorEnd);
    }

    match key.code {
        KeyCode::Esc => Some(Action::LeaveFilter),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Backspace => Some(Action::FilterPop),
        KeyCode::Delete => Some(Action::FilterDeleteForward),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        _ => key.printable().map(Action::FilterPush),
    }
}

fn resolve_normal_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        _ => match key.printable()?.to_ascii_lowercase() {
            'i' => Some(Action::EnterFilter),
            'j' => Some(Action::MoveDown),
            'k' => Some(Action::MoveUp),
            'x' => Some(Action::DeleteSelected),
            // q is reserved
            _ => None,
        },
    }
}

/// Keys of the stash picker
pub fn resolve_stash_action(key: KeyEvent) -> Option<StashAction> {
    if key.is_ctrl('c') {
        return Some(StashAction::Cancel);
    }
    match key.code {
        KeyCode::Enter => Some(StashAction::Finish),
        KeyCode::Esc => Some(StashAction::Cancel),
        KeyCode::Up => Some(StashAction::MoveUp),
        KeyCode::Down => Some(StashAction::MoveDown),
        _ => match key.printable()? {
            's' => Some(StashAction::Stage),
            'u' => Some(StashAction::Unstage),
            'j' => Some(StashAction::MoveDown),
            'k' => Some(StashAction::MoveUp),
            'q' => Some(StashAction::Cancel),
            _ => None,
        },
    }
}
