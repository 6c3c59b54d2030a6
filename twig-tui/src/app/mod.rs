mod actions;
mod spawn;
mod stash;

use crate::{
    components::{branch_list, confirm, error_bar},
    filter::FuzzyFilter,
    keymap,
    theme::Theme,
};
use actions::{
    handle_app_event, handle_confirm_submit, handle_delete_selected, refilter,
    take_outcome,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use std::{
    sync::{Arc, atomic::AtomicBool, mpsc},
    time::Duration,
};
use twig_core::{
    action::Action,
    config::ConfirmConfig,
    event::AppEvent,
    git::GitProvider,
    keyboard::KeyEvent,
    state::{AppState, Mode, SessionOutcome},
};

pub use stash::run_stash;

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drive the branch picker until the user selects a branch or cancels
pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    theme: &Theme,
    confirm: &ConfirmConfig,
) -> anyhow::Result<SessionOutcome> {
    let filter = FuzzyFilter::new();
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let sender = EventSender {
        tx,
        cancel: Arc::new(AtomicBool::new(false)),
    };

    loop {
        terminal.draw(|f| draw(f, state, theme))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            process_app_event(app_event, state, git, &sender);
            continue;
        }

        // Poll with a timeout so completed commands are picked up while idle
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(key) = KeyEvent::from_crossterm(key) else {
                continue;
            };

            // Clear error on any keypress
            state.error = None;

            if let Some(action) = keymap::resolve_action(key, &state.mode)
                && let Some(outcome) =
                    process_action(action, state, git, &filter, confirm, &sender)
            {
                return Ok(outcome);
            }
        }
    }
}

fn draw(f: &mut Frame, state: &mut AppState, theme: &Theme) {
    let (main_area, error_area) = if state.error.is_some() {
        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(f.area());
        (chunks[0], Some(chunks[1]))
    } else {
        (f.area(), None)
    };

    let confirm_target = match &state.mode {
        Mode::ConfirmDestructive { branch } => Some(branch.clone()),
        Mode::Normal | Mode::FilterInsert => None,
    };
    match confirm_target {
        Some(branch) => confirm::draw(f, main_area, &branch, &state.confirm, theme),
        None => branch_list::draw(f, main_area, state, theme),
    }

    if let (Some(area), Some(error)) = (error_area, &state.error) {
        error_bar::draw(f, area, error, theme);
    }
}

/// Apply one action to the state machine. Returns the session outcome once the user
/// has selected a branch or canceled.
fn process_action(
    action: Action,
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    filter: &FuzzyFilter,
    confirm: &ConfirmConfig,
    sender: &EventSender,
) -> Option<SessionOutcome> {
    match action {
        Action::Cancel => state.list.cancel(),
        Action::Select => {
            if state.is_busy() {
                log::debug!("select ignored, another command is still running");
            } else if !state.list.is_empty() {
                state.list.finish();
            }
        }
        Action::EnterFilter => state.set_mode(Mode::FilterInsert),
        Action::LeaveFilter => state.set_mode(Mode::Normal),
        Action::DeleteSelected => handle_delete_selected(state, git, sender),

        Action::MoveUp => state.list.move_up(),
        Action::MoveDown => state.list.move_down(),
        Action::PageUp => state.list.page_up(),
        Action::PageDown => state.list.page_down(),

        Action::FilterPush(c) => {
            state.filter.insert_char(c);
            refilter(state, filter);
        }
        Action::FilterPop => {
            if state.filter.backspace() {
                refilter(state, filter);
            }
        }
        Action::FilterDeleteForward => {
            if state.filter.delete_forward() {
                refilter(state, filter);
            }
        }
        Action::FilterDeleteWord => {
            if state.filter.delete_word() {
                refilter(state, filter);
            }
        }
        Action::CursorLeft => state.filter.cursor_left(),
        Action::CursorRight => state.filter.cursor_right(),
        Action::CursorStart => state.filter.cursor_start(),
        Action::CursorEnd => state.filter.cursor_end(),

        Action::ConfirmPush(c) => state.confirm.insert_char(c),
        Action::ConfirmPop => {
            state.confirm.backspace();
        }
        Action::ConfirmSubmit => handle_confirm_submit(state, git, sender, confirm),
        Action::ConfirmAbort => state.leave_confirm(),
    }

    take_outcome(state, sender)
}

/// Handle events from background tasks
fn process_app_event(
    event: AppEvent,
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    sender: &EventSender,
) {
    handle_app_event(state, git, sender, event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use twig_core::{
        git::{
            Branch, GitError,
            mock::{GitCall, MockGitProvider},
        },
        keyboard::KeyCode,
        state::{PendingAction, PendingKind},
    };

    struct Harness {
        state: AppState,
        mock: Arc<MockGitProvider>,
        git: Arc<dyn GitProvider>,
        filter: FuzzyFilter,
        confirm: ConfirmConfig,
        sender: EventSender,
        rx: mpsc::Receiver<AppEvent>,
    }

    impl Harness {
        fn new(mock: MockGitProvider) -> Self {
            let branches = mock.list_branches().unwrap();
            let mock = Arc::new(mock);
            let git: Arc<dyn GitProvider> = mock.clone();
            let (tx, rx) = mpsc::channel();
            Self {
                state: AppState::new(branches),
                mock,
                git,
                filter: FuzzyFilter::new(),
                confirm: ConfirmConfig::default(),
                sender: EventSender {
                    tx,
                    cancel: Arc::new(AtomicBool::new(false)),
                },
                rx,
            }
        }

        fn press(&mut self, key: KeyEvent) -> Option<SessionOutcome> {
            self.state.error = None;
            let action = keymap::resolve_action(key, &self.state.mode)?;
            process_action(
                action,
                &mut self.state,
                &self.git,
                &self.filter,
                &self.confirm,
                &self.sender,
            )
        }

        fn key(&mut self, code: KeyCode) -> Option<SessionOutcome> {
            self.press(KeyEvent::plain(code))
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                assert_eq!(self.key(KeyCode::Char(c)), None);
            }
        }

        /// Wait for one background event and process it
        fn pump(&mut self) {
            let event = self
                .rx
                .recv_timeout(Duration::from_secs(2))
                .expect("background event");
            process_app_event(event, &mut self.state, &self.git, &self.sender);
        }

        fn selected(&self) -> Option<&str> {
            self.state.selected_branch().map(|b| b.name.as_str())
        }

        fn visible(&self) -> Vec<&str> {
            self.state
                .list
                .items()
                .iter()
                .map(|b| b.name.as_str())
                .collect()
        }
    }

    fn mock(branches: &[&str]) -> MockGitProvider {
        MockGitProvider::with_branches("main", branches)
    }

    #[test]
    fn test_unmerged_delete_then_force() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["dev", "feature-x"])
        });
        h.type_text("j");
        assert_eq!(h.selected(), Some("feature-x"));

        h.type_text("x");
        assert!(h.state.pending.is_some());
        assert_eq!(h.state.mode, Mode::Normal);
        h.pump();
        assert_eq!(
            h.state.mode,
            Mode::ConfirmDestructive {
                branch: Branch::new("feature-x")
            }
        );
        assert!(h.state.pending.is_none());

        h.type_text("yes");
        assert_eq!(h.state.confirm.text(), "yes");
        assert!(h.state.filter.is_empty());
        assert_eq!(h.key(KeyCode::Enter), None);
        assert_eq!(h.state.mode, Mode::Normal);
        assert!(h.state.confirm.is_empty());

        h.pump(); // force delete result
        assert!(h.state.refreshing);
        h.pump(); // refreshed listing
        assert!(!h.state.branches.contains("feature-x"));
        assert_eq!(h.visible(), vec!["dev"]);
        assert_eq!(
            h.mock.recorded_calls(),
            vec![
                GitCall::DeleteBranch {
                    name: "feature-x".into(),
                    force: false
                },
                GitCall::DeleteBranch {
                    name: "feature-x".into(),
                    force: true
                },
            ]
        );
    }

    #[test]
    fn test_confirmation_answer_is_case_insensitive() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["feature-x"])
        });
        h.type_text("x");
        h.pump();
        h.type_text("Y");
        h.key(KeyCode::Enter);
        assert_eq!(
            h.state.pending,
            Some(PendingAction::new(
                Branch::new("feature-x"),
                PendingKind::DeleteForce
            ))
        );
    }

    #[test]
    fn test_declined_confirmation_does_not_force() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["feature-x"])
        });
        h.type_text("x");
        h.pump();
        h.type_text("n");
        h.key(KeyCode::Enter);

        assert_eq!(h.state.mode, Mode::Normal);
        assert!(h.state.pending.is_none());
        assert_eq!(h.mock.recorded_calls().len(), 1);
        assert!(h.state.branches.contains("feature-x"));
    }

    #[test]
    fn test_escape_leaves_confirmation_and_clears_answer() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["feature-x"])
        });
        h.type_text("x");
        h.pump();
        h.type_text("ye");
        h.key(KeyCode::Esc);

        assert_eq!(h.state.mode, Mode::Normal);
        assert!(h.state.confirm.is_empty());
        assert_eq!(h.mock.recorded_calls().len(), 1);
    }

    #[test]
    fn test_force_delete_targets_prompted_branch_not_cursor() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["feature-x", "dev"])
        });
        h.type_text("x");
        h.pump();
        // Cursor moves are not possible in the prompt, but even a stale cursor
        // elsewhere must not redirect the delete
        h.state.list.move_down();
        h.type_text("yes");
        h.key(KeyCode::Enter);
        assert_eq!(
            h.state.pending.as_ref().map(|p| p.target.name.as_str()),
            Some("feature-x")
        );
    }

    #[test]
    fn test_ctrl_c_in_filter_cancels_without_git_calls() {
        let mut h = Harness::new(mock(&["dev", "feature-x"]));
        h.type_text("i");
        assert_eq!(h.state.mode, Mode::FilterInsert);
        h.type_text("fe");

        assert_eq!(h.press(KeyEvent::ctrl('c')), Some(SessionOutcome::Canceled));
        assert!(h.mock.recorded_calls().is_empty());
        assert!(h.sender.cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn test_ctrl_c_in_confirmation_cancels() {
        let mut h = Harness::new(MockGitProvider {
            unmerged: vec!["feature-x".into()],
            ..mock(&["feature-x"])
        });
        h.type_text("x");
        h.pump();
        assert_eq!(h.press(KeyEvent::ctrl('c')), Some(SessionOutcome::Canceled));
        assert_eq!(h.mock.recorded_calls().len(), 1);
    }

    #[test]
    fn test_select_finishes_with_highlighted_branch() {
        let mut h = Harness::new(mock(&["dev", "feature-y"]));
        h.type_text("j");
        assert_eq!(
            h.key(KeyCode::Enter),
            Some(SessionOutcome::Finished(Branch::new("feature-y")))
        );
        assert!(h.mock.recorded_calls().is_empty());
    }

    #[test]
    fn test_select_waits_for_pending_delete() {
        let mut h = Harness::new(mock(&["dev", "feature-y"]));
        h.type_text("j");
        h.type_text("x");
        assert!(h.state.pending.is_some());

        assert_eq!(h.key(KeyCode::Enter), None);
        assert_eq!(h.state.list.take_signal(), None);
        assert!(!h.sender.cancel.load(Ordering::Relaxed));

        h.pump(); // delete result
        assert_eq!(h.key(KeyCode::Enter), None, "refresh still running");
        h.pump(); // refreshed listing
        assert_eq!(h.visible(), vec!["dev"]);
        assert_eq!(
            h.key(KeyCode::Enter),
            Some(SessionOutcome::Finished(Branch::new("dev")))
        );
        assert!(h.sender.cancel.load(Ordering::Relaxed));
        assert!(
            !h.mock
                .recorded_calls()
                .iter()
                .any(|c| matches!(c, GitCall::SwitchTo(_) | GitCall::Stash))
        );
    }

    #[test]
    fn test_select_on_empty_list_is_noop() {
        let mut h = Harness::new(mock(&["dev"]));
        h.type_text("i");
        h.type_text("zzz");
        assert!(h.state.list.is_empty());
        assert_eq!(h.key(KeyCode::Enter), None);
        assert_eq!(h.state.list.take_signal(), None);
    }

    #[test]
    fn test_filter_typing_narrows_and_escape_keeps_text() {
        let mut h = Harness::new(mock(&["dev", "feature-x", "fix-y", "docs"]));
        h.type_text("i");
        h.type_text("fea");
        assert_eq!(h.visible(), vec!["feature-x"]);

        h.key(KeyCode::Backspace);
        h.key(KeyCode::Backspace);
        assert_eq!(h.visible(), vec!["feature-x", "fix-y"]);
        assert_eq!(h.selected(), Some("feature-x"));

        h.key(KeyCode::Down);
        assert_eq!(h.selected(), Some("fix-y"));

        h.key(KeyCode::Esc);
        assert_eq!(h.state.mode, Mode::Normal);
        assert_eq!(h.state.filter.text(), "f");
        assert_eq!(h.visible(), vec!["feature-x", "fix-y"]);

        // j is navigation again, not text
        h.type_text("k");
        assert_eq!(h.selected(), Some("feature-x"));
        assert_eq!(h.state.filter.text(), "f");
    }

    #[test]
    fn test_enter_in_filter_selects() {
        let mut h = Harness::new(mock(&["dev", "feature-y"]));
        h.type_text("i");
        h.type_text("y");
        assert_eq!(
            h.key(KeyCode::Enter),
            Some(SessionOutcome::Finished(Branch::new("feature-y")))
        );
    }

    #[test]
    fn test_cursor_clamps_in_normal_mode() {
        let mut h = Harness::new(mock(&["a", "b", "c"]));
        h.type_text("kk");
        assert_eq!(h.selected(), Some("a"));
        h.type_text("jjjj");
        assert_eq!(h.selected(), Some("c"));
    }

    #[test]
    fn test_q_is_noop() {
        let mut h = Harness::new(mock(&["a", "b"]));
        h.type_text("j");
        assert_eq!(h.press(KeyEvent::plain(KeyCode::Char('q'))), None);
        assert_eq!(h.state.mode, Mode::Normal);
        assert_eq!(h.selected(), Some("b"));
    }

    #[test]
    fn test_delete_while_pending_is_noop() {
        let mut h = Harness::new(mock(&["a", "b"]));
        h.state.pending = Some(PendingAction::new(Branch::new("a"), PendingKind::DeleteSafe));
        h.type_text("x");
        assert!(h.mock.recorded_calls().is_empty());
        assert!(
            h.rx.recv_timeout(Duration::from_millis(100)).is_err(),
            "no command should have been started"
        );
    }

    #[test]
    fn test_delete_while_refreshing_is_noop() {
        let mut h = Harness::new(mock(&["a"]));
        h.state.refreshing = true;
        h.type_text("x");
        assert!(h.state.pending.is_none());
    }

    #[test]
    fn test_success_refresh_resets_filter_and_cursor() {
        let mut h = Harness::new(mock(&["dev", "feature-x", "fix-y"]));
        h.type_text("i");
        h.type_text("f");
        h.key(KeyCode::Down);
        assert_eq!(h.selected(), Some("fix-y"));
        h.key(KeyCode::Esc);

        h.type_text("x");
        h.pump();
        assert_eq!(h.state.mode, Mode::Normal);
        h.pump();

        assert!(h.state.filter.is_empty());
        assert_eq!(h.visible(), vec!["dev", "feature-x"]);
        assert_eq!(h.state.list.selected_index(), Some(0));
        assert!(!h.state.is_busy());
    }

    #[test]
    fn test_other_failure_is_shown_and_keeps_mode() {
        let m = mock(&["dev"]);
        m.delete_results
            .lock()
            .unwrap()
            .push_back(Err(GitError::CommandFailed {
                command: "git branch -d dev".into(),
                status: "exit status: 1".into(),
                stderr: "error: branch 'dev' is checked out elsewhere".into(),
            }));
        let mut h = Harness::new(m);
        h.type_text("x");
        h.pump();

        assert_eq!(h.state.mode, Mode::Normal);
        assert!(h.state.error.as_deref().unwrap().contains("checked out"));
        assert!(h.state.pending.is_none());
        assert!(h.state.branches.contains("dev"));
        assert!(h.rx.recv_timeout(Duration::from_millis(100)).is_err());

        // Any key clears the diagnostic
        h.type_text("j");
        assert!(h.state.error.is_none());
    }

    #[test]
    fn test_refresh_failure_is_reported() {
        let mut h = Harness::new(mock(&["dev"]));
        *h.mock.list_branches_error.lock().unwrap() =
            Some(GitError::Unavailable("index.lock exists".into()));
        h.type_text("x");
        h.pump();
        h.pump();

        assert!(!h.state.refreshing);
        assert!(h.state.error.as_deref().unwrap().contains("index.lock"));
    }

    #[test]
    fn test_work_started_after_cancel_reports_nothing() {
        let mut h = Harness::new(mock(&["dev"]));
        h.sender.cancel.store(true, Ordering::Relaxed);
        h.type_text("x");
        assert!(h.rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert!(h.mock.recorded_calls().is_empty());
    }
}
