use super::{
    EventSender,
    spawn::{spawn_action, spawn_branch_refresh},
};
use crate::filter::FuzzyFilter;
use std::sync::{Arc, atomic::Ordering};
use twig_core::{
    config::ConfirmConfig,
    event::AppEvent,
    git::GitProvider,
    list::ListSignal,
    reconcile::{Reconciliation, reconcile},
    state::{AppState, Mode, PendingAction, PendingKind, SessionOutcome},
};

/// Re-run the filter over the full branch set; the cursor goes back to the top
pub(super) fn refilter(state: &mut AppState, filter: &FuzzyFilter) {
    let matches = filter.filter(state.filter.text(), &state.branches.branches);
    state.list.set_candidates(matches);
}

pub(super) fn handle_delete_selected(
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    sender: &EventSender,
) {
    if state.is_busy() {
        log::debug!("delete ignored, another command is still running");
        return;
    }
    let Some(branch) = state.selected_branch().cloned() else {
        return;
    };
    start(state, git, sender, PendingAction::new(branch, PendingKind::DeleteSafe));
}

pub(super) fn handle_confirm_submit(
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    sender: &EventSender,
    confirm: &ConfirmConfig,
) {
    let Mode::ConfirmDestructive { branch } = state.mode.clone() else {
        return;
    };
    let accepted = confirm.accepts(state.confirm.text());
    state.leave_confirm();

    if !accepted {
        log::debug!("force delete of {branch} declined");
        return;
    }
    if state.is_busy() {
        log::debug!("force delete ignored, another command is still running");
        return;
    }
    start(state, git, sender, PendingAction::new(branch, PendingKind::DeleteForce));
}

fn start(
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    sender: &EventSender,
    action: PendingAction,
) {
    log::debug!("starting: {action}");
    state.pending = Some(action.clone());
    spawn_action(git, sender, action);
}

pub(super) fn handle_app_event(
    state: &mut AppState,
    git: &Arc<dyn GitProvider>,
    sender: &EventSender,
    event: AppEvent,
) {
    match event {
        AppEvent::ActionCompleted { action, result } => {
            if reconcile(state, &action, result) == Reconciliation::Refresh {
                spawn_branch_refresh(git, sender);
            }
        }
        AppEvent::BranchesLoaded(branches) => {
            log::debug!("branches refreshed, {} candidates", branches.len());
            state.replace_branches(branches);
        }
        AppEvent::RefreshFailed(error) => {
            state.refreshing = false;
            state.error = Some(format!("failed to refresh branches: {error}"));
        }
    }
}

/// Turn a raised list signal into the session's end state
pub(super) fn take_outcome(state: &mut AppState, sender: &EventSender) -> Option<SessionOutcome> {
    let outcome = match state.list.take_signal()? {
        ListSignal::Canceled => SessionOutcome::Canceled,
        ListSignal::Finished => SessionOutcome::Finished(state.selected_branch()?.clone()),
    };
    // Stop background threads from reporting back
    sender.cancel.store(true, Ordering::Relaxed);
    Some(outcome)
}
