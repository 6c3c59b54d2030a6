use crate::{
    git::{self, Branch, GitError, GitProvider},
    state::{AppState, Mode, PendingAction, PendingKind},
};

/// What the event loop has to do after a command result has been folded into state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Command succeeded: re-list branches
    Refresh,
    /// Safe delete refused; now asking whether to force it
    Confirm(Branch),
    /// Failure was recorded in `state.error`
    Reported,
    /// Result did not belong to the in-flight action and was dropped
    Stale,
}

/// Run the gateway command behind `action`
pub fn execute(git: &dyn GitProvider, action: &PendingAction) -> git::Result<()> {
    match action.kind {
        PendingKind::Switch => git.switch_to(&action.target),
        PendingKind::DeleteSafe => git.delete_branch(&action.target, false),
        PendingKind::DeleteForce => git.delete_branch(&action.target, true),
        PendingKind::Stash => git.stash(),
    }
}

/// Fold the result of `action` into `state` and clear the pending slot.
///
/// Gateway errors stop here: they become a mode change or a diagnostic, never a panic
/// or an early exit.
pub fn reconcile(
    state: &mut AppState,
    action: &PendingAction,
    result: git::Result<()>,
) -> Reconciliation {
    if state.pending.as_ref() != Some(action) {
        log::debug!("dropping result for {action}, nothing pending for it");
        return Reconciliation::Stale;
    }
    state.pending = None;

    match result {
        Ok(()) => {
            log::debug!("{action} succeeded, refreshing branches");
            state.set_mode(Mode::Normal);
            state.refreshing = true;
            Reconciliation::Refresh
        }
        Err(GitError::UnmergedBranch { .. }) if action.kind == PendingKind::DeleteSafe => {
            log::debug!("{} is not fully merged, asking to force", action.target);
            state.enter_confirm(action.target.clone());
            Reconciliation::Confirm(action.target.clone())
        }
        Err(e) => {
            log::debug!("{action} failed: {e}");
            state.error = Some(e.to_string());
            Reconciliation::Reported
        }
    }
}

/// Result of stashing then switching after a finished session
#[derive(Debug)]
pub struct SwitchReport {
    /// Stash is best-effort; its failure does not stop the switch but is handed back
    pub stash_error: Option<GitError>,
    pub switch: git::Result<()>,
}

pub fn stash_and_switch(git: &dyn GitProvider, branch: &Branch) -> SwitchReport {
    let stash = PendingAction::new(branch.clone(), PendingKind::Stash);
    let stash_error = execute(git, &stash).err();
    if let Some(e) = &stash_error {
        log::warn!("stash before switching to {branch} failed: {e}");
    }

    let switch = execute(git, &PendingAction::new(branch.clone(), PendingKind::Switch));
    SwitchReport {
        stash_error,
        switch,
    }
}
