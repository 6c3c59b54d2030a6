use super::EventSender;
use std::{
    sync::{Arc, atomic::Ordering},
    thread,
};
use twig_core::{event::AppEvent, git::GitProvider, reconcile, state::PendingAction};

/// Run a mutating git command off the input loop; the result comes back as
/// `AppEvent::ActionCompleted`.
pub(super) fn spawn_action(git: &Arc<dyn GitProvider>, sender: &EventSender, action: PendingAction) {
    let git = Arc::clone(git);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        let result = reconcile::execute(git.as_ref(), &action);
        if sender.cancel.load(Ordering::Relaxed) {
            log::debug!("session ended, discarding result of {action}");
            return;
        }
        sender.send(AppEvent::ActionCompleted { action, result });
    });
}

pub(super) fn spawn_branch_refresh(git: &Arc<dyn GitProvider>, sender: &EventSender) {
    let git = Arc::clone(git);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        match git.list_branches() {
            Ok(branches) => sender.send(AppEvent::BranchesLoaded(branches)),
            Err(e) => sender.send(AppEvent::RefreshFailed(e.to_string())),
        }
    });
}
