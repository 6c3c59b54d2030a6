use crate::{
    git::{BranchSet, GitError},
    state::PendingAction,
};

/// Events that arrive asynchronously from background tasks.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug)]
pub enum AppEvent {
    /// A mutating git command finished, successfully or not
    ActionCompleted {
        action: PendingAction,
        result: Result<(), GitError>,
    },

    /// Branches re-listed after a successful mutation
    BranchesLoaded(BranchSet),

    /// Re-listing branches failed
    RefreshFailed(String),
}
