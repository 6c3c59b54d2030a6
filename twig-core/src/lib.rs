pub mod action;
pub mod config;
pub mod event;
pub mod git;
pub mod input;
pub mod keyboard;
pub mod list;
pub mod reconcile;
pub mod stash;
pub mod state;

// Re-export commonly used types at crate root
pub use action::{Action, StashAction};
pub use config::Config;
pub use event::AppEvent;
pub use git::{Branch, BranchSet, GitError, GitProvider};
pub use keyboard::KeyEvent;
pub use list::{ListSignal, SelectionList};
pub use state::{AppState, Mode, PendingAction, PendingKind, SessionOutcome};
