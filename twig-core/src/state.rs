use crate::{
    git::{Branch, BranchSet},
    input::TextInput,
    list::SelectionList,
};
use std::fmt;

/// Interaction mode. Exactly one is active; confirmation carries its own target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    FilterInsert,
    /// A safe delete of `branch` was refused as unmerged; waiting for a yes/no answer
    ConfirmDestructive { branch: Branch },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::FilterInsert => "filter",
            Mode::ConfirmDestructive { .. } => "confirm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Switch,
    DeleteSafe,
    DeleteForce,
    Stash,
}

impl PendingKind {
    pub fn is_delete(self) -> bool {
        matches!(self, PendingKind::DeleteSafe | PendingKind::DeleteForce)
    }
}

/// A mutating gateway command that has been issued but not yet reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub target: Branch,
    pub kind: PendingKind,
}

impl PendingAction {
    pub fn new(target: Branch, kind: PendingKind) -> Self {
        Self { target, kind }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            PendingKind::Switch => "switching to",
            PendingKind::DeleteSafe | PendingKind::DeleteForce => "deleting",
            PendingKind::Stash => "stashing changes before",
        };
        write!(f, "{verb} {}", self.target)
    }
}

/// Terminal state of an interactive branch session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(Branch),
    Canceled,
}

pub struct AppState {
    pub branches: BranchSet,
    pub filter: TextInput,
    pub list: SelectionList<Branch>,
    /// Answer typed while in `Mode::ConfirmDestructive`, kept apart from the filter
    pub confirm: TextInput,
    pub mode: Mode,
    pub pending: Option<PendingAction>,
    /// A branch re-listing is in flight
    pub refreshing: bool,
    pub error: Option<String>,
}

impl AppState {
    pub fn new(branches: BranchSet) -> Self {
        let list = SelectionList::new(branches.branches.clone());
        Self {
            branches,
            filter: TextInput::new(),
            list,
            confirm: TextInput::new(),
            mode: Mode::Normal,
            pending: None,
            refreshing: false,
            error: None,
        }
    }

    /// Install a freshly listed branch set. Filter and cursor go back to their defaults.
    pub fn replace_branches(&mut self, branches: BranchSet) {
        self.list.set_candidates(branches.branches.clone());
        self.branches = branches;
        self.filter.clear();
        self.refreshing = false;
    }

    pub fn selected_branch(&self) -> Option<&Branch> {
        self.list.selected()
    }

    /// A mutating command or a refresh is still running
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.refreshing
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        }
        self.mode = mode;
    }

    pub fn enter_confirm(&mut self, branch: Branch) {
        self.confirm.clear();
        self.set_mode(Mode::ConfirmDestructive { branch });
    }

    /// Leave confirmation, dropping whatever was typed
    pub fn leave_confirm(&mut self) {
        self.confirm.clear();
        self.set_mode(Mode::Normal);
    }
}
