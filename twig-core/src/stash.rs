use crate::{action::StashAction, list::SelectionList};

/// Changed paths split into what stays in the working tree and what will be stashed
#[derive(Debug, Clone, Default)]
pub struct StashState {
    pub changes: SelectionList<String>,
    pub staged: Vec<String>,
}

impl StashState {
    pub fn new(changes: Vec<String>) -> Self {
        Self {
            changes: SelectionList::new(changes),
            staged: Vec::new(),
        }
    }

    /// Move the highlighted change to the end of the staged list
    pub fn stage_selected(&mut self) -> bool {
        match self.changes.take_selected() {
            Some(path) => {
                self.staged.push(path);
                true
            }
            None => false,
        }
    }

    /// Move the oldest staged path back to the end of the changes
    pub fn unstage_first(&mut self) -> bool {
        if self.staged.is_empty() {
            return false;
        }
        let path = self.staged.remove(0);
        self.changes.push(path);
        true
    }

    pub fn apply(&mut self, action: StashAction) {
        match action {
            StashAction::Stage => {
                self.stage_selected();
            }
            StashAction::Unstage => {
                self.unstage_first();
            }
            StashAction::MoveUp => self.changes.move_up(),
            StashAction::MoveDown => self.changes.move_down(),
            StashAction::Finish => self.changes.finish(),
            StashAction::Cancel => self.changes.cancel(),
        }
    }
}
