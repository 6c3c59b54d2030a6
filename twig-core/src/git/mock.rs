use super::{
    branch::{Branch, BranchSet},
    error::{GitError, Result},
    provider::GitProvider,
};
use std::{collections::VecDeque, sync::Mutex};

/// A mutating call observed by [`MockGitProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Stash,
    SwitchTo(String),
    DeleteBranch { name: String, force: bool },
    StashPaths(Vec<String>),
}

#[derive(Default)]
pub struct MockGitProvider {
    pub outside_repository: bool,
    /// Returned by `list_branches`; successful deletes remove the branch from it
    pub branch_set: Mutex<BranchSet>,
    pub list_branches_error: Mutex<Option<GitError>>,
    /// Branches a safe delete refuses as unmerged
    pub unmerged: Vec<String>,
    pub delete_results: Mutex<VecDeque<Result<()>>>,
    pub stash_result: Mutex<Option<Result<()>>>,
    pub switch_result: Mutex<Option<Result<()>>>,
    pub changes: Vec<String>,
    pub stash_paths_result: Mutex<Option<Result<()>>>,
    pub calls: Mutex<Vec<GitCall>>,
}

impl MockGitProvider {
    pub fn with_branches(current: &str, branches: &[&str]) -> Self {
        Self {
            branch_set: Mutex::new(BranchSet::new(
                Some(Branch::new(current)),
                branches.iter().map(|name| Branch::new(*name)).collect(),
            )),
            ..Default::default()
        }
    }

    pub fn recorded_calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitProvider for MockGitProvider {
    fn is_inside_repository(&self) -> bool {
        !self.outside_repository
    }

    fn list_branches(&self) -> Result<BranchSet> {
        if let Some(error) = self.list_branches_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.branch_set.lock().unwrap().clone())
    }

    fn stash(&self) -> Result<()> {
        self.record(GitCall::Stash);
        self.stash_result.lock().unwrap().take().unwrap_or(Ok(()))
    }

    fn switch_to(&self, branch: &Branch) -> Result<()> {
        self.record(GitCall::SwitchTo(branch.name.clone()));
        self.switch_result.lock().unwrap().take().unwrap_or(Ok(()))
    }

    fn delete_branch(&self, branch: &Branch, force: bool) -> Result<()> {
        self.record(GitCall::DeleteBranch {
            name: branch.name.clone(),
            force,
        });

        if let Some(result) = self.delete_results.lock().unwrap().pop_front() {
            return result;
        }
        if !force && self.unmerged.contains(&branch.name) {
            return Err(GitError::UnmergedBranch {
                branch: branch.name.clone(),
            });
        }

        let mut set = self.branch_set.lock().unwrap();
        let remaining = set
            .branches
            .iter()
            .filter(|b| *b != branch)
            .cloned()
            .collect();
        *set = BranchSet::new(set.current.clone(), remaining);
        Ok(())
    }

    fn list_changes(&self) -> Result<Vec<String>> {
        Ok(self.changes.clone())
    }

    fn stash_paths(&self, paths: &[String]) -> Result<()> {
        self.record(GitCall::StashPaths(paths.to_vec()));
        self.stash_paths_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(()))
    }
}
