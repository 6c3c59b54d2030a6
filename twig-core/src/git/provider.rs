use super::{
    branch::{Branch, BranchSet},
    error::Result,
};

pub trait GitProvider: Send + Sync {
    /// Whether the working directory is inside a git work tree
    fn is_inside_repository(&self) -> bool;
    fn list_branches(&self) -> Result<BranchSet>;
    /// Set local modifications aside with `git stash`
    fn stash(&self) -> Result<()>;
    fn switch_to(&self, branch: &Branch) -> Result<()>;
    /// Delete a local branch. A refused safe delete of an unmerged branch is reported as
    /// [`GitError::UnmergedBranch`](super::GitError::UnmergedBranch).
    fn delete_branch(&self, branch: &Branch, force: bool) -> Result<()>;
    /// Paths with uncommitted changes, including untracked files
    fn list_changes(&self) -> Result<Vec<String>>;
    fn stash_paths(&self, paths: &[String]) -> Result<()>;
}
