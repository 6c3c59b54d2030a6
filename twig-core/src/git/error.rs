use thiserror::Error;

/// Failures reported by a [`GitProvider`](super::GitProvider).
#[derive(Debug, Error)]
pub enum GitError {
    #[error("git is unavailable: {0}")]
    Unavailable(String),

    #[error("must be in Git repo")]
    NotARepository,

    /// A safe delete was refused because the branch has commits not merged into HEAD.
    #[error("branch '{branch}' is not fully merged")]
    UnmergedBranch { branch: String },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GitError {
    pub fn is_unmerged(&self) -> bool {
        matches!(self, Self::UnmergedBranch { .. })
    }
}

pub type Result<T> = std::result::Result<T, GitError>;
