pub mod branch;
pub mod cli;
pub mod error;
pub mod mock;
pub mod provider;

pub use branch::{Branch, BranchSet};
pub use cli::CliGitProvider;
pub use error::{GitError, Result};
pub use provider::GitProvider;

use regex::Regex;
use std::sync::LazyLock;

/// Marker git prints before the checked-out branch.
const CURRENT_MARKER: char = '*';
/// Marker git prints before branches checked out in another worktree.
const WORKTREE_MARKER: &str = "+ ";

/// Diagnostics git emits when `branch -d` refuses an unmerged branch. Older versions say
/// "is not fully merged.", newer ones add a `git branch -D` hint.
static UNMERGED_DIAGNOSTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)not fully merged|git branch -D").expect("unmerged pattern is valid")
});

/// Parse `git branch` output into a branch set
pub fn parse_branch_listing(output: &str) -> BranchSet {
    let mut current = None;
    let mut branches = Vec::new();

    for line in output.lines() {
        if let Some(rest) = line.strip_prefix(CURRENT_MARKER) {
            let name = rest.trim();
            if !name.is_empty() {
                current = Some(Branch::new(name));
            }
            continue;
        }

        let line = line.trim();
        let name = line.strip_prefix(WORKTREE_MARKER).unwrap_or(line).trim();
        if name.is_empty() {
            continue;
        }
        branches.push(Branch::new(name));
    }

    BranchSet::new(current, branches)
}

/// Whether a failed safe delete's stderr means "unmerged", as opposed to any other failure
pub fn is_unmerged_diagnostic(stderr: &str) -> bool {
    UNMERGED_DIAGNOSTIC.is_match(stderr)
}

/// Parse `git status --porcelain -z` output into the changed paths.
///
/// Renames and copies carry their original path as a separate entry; only the new path
/// is kept.
pub fn parse_status_porcelain(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut entries = output.split('\0');

    while let Some(entry) = entries.next() {
        if entry.len() < 4 {
            continue;
        }
        let (status, path) = entry.split_at(3);
        paths.push(path.to_string());
        if status.contains('R') || status.contains('C') {
            entries.next();
        }
    }

    paths
}
