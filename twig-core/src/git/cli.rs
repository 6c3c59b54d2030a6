use super::{
    branch::{Branch, BranchSet},
    error::{GitError, Result},
    is_unmerged_diagnostic, parse_branch_listing, parse_status_porcelain,
    provider::GitProvider,
};
use std::{
    io,
    path::PathBuf,
    process::{Command, Output},
};

/// Drives the `git` executable. Commands run in `work_dir`, or the process's current
/// directory when unset.
#[derive(Debug, Clone, Default)]
pub struct CliGitProvider {
    work_dir: Option<PathBuf>,
}

impl CliGitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run git with captured output, turning a non-zero exit into `CommandFailed`
    fn run(&self, args: &[&str]) -> Result<Output> {
        log::debug!("running git {}", args.join(" "));
        let output = self.git().args(args).output().map_err(spawn_error)?;

        if output.status.success() {
            return Ok(output);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::warn!("git {} failed ({}): {stderr}", args.join(" "), output.status);
        Err(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            status: output.status.to_string(),
            stderr,
        })
    }
}

fn spawn_error(error: io::Error) -> GitError {
    if error.kind() == io::ErrorKind::NotFound {
        GitError::Unavailable("git executable not found".to_string())
    } else {
        GitError::Io(error)
    }
}

impl GitProvider for CliGitProvider {
    fn is_inside_repository(&self) -> bool {
        // Errors out when no enclosing repository exists
        self.git()
            .args(["rev-parse", "--git-dir"])
            .output()
            .is_ok_and(|o| o.status.success())
    }

    fn list_branches(&self) -> Result<BranchSet> {
        let output = self.run(&["branch", "--no-color"]).map_err(|e| match e {
            GitError::CommandFailed { stderr, .. } => GitError::Unavailable(stderr),
            other => other,
        })?;
        Ok(parse_branch_listing(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn stash(&self) -> Result<()> {
        self.run(&["stash"]).map(|_| ())
    }

    fn switch_to(&self, branch: &Branch) -> Result<()> {
        // Output goes straight to the terminal
        log::debug!("running git switch {}", branch.name);
        let status = self
            .git()
            .args(["switch", &branch.name])
            .status()
            .map_err(spawn_error)?;

        if status.success() {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                command: format!("git switch {}", branch.name),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }

    fn delete_branch(&self, branch: &Branch, force: bool) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        match self.run(&["branch", flag, &branch.name]) {
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.trim().is_empty() {
                    // e.g. "deleting branch that has been merged to upstream, but not yet merged to HEAD"
                    log::info!("git branch {flag} {}: {}", branch.name, stderr.trim());
                }
                Ok(())
            }
            Err(GitError::CommandFailed { stderr, .. })
                if !force && is_unmerged_diagnostic(&stderr) =>
            {
                Err(GitError::UnmergedBranch {
                    branch: branch.name.clone(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn list_changes(&self) -> Result<Vec<String>> {
        let output = self.run(&["status", "--porcelain", "-z"])?;
        Ok(parse_status_porcelain(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn stash_paths(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["stash", "push", "-a", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};

    fn git_in(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn init_test_repo(dir: &Path) {
        git_in(dir, &["init"]);
        git_in(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git_in(dir, &["config", "user.email", "test@test.com"]);
        git_in(dir, &["config", "user.name", "Test"]);
        fs::write(dir.join("README.md"), "# test").unwrap();
        git_in(dir, &["add", "."]);
        git_in(dir, &["commit", "-m", "init"]);
    }

    fn commit_on_new_branch(dir: &Path, branch: &str) {
        git_in(dir, &["checkout", "-b", branch]);
        fs::write(dir.join(format!("{branch}.txt")), branch).unwrap();
        git_in(dir, &["add", "."]);
        git_in(dir, &["commit", "-m", branch]);
        git_in(dir, &["checkout", "main"]);
    }

    #[test]
    fn test_is_inside_repository() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        let plain = tmp.path().join("plain");
        fs::create_dir_all(&repo).unwrap();
        fs::create_dir_all(&plain).unwrap();
        init_test_repo(&repo);

        assert!(CliGitProvider::in_dir(&repo).is_inside_repository());
        assert!(!CliGitProvider::in_dir(&plain).is_inside_repository());
    }

    #[test]
    fn test_list_branches() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "feat/test"]);
        git_in(tmp.path(), &["branch", "dev"]);

        let set = CliGitProvider::in_dir(tmp.path()).list_branches().unwrap();
        assert_eq!(set.current_name(), Some("main"));
        assert_eq!(
            set.branches,
            vec![Branch::new("dev"), Branch::new("feat/test")]
        );
    }

    #[test]
    fn test_list_branches_outside_repo_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let result = CliGitProvider::in_dir(tmp.path()).list_branches();
        assert!(matches!(result, Err(GitError::Unavailable(_))));
    }

    #[test]
    fn test_safe_delete_merged_branch() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "merged"]);

        let git = CliGitProvider::in_dir(tmp.path());
        git.delete_branch(&Branch::new("merged"), false).unwrap();
        assert!(!git.list_branches().unwrap().contains("merged"));
    }

    #[test]
    fn test_safe_delete_unmerged_branch_is_distinguishable() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        commit_on_new_branch(tmp.path(), "feature-x");

        let git = CliGitProvider::in_dir(tmp.path());
        let err = git
            .delete_branch(&Branch::new("feature-x"), false)
            .unwrap_err();
        assert!(err.is_unmerged(), "unexpected error: {err}");
        assert!(git.list_branches().unwrap().contains("feature-x"));

        git.delete_branch(&Branch::new("feature-x"), true).unwrap();
        assert!(!git.list_branches().unwrap().contains("feature-x"));
    }

    #[test]
    fn test_delete_missing_branch_is_generic_failure() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let err = CliGitProvider::in_dir(tmp.path())
            .delete_branch(&Branch::new("nope"), false)
            .unwrap_err();
        assert!(matches!(err, GitError::CommandFailed { .. }));
    }

    #[test]
    fn test_switch_to() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "feature-y"]);

        let git = CliGitProvider::in_dir(tmp.path());
        git.switch_to(&Branch::new("feature-y")).unwrap();
        let set = git.list_branches().unwrap();
        assert_eq!(set.current_name(), Some("feature-y"));
        assert!(set.contains("main"));
    }

    #[test]
    fn test_switch_to_missing_branch_fails() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let result = CliGitProvider::in_dir(tmp.path()).switch_to(&Branch::new("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_stash_sets_changes_aside() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        fs::write(tmp.path().join("README.md"), "# changed").unwrap();

        let git = CliGitProvider::in_dir(tmp.path());
        assert_eq!(git.list_changes().unwrap(), vec!["README.md"]);
        git.stash().unwrap();
        assert!(git.list_changes().unwrap().is_empty());
    }

    #[test]
    fn test_stash_paths_only_stashes_selected() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        fs::write(tmp.path().join("README.md"), "# changed").unwrap();
        fs::write(tmp.path().join("scratch.txt"), "untracked").unwrap();

        let git = CliGitProvider::in_dir(tmp.path());
        let mut changes = git.list_changes().unwrap();
        changes.sort();
        assert_eq!(changes, vec!["README.md", "scratch.txt"]);

        git.stash_paths(&["scratch.txt".to_string()]).unwrap();
        assert_eq!(git.list_changes().unwrap(), vec!["README.md"]);
        assert!(!tmp.path().join("scratch.txt").exists());
    }
}
