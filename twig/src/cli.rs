use serde::Serialize;
use std::fmt::Write;
use twig_core::{
    git::{BranchSet, GitError, GitProvider},
    list::ListSignal,
    stash::StashState,
};
use twig_tui::Theme;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    /// A git or terminal failure at runtime
    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    /// Bad configuration or usage
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u8 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::runtime(format!("{value:#}"))
    }
}

impl From<GitError> for CliError {
    fn from(value: GitError) -> Self {
        Self::runtime(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct BranchListOutput<'a> {
    current: Option<&'a str>,
    branches: Vec<&'a str>,
}

impl<'a> From<&'a BranchSet> for BranchListOutput<'a> {
    fn from(set: &'a BranchSet) -> Self {
        Self {
            current: set.current_name(),
            branches: set.branches.iter().map(|b| b.name.as_str()).collect(),
        }
    }
}

fn format_branch_list(set: &BranchSet) -> String {
    let mut out = String::new();
    if let Some(current) = set.current_name() {
        let _ = writeln!(out, "* {current}");
    }
    for branch in &set.branches {
        let _ = writeln!(out, "  {branch}");
    }
    out
}

pub fn cmd_list(git: &dyn GitProvider, json: bool) -> CliResult<()> {
    let set = git.list_branches()?;
    if json {
        print_json(&BranchListOutput::from(&set))?;
    } else {
        print!("{}", format_branch_list(&set));
    }
    Ok(())
}

pub fn cmd_stash(git: &dyn GitProvider, theme: &Theme) -> CliResult<()> {
    let mut stash = StashState::new(git.list_changes()?);

    let mut terminal = ratatui::init();
    let signal = twig_tui::run_stash(&mut terminal, &mut stash, theme);
    ratatui::restore();

    match signal? {
        ListSignal::Canceled => {
            println!("user canceled");
            Ok(())
        }
        ListSignal::Finished => apply_stash(git, &stash.staged),
    }
}

fn apply_stash(git: &dyn GitProvider, staged: &[String]) -> CliResult<()> {
    if staged.is_empty() {
        println!("No changes selected");
        return Ok(());
    }
    log::info!("stashing {} path(s)", staged.len());
    git.stash_paths(staged)?;
    println!("changes stashed!");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value).map_err(|e| CliError::runtime(e.to_string()))?
    );
    Ok(())
}

pub fn print_error(error: &CliError) {
    eprintln!("{}", error.message());
}
