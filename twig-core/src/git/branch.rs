use serde::Serialize;
use std::fmt;

/// A local branch. Two branches are equal when their names are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Branch {
    pub name: String,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AsRef<str> for Branch {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Snapshot of the repository's local branches, in listing order.
///
/// `current` is never repeated inside `branches`, so everything in `branches` is a valid
/// switch or delete target. Sets are replaced wholesale on refresh, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchSet {
    pub current: Option<Branch>,
    pub branches: Vec<Branch>,
}

impl BranchSet {
    pub fn new(current: Option<Branch>, branches: Vec<Branch>) -> Self {
        let branches = match &current {
            Some(current) => branches.into_iter().filter(|b| b != current).collect(),
            None => branches,
        };
        Self { current, branches }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b.name == name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
