// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Mock repository state.
//!
//! The playground never touches a real Git repository. Instead it keeps a
//! small in-memory record of what a repository would look like: the current
//! branch, the set of branches, the staging area, and the commit log. This
//! state is created once per session and mutated in place by the interpreter.
//!
//! # Invariants
//!
//! - The current branch is always a member of the branch set.
//! - The staging area is empty right after a commit.
//! - The commit log only ever grows.

use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the branch every fresh repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// Display-only working directory of a fresh session.
pub const DEFAULT_DIRECTORY: &str = "~/my-project";

/// Date layout used by `git log`.
const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

/// Single entry in the commit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Short hexadecimal identifier.
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

impl Commit {
    /// Construct new commit stamped with the current local time.
    pub fn new(message: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            hash: short_hash(),
            message: message.into(),
            author: author.into(),
            date: Local::now().format(DATE_FORMAT).to_string(),
        }
    }
}

/// Generate random seven digit hexadecimal token.
///
/// Collisions are not guarded against.
pub fn short_hash() -> String {
    let value: u32 = rand::rng().random_range(0..0x1000_0000);
    format!("{value:07x}")
}

/// In-memory record of a mock repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    current_directory: String,
    current_branch: String,
    branches: BTreeSet<String>,
    staged_files: Vec<String>,

    /// Most recent first.
    commits: Vec<Commit>,
    command_history: Vec<String>,
}

impl Default for RepositoryState {
    fn default() -> Self {
        Self {
            current_directory: DEFAULT_DIRECTORY.into(),
            current_branch: DEFAULT_BRANCH.into(),
            branches: BTreeSet::from([DEFAULT_BRANCH.to_owned()]),
            staged_files: Vec::new(),
            commits: Vec::new(),
            command_history: Vec::new(),
        }
    }
}

impl RepositoryState {
    /// Construct fresh repository state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    /// Branch names in sorted order.
    pub fn branches(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(String::as_str)
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains(name)
    }

    pub fn staged_files(&self) -> &[String] {
        &self.staged_files
    }

    /// Commit log, most recent first.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Most recent commit, if any.
    pub fn head(&self) -> Option<&Commit> {
        self.commits.first()
    }

    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    /// Forget everything and start over with a single "main" branch.
    ///
    /// Commit log and history are left alone, since `git init` inside an
    /// existing repository does not throw away its objects.
    pub fn reinitialize(&mut self) {
        self.branches = BTreeSet::from([DEFAULT_BRANCH.to_owned()]);
        self.current_branch = DEFAULT_BRANCH.into();
    }

    /// Add new branch.
    ///
    /// Returns `false` if the branch already exists.
    pub fn create_branch(&mut self, name: impl Into<String>) -> bool {
        self.branches.insert(name.into())
    }

    /// Remove existing branch.
    ///
    /// # Errors
    ///
    /// - Return [`BranchError::NotFound`] if no such branch exists.
    /// - Return [`BranchError::CheckedOut`] if the branch is the current one.
    pub fn delete_branch(&mut self, name: &str) -> Result<(), BranchError> {
        if name == self.current_branch {
            return Err(BranchError::CheckedOut(name.to_owned()));
        }

        if !self.branches.remove(name) {
            return Err(BranchError::NotFound(name.to_owned()));
        }

        Ok(())
    }

    /// Rename current branch in place.
    ///
    /// # Errors
    ///
    /// - Return [`BranchError::AlreadyExists`] if the new name is taken.
    pub fn rename_current_branch(&mut self, new_name: impl Into<String>) -> Result<(), BranchError> {
        let current = self.current_branch.clone();
        self.rename_branch(&current, new_name)
    }

    /// Rename any branch, following it if it is the current one.
    ///
    /// # Errors
    ///
    /// - Return [`BranchError::NotFound`] if the old branch does not exist.
    /// - Return [`BranchError::AlreadyExists`] if the new name is taken.
    pub fn rename_branch(&mut self, old_name: &str, new_name: impl Into<String>) -> Result<(), BranchError> {
        let new_name = new_name.into();
        if !self.branches.contains(old_name) {
            return Err(BranchError::NotFound(old_name.to_owned()));
        }

        if new_name == old_name {
            return Ok(());
        }

        if self.branches.contains(&new_name) {
            return Err(BranchError::AlreadyExists(new_name));
        }

        self.branches.remove(old_name);
        self.branches.insert(new_name.clone());
        if self.current_branch == old_name {
            self.current_branch = new_name;
        }

        Ok(())
    }

    /// Switch to existing branch.
    ///
    /// # Errors
    ///
    /// - Return [`BranchError::NotFound`] if no such branch exists.
    pub fn switch_branch(&mut self, name: &str) -> Result<(), BranchError> {
        if !self.branches.contains(name) {
            return Err(BranchError::NotFound(name.to_owned()));
        }

        self.current_branch = name.to_owned();
        Ok(())
    }

    /// Queue file path for the next commit.
    pub fn stage(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.staged_files.contains(&path) {
            self.staged_files.push(path);
        }
    }

    /// Record new commit at the front of the log and empty the staging area.
    pub fn commit(&mut self, message: impl Into<String>, author: impl Into<String>) -> &Commit {
        self.commits.insert(0, Commit::new(message, author));
        self.staged_files.clear();
        &self.commits[0]
    }

    /// Append raw input line to command history.
    pub fn record(&mut self, raw: impl Into<String>) {
        self.command_history.push(raw.into());
    }

    /// Reset everything to defaults, then apply overrides.
    ///
    /// Fields that the override leaves unspecified fall back to defaults
    /// rather than keeping their previous values.
    pub fn restore(&mut self, overrides: Option<&StateOverride>) {
        *self = Self::default();

        let Some(overrides) = overrides else {
            return;
        };

        if let Some(directory) = &overrides.current_directory {
            self.current_directory = directory.clone();
        }

        if let Some(branches) = &overrides.branches {
            self.branches = branches.iter().cloned().collect();
        }

        if let Some(branch) = &overrides.current_branch {
            self.current_branch = branch.clone();
        }

        // INVARIANT: Current branch must be a member of the branch set.
        if !self.branches.contains(&self.current_branch) {
            let current = match self.branches.first() {
                Some(first) if overrides.current_branch.is_none() => first.clone(),
                _ => self.current_branch.clone(),
            };
            self.branches.insert(current.clone());
            self.current_branch = current;
        }

        if let Some(staged) = &overrides.staged_files {
            for path in staged {
                self.stage(path.as_str());
            }
        }

        if let Some(commits) = &overrides.commits {
            // INVARIANT: Seeds are listed oldest first, log is newest first.
            self.commits = commits
                .iter()
                .rev()
                .map(|seed| Commit {
                    hash: seed.hash.clone().unwrap_or_else(short_hash),
                    message: seed.message.clone(),
                    author: seed.author.clone().unwrap_or_else(|| "You".into()),
                    date: Local::now().format(DATE_FORMAT).to_string(),
                })
                .collect();
        }
    }
}

/// Partial repository state applied when a scenario loads.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateOverride {
    pub current_directory: Option<String>,
    pub current_branch: Option<String>,
    pub branches: Option<Vec<String>>,
    pub staged_files: Option<Vec<String>>,

    /// Seed commits, oldest first.
    pub commits: Option<Vec<CommitSeed>>,
}

impl StateOverride {
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.current_branch = Some(branch.into());
        self
    }

    pub fn with_branches(mut self, branches: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_staged(mut self, files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.staged_files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_commits(mut self, messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.commits = Some(
            messages
                .into_iter()
                .map(|message| CommitSeed {
                    message: message.into(),
                    ..Default::default()
                })
                .collect(),
        );
        self
    }
}

/// Commit entry used to pre-populate the log.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommitSeed {
    pub message: String,
    pub hash: Option<String>,
    pub author: Option<String>,
}

/// Branch manipulation failures.
///
/// These are reported to the user as git-style error lines. They never halt
/// the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BranchError {
    #[error("branch '{0}' not found")]
    NotFound(String),

    #[error("a branch named '{0}' already exists")]
    AlreadyExists(String),

    #[error("cannot delete branch '{0}' while it is checked out")]
    CheckedOut(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_state_starts_on_main() {
        let state = RepositoryState::new();
        assert_eq!(state.current_branch(), "main");
        assert_eq!(state.branches().collect::<Vec<_>>(), vec!["main"]);
        assert!(state.staged_files().is_empty());
        assert!(state.commits().is_empty());
    }

    #[test]
    fn commit_clears_staging_and_prepends() {
        let mut state = RepositoryState::new();
        state.stage("a.txt");
        state.commit("first", "You");
        state.stage("b.txt");
        state.stage("b.txt");
        assert_eq!(state.staged_files(), ["b.txt"]);
        state.commit("second", "You");

        assert!(state.staged_files().is_empty());
        let messages = state.commits().iter().map(|c| c.message.as_str()).collect::<Vec<_>>();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(state.head().map(|c| c.hash.len()), Some(7));
    }

    #[test]
    fn rename_keeps_invariant() -> anyhow::Result<()> {
        let mut state = RepositoryState::new();
        state.rename_current_branch("trunk")?;
        assert_eq!(state.current_branch(), "trunk");
        assert!(!state.has_branch("main"));
        assert!(state.has_branch("trunk"));

        state.create_branch("dev");
        assert_eq!(
            state.rename_current_branch("dev"),
            Err(BranchError::AlreadyExists("dev".into()))
        );

        Ok(())
    }

    #[test]
    fn delete_refuses_checked_out_branch() {
        let mut state = RepositoryState::new();
        assert_eq!(
            state.delete_branch("main"),
            Err(BranchError::CheckedOut("main".into()))
        );
        assert_eq!(
            state.delete_branch("ghost"),
            Err(BranchError::NotFound("ghost".into()))
        );
        assert!(state.has_branch(state.current_branch()));
    }

    #[test]
    fn restore_falls_back_to_defaults() {
        let mut state = RepositoryState::new();
        let first = StateOverride::default()
            .with_branches(["main", "develop"])
            .with_branch("develop")
            .with_staged(["index.html"]);
        state.restore(Some(&first));
        assert_eq!(state.current_branch(), "develop");
        assert_eq!(state.staged_files(), ["index.html"]);

        let second = StateOverride::default().with_commits(["one", "two"]);
        state.restore(Some(&second));
        assert_eq!(state.current_branch(), "main");
        assert_eq!(state.branches().collect::<Vec<_>>(), vec!["main"]);
        assert!(state.staged_files().is_empty());
        assert_eq!(state.head().map(|c| c.message.as_str()), Some("two"));
    }

    #[test]
    fn restore_repairs_current_branch_membership() {
        let mut state = RepositoryState::new();
        state.restore(Some(&StateOverride::default().with_branch("master")));
        assert_eq!(state.current_branch(), "master");
        assert!(state.has_branch("master"));

        state.restore(Some(&StateOverride::default().with_branches(["develop"])));
        assert_eq!(state.current_branch(), "develop");
    }
}
