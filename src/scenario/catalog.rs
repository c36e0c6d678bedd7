// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Built-in scenario catalog.

use crate::{
    interpreter::MOCK_FILES,
    repo::StateOverride,
    scenario::{Attempt, Catalog, Level, Scenario, Validator, ValidatorError},
};

use regex::Regex;
use std::sync::LazyLock;

static MERGE_FEATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git\s+merge\s+(--no-ff\s+)?feature$").expect("valid regex"));

/// Scenarios that teach branching.
pub const BRANCHING: &[&str] = &["beg-07", "beg-09", "beg-10", "beg-12", "int-01", "int-02"];

/// Construct the catalog that ships with the playground.
pub fn builtin() -> Catalog {
    let mut scenarios = Vec::new();
    scenarios.extend(beginner());
    scenarios.extend(intermediate());
    scenarios.extend(advanced());
    Catalog::new(scenarios)
}

// INVARIANT: Built-in patterns are literals known to compile.
fn pattern(source: &str) -> Validator {
    Validator::pattern(source).expect("valid built-in pattern")
}

fn beginner() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "beg-01",
            "Initialize a Repository",
            Level::Beginner,
            "Turn the current directory into a Git repository.",
            pattern(r"^git\s+init$"),
        )
        .with_hint("git init"),
        Scenario::new(
            "beg-02",
            "Check the Status",
            Level::Beginner,
            "Ask Git what state the working tree is in.",
            pattern(r"^git\s+status$"),
        )
        .with_hint("git status"),
        Scenario::new(
            "beg-03",
            "Stage a Single File",
            Level::Beginner,
            "Stage index.html so it becomes part of the next commit.",
            Validator::predicate(|attempt| {
                attempt.state.staged_files().iter().any(|file| file == "index.html")
            }),
        )
        .with_hint("git add index.html"),
        Scenario::new(
            "beg-04",
            "Stage Everything",
            Level::Beginner,
            "Stage every changed file in the project with one command.",
            Validator::predicate(|attempt| {
                MOCK_FILES
                    .iter()
                    .all(|file| attempt.state.staged_files().iter().any(|staged| staged == file))
            }),
        )
        .with_hint("git add ."),
        Scenario::new(
            "beg-05",
            "View the History",
            Level::Beginner,
            "Someone has been busy. Look at the commit history.",
            pattern(r"^git\s+log\b"),
        )
        .with_hint("git log")
        .with_initial_state(StateOverride::default().with_commits([
            "Initial commit",
            "Add landing page",
            "Fix typo in README",
        ])),
        Scenario::new(
            "beg-06",
            "Make Your First Commit",
            Level::Beginner,
            "index.html is already staged. Commit it with a message.",
            Validator::predicate(|attempt| {
                !attempt.state.commits().is_empty() && attempt.state.staged_files().is_empty()
            }),
        )
        .with_hint("git commit -m \"Initial setup\"")
        .with_initial_state(StateOverride::default().with_staged(["index.html"])),
        Scenario::new(
            "beg-07",
            "Create a Branch",
            Level::Beginner,
            "Create a new branch called feature without switching to it.",
            Validator::predicate(|attempt| {
                attempt.state.has_branch("feature") && attempt.state.current_branch() == "main"
            }),
        )
        .with_hint("git branch feature"),
        Scenario::new(
            "beg-08",
            "List Branches",
            Level::Beginner,
            "Find out which branches exist in this repository.",
            pattern(r"^git\s+branch(\s+(-a|-r|--list|-v))?$"),
        )
        .with_hint("git branch")
        .with_initial_state(StateOverride::default().with_branches(["main", "develop", "feature"])),
        Scenario::new(
            "beg-09",
            "Switch Branches",
            Level::Beginner,
            "Move over to the develop branch.",
            Validator::predicate(|attempt| attempt.state.current_branch() == "develop"),
        )
        .with_hint("git checkout develop")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "develop"])
                .with_branch("main"),
        ),
        Scenario::new(
            "beg-10",
            "Create and Switch in One Step",
            Level::Beginner,
            "Create a branch called hotfix and switch to it with a single command.",
            Validator::predicate(|attempt| {
                attempt.state.current_branch() == "hotfix"
                    && (attempt.last_was("git checkout -b") || attempt.last_was("git switch -c"))
            }),
        )
        .with_hint("git checkout -b hotfix"),
        Scenario::new(
            "beg-11",
            "Inspect Changes",
            Level::Beginner,
            "See exactly what changed in your files before staging them.",
            pattern(r"^git\s+diff\b"),
        )
        .with_hint("git diff"),
        Scenario::new(
            "beg-12",
            "Rename a Branch",
            Level::Beginner,
            "The default branch is still called master. Rename it to main-v2.",
            Validator::predicate(|attempt| {
                attempt.state.current_branch() == "main-v2" && !attempt.state.has_branch("master")
            }),
        )
        .with_hint("git branch -m main-v2")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["master"])
                .with_branch("master"),
        ),
    ]
}

fn intermediate() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "int-01",
            "Delete a Merged Branch",
            Level::Intermediate,
            "old-feature has been merged already. Clean it up.",
            Validator::predicate(|attempt| !attempt.state.has_branch("old-feature")),
        )
        .with_hint("git branch -d old-feature")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "old-feature"])
                .with_commits(["Initial commit", "Finish old feature"]),
        ),
        Scenario::new(
            "int-02",
            "Merge a Feature",
            Level::Intermediate,
            "You are on main. Bring the work from the feature branch into it.",
            Validator::predicate(|attempt| {
                attempt.state.current_branch() == "main" && MERGE_FEATURE.is_match(attempt.last_command)
            }),
        )
        .with_hint("git merge feature")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "feature"])
                .with_commits(["Initial commit", "Add login form"]),
        ),
        Scenario::new(
            "int-03",
            "Stash Your Work",
            Level::Intermediate,
            "You need to switch tasks. Shelve your uncommitted changes.",
            pattern(r"^git\s+stash(\s+(push|save))?(\s+-m\s+.+)?$"),
        )
        .with_hint("git stash")
        .with_initial_state(StateOverride::default().with_commits(["Initial commit"])),
        Scenario::new(
            "int-04",
            "Restore Stashed Work",
            Level::Intermediate,
            "Stash your changes, then bring them back.",
            Validator::fallible(restored_stash),
        )
        .with_hint("git stash, then git stash pop")
        .with_initial_state(StateOverride::default().with_commits(["Initial commit"])),
        Scenario::new(
            "int-05",
            "Compact History",
            Level::Intermediate,
            "Show the commit history with one line per commit.",
            pattern(r"^git\s+log\b.*--oneline"),
        )
        .with_hint("git log --oneline")
        .with_initial_state(StateOverride::default().with_commits([
            "Initial commit",
            "Add navbar",
            "Style navbar",
            "Fix mobile layout",
        ])),
        Scenario::new(
            "int-06",
            "Publish a Branch",
            Level::Intermediate,
            "Push the feature branch to origin and set it as upstream.",
            pattern(r"^git\s+push\s+(-u|--set-upstream)\s+origin\s+feature$"),
        )
        .with_hint("git push -u origin feature")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "feature"])
                .with_branch("feature")
                .with_commits(["Initial commit", "Add search"]),
        ),
        Scenario::new(
            "int-07",
            "Sync with the Remote",
            Level::Intermediate,
            "Your teammates pushed new work. Fetch and merge it in one go.",
            pattern(r"^git\s+pull\b"),
        )
        .with_hint("git pull"),
        Scenario::new(
            "int-08",
            "Inspect Remotes",
            Level::Intermediate,
            "List the configured remotes along with their URLs.",
            pattern(r"^git\s+remote\s+(-v|--verbose)$"),
        )
        .with_hint("git remote -v"),
        Scenario::new(
            "int-09",
            "Full Commit Cycle",
            Level::Intermediate,
            "Stage your changes and commit them, starting from a clean slate.",
            Validator::predicate(|attempt| {
                attempt.ran("git add")
                    && attempt.last_was("git commit")
                    && !attempt.state.commits().is_empty()
                    && attempt.state.staged_files().is_empty()
            }),
        )
        .with_hint("git add . then git commit -m \"message\""),
    ]
}

fn advanced() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "adv-01",
            "Rebase onto Main",
            Level::Advanced,
            "Replay your feature branch on top of the latest main.",
            pattern(r"^git\s+rebase\s+main$"),
        )
        .with_hint("git rebase main")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "feature"])
                .with_branch("feature")
                .with_commits(["Initial commit", "Start feature"]),
        ),
        Scenario::new(
            "adv-02",
            "Cherry-pick a Fix",
            Level::Advanced,
            "Apply a single commit from another branch onto the current one.",
            pattern(r"^git\s+cherry-pick\s+[0-9a-f]{7,40}$"),
        )
        .with_hint("git log to find the hash, then git cherry-pick <hash>")
        .with_initial_state(
            StateOverride::default()
                .with_branches(["main", "hotfix"])
                .with_commits(["Initial commit", "Fix crash on startup"]),
        ),
        Scenario::new(
            "adv-03",
            "Undo Softly",
            Level::Advanced,
            "Undo the last commit but keep its changes staged.",
            pattern(r"^git\s+reset\s+--soft\s+HEAD(~1|\^)$"),
        )
        .with_hint("git reset --soft HEAD~1")
        .with_initial_state(StateOverride::default().with_commits(["Initial commit", "Oops"])),
        Scenario::new(
            "adv-04",
            "Hunt the Bug",
            Level::Advanced,
            "Start a bisect session and mark the current commit as bad.",
            Validator::predicate(|attempt| {
                attempt.ran("git bisect start") && attempt.last_was("git bisect bad")
            }),
        )
        .with_hint("git bisect start, then git bisect bad")
        .with_initial_state(StateOverride::default().with_commits([
            "Initial commit",
            "Add parser",
            "Refactor parser",
            "Break everything",
        ])),
        Scenario::new(
            "adv-05",
            "Tag a Release",
            Level::Advanced,
            "Mark the current commit as release v1.0.0.",
            pattern(r"^git\s+tag\s+(-a\s+)?v1\.0\.0\b"),
        )
        .with_hint("git tag -a v1.0.0 -m \"First release\"")
        .with_initial_state(StateOverride::default().with_commits(["Initial commit", "Ship it"])),
        Scenario::new(
            "adv-06",
            "Feature Branch Workflow",
            Level::Advanced,
            "Create a feature branch, commit work on it, go back to main, and merge it.",
            Validator::predicate(|attempt| {
                attempt.state.current_branch() == "main"
                    && attempt.state.has_branch("feature")
                    && (attempt.ran("git checkout -b feature") || attempt.ran("git switch -c feature"))
                    && attempt.ran("git commit")
                    && MERGE_FEATURE.is_match(attempt.last_command)
            }),
        )
        .with_hint("git checkout -b feature, git add ., git commit -m ..., git checkout main, git merge feature"),
    ]
}

fn restored_stash(attempt: &Attempt<'_>) -> Result<bool, ValidatorError> {
    if !(attempt.last_was("git stash pop") || attempt.last_was("git stash apply")) {
        return Ok(false);
    }

    // INVARIANT: The restoring command itself is the last history entry.
    let (_, earlier) = attempt
        .history
        .split_last()
        .ok_or_else(|| ValidatorError("history does not contain the last command".into()))?;

    Ok(earlier
        .iter()
        .any(|line| line == "git stash" || line.starts_with("git stash push") || line.starts_with("git stash save")))
}
