// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Simulated Git command interpreter.
//!
//! Maps parsed `git` invocations onto transitions of the mock
//! [`RepositoryState`], and produces terminal output describing what
//! happened. The interpreter has exactly one state, ready. Every command runs
//! to completion synchronously, and every failure is reported as output
//! rather than as a Rust error.
//!
//! # Command Kinds
//!
//! Commands that actually touch repository state, e.g., `add`, `commit`,
//! `branch`, `checkout`, are modeled as variants of [`GitCommand`]. Dozens of
//! other subcommands carry no state effect at all. Those are answered from a
//! table of canned templates, see [`CANNED`].

use crate::{
    parser::{commit_message, CommitMessage, ParsedCommand},
    repo::{short_hash, BranchError, RepositoryState},
    terminal::Output,
};

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Files staged by `git add .` since no real file system is modeled.
pub const MOCK_FILES: &[&str] = &["index.html", "style.css", "script.js", "README.md"];

/// Remote URL shown by remote-facing commands.
const ORIGIN_URL: &str = "https://github.com/you/my-project.git";

/// Stand-in identity of HEAD before the first commit.
const UNBORN_HASH: &str = "a1b2c3d";
const UNBORN_MESSAGE: &str = "Initial commit";

static TEMPLATE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));

/// Kind of `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// `git` without a subcommand.
    Usage,
    Init,
    Clone(Option<String>),
    Status,
    Add(Vec<String>),
    Commit { message: CommitMessage, all: bool },
    Push { upstream: bool },
    Pull,
    Fetch,
    Branch(BranchOp),
    Checkout(CheckoutOp),
    Switch(CheckoutOp),
    Merge(MergeOp),
    Log(LogFormat),
    Diff { staged: bool },
    Stash(StashOp),
    Reset { mode: ResetMode, target: Option<String> },

    /// Stateless subcommand answered from [`CANNED`].
    Canned(&'static str),

    /// Anything else.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOp {
    List { remotes: bool },
    Create(String),
    Delete(Option<String>),
    Rename { old: Option<String>, new: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOp {
    /// Nothing to check out.
    Missing,

    /// Switch to existing branch, or restore a path.
    Target(String),

    /// Create branch then switch to it. `None` if the name is missing.
    Create(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOp {
    Missing,
    Abort,
    Branch(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogFormat {
    pub oneline: bool,
    pub graph: bool,
    pub stat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashOp {
    Push,
    Apply,
    Pop,
    List,
    Drop,
    Show,
    Clear,
    Unknown(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    Soft,
    #[default]
    Mixed,
    Hard,
}

impl From<&ParsedCommand> for GitCommand {
    fn from(parsed: &ParsedCommand) -> Self {
        let Some(sub) = parsed.sub_command.as_deref() else {
            return Self::Usage;
        };

        match sub {
            "init" => Self::Init,
            "clone" => Self::Clone(parsed.positional().next().map(str::to_owned)),
            "status" => Self::Status,
            "add" => Self::Add(parsed.args.clone()),
            "commit" => Self::Commit {
                message: commit_message(&parsed.raw),
                all: commits_all(parsed),
            },
            "push" => Self::Push {
                upstream: parsed.has_flag("-u") || parsed.has_flag("--set-upstream"),
            },
            "pull" => Self::Pull,
            "fetch" => canned_template(sub, parsed.arg(0)).map_or(Self::Fetch, Self::Canned),
            "branch" => Self::Branch(branch_op(parsed)),
            "checkout" => Self::Checkout(checkout_op(parsed, "-b")),
            "switch" => Self::Switch(checkout_op(parsed, "-c")),
            "merge" => Self::Merge(merge_op(parsed)),
            "log" => Self::Log(LogFormat {
                oneline: parsed.has_flag("--oneline"),
                graph: parsed.has_flag("--graph"),
                stat: parsed.has_flag("--stat"),
            }),
            "diff" => Self::Diff {
                staged: parsed.has_flag("--staged") || parsed.has_flag("--cached"),
            },
            "stash" => Self::Stash(stash_op(parsed)),
            "reset" => Self::Reset {
                mode: if parsed.has_flag("--soft") {
                    ResetMode::Soft
                } else if parsed.has_flag("--hard") {
                    ResetMode::Hard
                } else {
                    ResetMode::Mixed
                },
                target: parsed.positional().next().map(str::to_owned),
            },
            _ => match canned_template(sub, parsed.arg(0)) {
                Some(template) => Self::Canned(template),
                None => Self::Unknown(sub.to_owned()),
            },
        }
    }
}

fn commits_all(parsed: &ParsedCommand) -> bool {
    // INVARIANT: Only look at flags before the message text starts.
    parsed
        .args
        .iter()
        .take_while(|arg| arg.starts_with('-'))
        .any(|arg| {
            arg == "--all" || (!arg.starts_with("--") && arg[1..].contains('a'))
        })
}

fn branch_op(parsed: &ParsedCommand) -> BranchOp {
    let positional = parsed.positional().map(str::to_owned).collect::<Vec<_>>();
    let flag = parsed.args.iter().find(|arg| arg.starts_with('-'));

    match flag.map(String::as_str) {
        Some("-d" | "-D" | "--delete") => BranchOp::Delete(positional.into_iter().next()),
        Some("-m" | "-M" | "--move") => {
            let mut names = positional.into_iter();
            match (names.next(), names.next()) {
                (Some(old), Some(new)) => BranchOp::Rename {
                    old: Some(old),
                    new: Some(new),
                },
                (new, _) => BranchOp::Rename { old: None, new },
            }
        }
        Some("-a" | "-r" | "--all" | "--remotes") => BranchOp::List { remotes: true },
        _ => match positional.into_iter().next() {
            Some(name) => BranchOp::Create(name),
            None => BranchOp::List { remotes: false },
        },
    }
}

fn checkout_op(parsed: &ParsedCommand, create_flag: &str) -> CheckoutOp {
    if parsed.has_flag(create_flag) || parsed.has_flag("-B") || parsed.has_flag("-C") {
        return CheckoutOp::Create(parsed.positional().next().map(str::to_owned));
    }

    match parsed.positional().next() {
        Some(target) => CheckoutOp::Target(target.to_owned()),
        None if parsed.has_flag("--") => CheckoutOp::Target(".".into()),
        None => CheckoutOp::Missing,
    }
}

fn merge_op(parsed: &ParsedCommand) -> MergeOp {
    if parsed.has_flag("--abort") {
        return MergeOp::Abort;
    }

    match parsed.positional().next() {
        Some(target) => MergeOp::Branch(target.to_owned()),
        None => MergeOp::Missing,
    }
}

fn stash_op(parsed: &ParsedCommand) -> StashOp {
    match parsed.arg(0) {
        None | Some("push" | "save") => StashOp::Push,
        Some(flag) if flag.starts_with('-') => StashOp::Push,
        Some("apply") => StashOp::Apply,
        Some("pop") => StashOp::Pop,
        Some("list") => StashOp::List,
        Some("drop") => StashOp::Drop,
        Some("show") => StashOp::Show,
        Some("clear") => StashOp::Clear,
        Some(other) => StashOp::Unknown(other.to_owned()),
    }
}

/// Simulated Git command interpreter.
#[derive(Debug, Clone)]
pub struct Interpreter {
    author: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new("You <you@example.com>")
    }
}

impl Interpreter {
    /// Construct new interpreter that signs commits as `author`.
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Run one `git` invocation against repository state.
    #[instrument(skip(self, state, parsed), fields(raw = %parsed.raw), level = "debug")]
    pub fn execute(&self, state: &mut RepositoryState, parsed: &ParsedCommand) -> Output {
        let command = GitCommand::from(parsed);
        debug!("dispatch {command:?}");

        match command {
            GitCommand::Usage => usage(),
            GitCommand::Init => init(state),
            GitCommand::Clone(url) => clone(url.as_deref()),
            GitCommand::Status => status(state),
            GitCommand::Add(paths) => add(state, &paths),
            GitCommand::Commit { message, all } => self.commit(state, message, all),
            GitCommand::Push { upstream } => push(state, upstream),
            GitCommand::Pull => pull(state),
            GitCommand::Fetch => fetch(),
            GitCommand::Branch(op) => branch(state, op),
            GitCommand::Checkout(op) => checkout(state, op, false),
            GitCommand::Switch(op) => checkout(state, op, true),
            GitCommand::Merge(op) => merge(state, op),
            GitCommand::Log(format) => log(state, format),
            GitCommand::Diff { staged } => diff(state, staged),
            GitCommand::Stash(op) => stash(state, op),
            GitCommand::Reset { mode, target } => reset(state, mode, target.as_deref()),
            GitCommand::Canned(template) => {
                let mut out = Output::new();
                out.plain(self.expand(template, state, parsed));
                out
            }
            GitCommand::Unknown(sub) => {
                let mut out = Output::new();
                out.error(format!("git: '{sub}' is not a git command. See 'git --help'."));
                out
            }
        }
    }

    fn commit(&self, state: &mut RepositoryState, message: CommitMessage, all: bool) -> Output {
        let mut out = Output::new();
        let message = match message {
            CommitMessage::Text(message) => message,
            CommitMessage::Empty => {
                out.error("error: switch `m' requires a value");
                return out;
            }
            CommitMessage::Missing => {
                out.error("error: no commit message given");
                out.muted("hint: use git commit -m \"<message>\"");
                return out;
            }
        };

        if all && state.staged_files().is_empty() {
            for file in MOCK_FILES {
                state.stage(*file);
            }
        }

        if state.staged_files().is_empty() {
            out.plain(format!("On branch {}", state.current_branch()));
            out.plain("nothing to commit, working tree clean");
            return out;
        }

        let count = state.staged_files().len();
        let branch = state.current_branch().to_owned();
        let root = state.commits().is_empty();
        let commit = state.commit(message, self.author.clone());
        let marker = if root { " (root-commit)" } else { "" };

        out.success(format!("[{branch}{marker} {}] {}", commit.hash, commit.message));
        out.plain(format!(
            " {count} file{} changed, {} insertions(+)",
            plural(count),
            count * 12
        ));
        out
    }

    /// Fill in canned template placeholders from current state.
    ///
    /// Expansion is a single pass over the template, so substituted text
    /// that itself looks like a placeholder stays as written. Unknown fields,
    /// e.g., `HEAD@{0}`, are kept verbatim.
    fn expand(&self, template: &str, state: &RepositoryState, parsed: &ParsedCommand) -> String {
        let (head, head_message) = match state.head() {
            Some(commit) => (commit.hash.as_str(), commit.message.as_str()),
            None => (UNBORN_HASH, UNBORN_MESSAGE),
        };
        let arg = parsed
            .args
            .iter()
            .skip(1)
            .find(|arg| !arg.starts_with('-'))
            .or_else(|| parsed.args.first().filter(|arg| !arg.starts_with('-')))
            .map(String::as_str)
            .unwrap_or("HEAD");

        TEMPLATE_FIELD
            .replace_all(template, |field: &Captures<'_>| match &field[1] {
                "branch" => state.current_branch().to_owned(),
                "head_msg" => head_message.to_owned(),
                "head" => head.to_owned(),
                "new" => short_hash(),
                "arg" => arg.to_owned(),
                "dir" => state.current_directory().to_owned(),
                "author" => self.author.clone(),
                _ => field[0].to_owned(),
            })
            .into_owned()
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn usage() -> Output {
    let mut out = Output::new();
    out.plain("usage: git [--version] [--help] <command> [<args>]");
    out.muted("type `help` for the list of supported commands");
    out
}

fn init(state: &mut RepositoryState) -> Output {
    state.reinitialize();
    let mut out = Output::new();
    out.success(format!(
        "Initialized empty Git repository in {}/.git/",
        state.current_directory()
    ));
    out
}

fn clone(url: Option<&str>) -> Output {
    let mut out = Output::new();
    let Some(url) = url else {
        out.error("fatal: You must specify a repository to clone.");
        return out;
    };

    let name = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git");
    out.plain(format!("Cloning into '{name}'..."));
    out.muted(join_lines(&[
        "remote: Enumerating objects: 128, done.",
        "remote: Counting objects: 100% (128/128), done.",
        "remote: Compressing objects: 100% (87/87), done.",
        "remote: Total 128 (delta 41), reused 120 (delta 36), pack-reused 0",
        "Receiving objects: 100% (128/128), 42.17 KiB | 1.20 MiB/s, done.",
        "Resolving deltas: 100% (41/41), done.",
    ]));
    out
}

fn status(state: &RepositoryState) -> Output {
    let mut out = Output::new();
    out.plain(format!("On branch {}", state.current_branch()));

    if state.staged_files().is_empty() {
        out.plain("nothing to commit, working tree clean");
        return out;
    }

    out.plain("Changes to be committed:");
    out.muted("  (use \"git restore --staged <file>...\" to unstage)");
    for file in state.staged_files() {
        out.success(format!("\tnew file:   {file}"));
    }
    out
}

fn add(state: &mut RepositoryState, paths: &[String]) -> Output {
    let mut out = Output::new();
    let paths = paths
        .iter()
        .filter(|path| !matches!(path.as_str(), "-v" | "--verbose"))
        .collect::<Vec<_>>();

    if paths.is_empty() {
        out.plain("Nothing specified, nothing added.");
        out.muted("hint: Maybe you wanted to say 'git add .'?");
        return out;
    }

    for path in paths {
        match path.as_str() {
            "." | "-A" | "--all" | "*" => {
                for file in MOCK_FILES {
                    state.stage(*file);
                    out.success(format!("add '{file}'"));
                }
            }
            path => {
                state.stage(path);
                out.success(format!("add '{path}'"));
            }
        }
    }
    out
}

fn push(state: &RepositoryState, upstream: bool) -> Output {
    let mut out = Output::new();
    let branch = state.current_branch();
    let head = state.head().map_or(UNBORN_HASH, |commit| commit.hash.as_str());

    out.muted(join_lines(&[
        "Enumerating objects: 5, done.",
        "Counting objects: 100% (5/5), done.",
        "Writing objects: 100% (3/3), 312 bytes | 312.00 KiB/s, done.",
    ]));
    out.plain(format!("To {ORIGIN_URL}"));
    out.success(format!("   {}..{head}  {branch} -> {branch}", short_hash()));
    if upstream {
        out.info(format!("branch '{branch}' set up to track 'origin/{branch}'."));
    }
    out
}

fn pull(state: &RepositoryState) -> Output {
    let mut out = Output::new();
    out.muted("From github.com:you/my-project");
    out.muted(format!(
        " * branch            {} -> FETCH_HEAD",
        state.current_branch()
    ));
    out.plain("Already up to date.");
    out
}

fn fetch() -> Output {
    let mut out = Output::new();
    out.muted("From github.com:you/my-project");
    out.success(" * [new branch]      feature/login -> origin/feature/login");
    out
}

fn branch(state: &mut RepositoryState, op: BranchOp) -> Output {
    let mut out = Output::new();
    match op {
        BranchOp::List { remotes } => {
            let current = state.current_branch().to_owned();
            for name in state.branches() {
                if name == current {
                    out.success(format!("* {name}"));
                } else {
                    out.plain(format!("  {name}"));
                }
            }
            if remotes {
                out.muted("  remotes/origin/HEAD -> origin/main");
                out.muted("  remotes/origin/main");
            }
        }
        BranchOp::Create(name) => {
            if state.create_branch(name.clone()) {
                out.success(format!(
                    "Created branch '{name}' from '{}'",
                    state.current_branch()
                ));
            } else {
                out.error(format!("fatal: a branch named '{name}' already exists"));
            }
        }
        BranchOp::Delete(None) => {
            out.error("fatal: branch name required");
        }
        BranchOp::Delete(Some(name)) => match state.delete_branch(&name) {
            Ok(()) => {
                out.plain(format!("Deleted branch {name} (was {}).", short_hash()));
            }
            Err(BranchError::CheckedOut(name)) => {
                out.error(format!(
                    "error: Cannot delete branch '{name}' checked out at '{}'",
                    state.current_directory()
                ));
            }
            Err(_) => {
                out.error(format!("error: branch '{name}' not found."));
            }
        },
        BranchOp::Rename { new: None, .. } => {
            out.error("fatal: branch name required");
        }
        BranchOp::Rename { old, new: Some(new) } => {
            let old = old.unwrap_or_else(|| state.current_branch().to_owned());
            match state.rename_branch(&old, new.clone()) {
                Ok(()) => {
                    out.success(format!("Branch '{old}' renamed to '{new}'"));
                }
                Err(BranchError::AlreadyExists(name)) => {
                    out.error(format!("fatal: a branch named '{name}' already exists"));
                }
                Err(_) => {
                    out.error(format!("error: refname refs/heads/{old} not found"));
                    out.error("fatal: Branch rename failed");
                }
            }
        }
    }
    out
}

fn checkout(state: &mut RepositoryState, op: CheckoutOp, switch: bool) -> Output {
    let mut out = Output::new();
    match op {
        CheckoutOp::Missing => {
            out.error("fatal: missing branch or commit argument");
        }
        CheckoutOp::Create(None) => {
            let flag = if switch { 'c' } else { 'b' };
            out.error(format!("error: switch `{flag}' requires a value"));
        }
        CheckoutOp::Create(Some(name)) => {
            if !state.create_branch(name.clone()) {
                out.error(format!("fatal: a branch named '{name}' already exists"));
                return out;
            }

            // INVARIANT: Branch was just created, so switching cannot fail.
            let _ = state.switch_branch(&name);
            out.success(format!("Switched to a new branch '{name}'"));
        }
        CheckoutOp::Target(name) => {
            if state.has_branch(&name) {
                if state.current_branch() == name {
                    out.plain(format!("Already on '{name}'"));
                } else {
                    let _ = state.switch_branch(&name);
                    out.success(format!("Switched to branch '{name}'"));
                }
            } else if switch {
                out.error(format!("fatal: invalid reference: {name}"));
            } else if name == "." || name.contains('.') {
                out.plain("Updated 1 path from the index");
            } else {
                out.error(format!(
                    "error: pathspec '{name}' did not match any file(s) known to git"
                ));
            }
        }
    }
    out
}

fn merge(state: &RepositoryState, op: MergeOp) -> Output {
    let mut out = Output::new();
    match op {
        MergeOp::Missing => {
            out.error("fatal: No commit specified and merge.defaultToUpstream not set.");
        }
        MergeOp::Abort => {
            out.plain(format!(
                "Merge aborted. Working tree restored to '{}'.",
                state.current_branch()
            ));
        }
        MergeOp::Branch(name) if name == state.current_branch() => {
            out.plain("Already up to date.");
        }
        MergeOp::Branch(_) => {
            let head = state.head().map_or(UNBORN_HASH, |commit| commit.hash.as_str());
            out.plain(format!("Updating {head}..{}", short_hash()));
            out.plain("Fast-forward");
            out.plain(" README.md | 4 ++++");
            out.success(" 1 file changed, 4 insertions(+)");
        }
    }
    out
}

fn log(state: &RepositoryState, format: LogFormat) -> Output {
    let mut out = Output::new();
    if state.commits().is_empty() {
        out.muted(format!("(no commits on '{}' yet)", state.current_branch()));
        return out;
    }

    let decoration = format!(" (HEAD -> {})", state.current_branch());
    for (index, commit) in state.commits().iter().enumerate() {
        let decoration = if index == 0 { decoration.as_str() } else { "" };
        let graph = if format.graph { "* " } else { "" };

        if format.oneline {
            out.accent(format!("{graph}{}{decoration} {}", commit.hash, commit.message));
            continue;
        }

        let rail = if format.graph { "| " } else { "" };
        out.accent(format!("{graph}commit {}{decoration}", commit.hash));
        out.plain(format!("{rail}Author: {}", commit.author));
        out.plain(format!("{rail}Date:   {}", commit.date));
        out.plain(rail.to_owned());
        out.plain(format!("{rail}    {}", commit.message));
        if format.stat {
            out.plain(rail.to_owned());
            out.plain(format!("{rail} index.html | 12 ++++++++++++"));
            out.plain(format!("{rail} 1 file changed, 12 insertions(+)"));
        }
        out.plain(rail.to_owned());
    }
    out
}

fn diff(state: &RepositoryState, staged: bool) -> Output {
    let mut out = Output::new();
    let file = match (staged, state.staged_files().first()) {
        (true, Some(file)) => file.as_str(),
        _ => "index.html",
    };

    out.header(format!("diff --git a/{file} b/{file}"));
    out.muted("index 3b18e51..a9c2f4d 100644");
    out.header(format!("--- a/{file}"));
    out.header(format!("+++ b/{file}"));
    out.info("@@ -1,5 +1,6 @@");
    out.plain(" <!DOCTYPE html>");
    out.plain(" <html>");
    out.plain("   <head>");
    out.error("-    <title>My Project</title>");
    out.success("+    <title>My Awesome Project</title>");
    out.success("+    <link rel=\"stylesheet\" href=\"style.css\">");
    out.plain("   </head>");
    out
}

fn stash(state: &RepositoryState, op: StashOp) -> Output {
    let mut out = Output::new();
    let branch = state.current_branch();
    let (hash, message) = match state.head() {
        Some(commit) => (commit.hash.as_str(), commit.message.as_str()),
        None => (UNBORN_HASH, UNBORN_MESSAGE),
    };

    match op {
        StashOp::Push => {
            out.success(format!(
                "Saved working directory and index state WIP on {branch}: {hash} {message}"
            ));
        }
        StashOp::Apply | StashOp::Pop => {
            out.plain(format!("On branch {branch}"));
            out.plain("Changes not staged for commit:");
            out.error("\tmodified:   index.html");
            if op == StashOp::Pop {
                out.muted(format!("Dropped refs/stash@{{0}} ({})", short_hash()));
            }
        }
        StashOp::List => {
            out.plain(format!("stash@{{0}}: WIP on {branch}: {hash} {message}"));
        }
        StashOp::Drop => {
            out.plain(format!("Dropped refs/stash@{{0}} ({})", short_hash()));
        }
        StashOp::Show => {
            out.plain(" index.html | 2 +-");
            out.plain(" 1 file changed, 1 insertion(+), 1 deletion(-)");
        }
        StashOp::Clear => {
            out.muted("All stash entries cleared.");
        }
        StashOp::Unknown(sub) => {
            out.error(format!("error: unknown subcommand: `{sub}'"));
        }
    }
    out
}

fn reset(state: &RepositoryState, mode: ResetMode, target: Option<&str>) -> Output {
    let mut out = Output::new();
    let target = target.unwrap_or("HEAD");
    let (hash, message) = match state.head() {
        Some(commit) => (commit.hash.as_str(), commit.message.as_str()),
        None => (UNBORN_HASH, UNBORN_MESSAGE),
    };

    match mode {
        ResetMode::Hard => {
            out.plain(format!("HEAD is now at {hash} {message}"));
        }
        ResetMode::Soft => {
            out.plain(format!("Soft reset to {target}. Changes kept in the staging area."));
        }
        ResetMode::Mixed => {
            out.plain("Unstaged changes after reset:");
            out.error("M\tindex.html");
        }
    }
    out
}

fn join_lines(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Look up canned template, preferring the two-word key.
fn canned_template(sub: &str, first_arg: Option<&str>) -> Option<&'static str> {
    let compound = first_arg.map(|arg| format!("{sub} {arg}"));
    compound
        .as_deref()
        .and_then(lookup)
        .or_else(|| lookup(sub))
}

fn lookup(key: &str) -> Option<&'static str> {
    CANNED
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, template)| *template)
}

/// Canned responses for subcommands without state effect.
///
/// Placeholders: `{branch}`, `{head}`, `{head_msg}`, `{new}`, `{arg}`,
/// `{dir}`, `{author}`.
pub const CANNED: &[(&str, &str)] = &[
    ("--version", "git version 2.43.0"),
    ("version", "git version 2.43.0"),
    ("--help", "usage: git [--version] [--help] <command> [<args>]\nSee 'help' for the commands this playground supports."),
    ("help", "usage: git [--version] [--help] <command> [<args>]\nSee 'help' for the commands this playground supports."),
    ("remote", "origin"),
    ("remote -v", "origin\thttps://github.com/you/my-project.git (fetch)\norigin\thttps://github.com/you/my-project.git (push)"),
    ("remote add", "Remote '{arg}' added."),
    ("remote remove", "Remote '{arg}' removed."),
    ("remote rename", "Remote renamed to '{arg}'."),
    ("remote set-url", "Remote URL updated to {arg}."),
    ("fetch --prune", "From github.com:you/my-project\n - [deleted]         (none)     -> origin/old-feature"),
    ("fetch --all", "Fetching origin"),
    ("fetch origin", "From github.com:you/my-project\n * [new branch]      feature/login -> origin/feature/login"),
    ("rebase", "Successfully rebased and updated refs/heads/{branch}."),
    ("rebase -i", "Stopped at {head}... {head_msg}\nYou can amend the commit now, with\n\n  git commit --amend\n\nOnce you are satisfied with your changes, run\n\n  git rebase --continue"),
    ("rebase --continue", "Successfully rebased and updated refs/heads/{branch}."),
    ("rebase --abort", "Rebase aborted. HEAD is back at {head}."),
    ("cherry-pick", "[{branch} {new}] Cherry-picked {arg}\n 1 file changed, 3 insertions(+)"),
    ("cherry-pick --abort", "Cherry-pick aborted."),
    ("revert", "[{branch} {new}] Revert \"{head_msg}\"\n 1 file changed, 1 deletion(-)"),
    ("restore", "Restored '{arg}' from the index."),
    ("rm", "rm '{arg}'"),
    ("mv", "Renamed '{arg}'."),
    ("clean", "Removing temp.log\nRemoving build/"),
    ("clean -n", "Would remove temp.log\nWould remove build/"),
    ("clean -fd", "Removing temp.log\nRemoving build/"),
    ("show", "commit {head} (HEAD -> {branch})\nAuthor: {author}\n\n    {head_msg}"),
    ("tag", "v1.0.0"),
    ("tag -a", "Created annotated tag '{arg}' at {head}."),
    ("tag -d", "Deleted tag '{arg}' (was {new})"),
    ("blame", "{head} ({author} 2024-01-15 10:30:00 +0000 1) <!DOCTYPE html>\n{head} ({author} 2024-01-15 10:30:00 +0000 2) <html>"),
    ("reflog", "{head} (HEAD -> {branch}) HEAD@{0}: commit: {head_msg}\n{new} HEAD@{1}: checkout: moving from main to {branch}"),
    ("describe", "v1.0.0-3-g{head}"),
    ("shortlog", "{author} (1):\n      {head_msg}"),
    ("config", "Configuration updated."),
    ("config --list", "user.name=You\nuser.email=you@example.com\ncore.editor=vim\ninit.defaultbranch=main"),
    ("config --global", "Global configuration updated."),
    ("grep", "index.html:    <title>My Project</title>"),
    ("ls-files", "README.md\nindex.html\nscript.js\nstyle.css"),
    ("rev-parse", "{head}e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c"),
    ("rev-parse --abbrev-ref", "{branch}"),
    ("cat-file", "tree 9bd1e4f\nauthor {author} 1705314600 +0000\n\n{head_msg}"),
    ("count-objects", "42 objects, 168 kilobytes"),
    ("gc", "Enumerating objects: 42, done.\nCounting objects: 100% (42/42), done.\nCompressing objects: 100% (30/30), done.\nWriting objects: 100% (42/42), done.\nTotal 42 (delta 12), reused 0 (delta 0)"),
    ("fsck", "Checking object directories: 100% (256/256), done.\nChecking objects: 100% (42/42), done."),
    ("prune", "Pruned unreachable objects."),
    ("bisect start", "status: waiting for both good and bad commits"),
    ("bisect bad", "status: waiting for good commit(s), bad commit known"),
    ("bisect good", "Bisecting: 2 revisions left to test after this (roughly 1 step)\n[{new}] {head_msg}"),
    ("bisect reset", "Previous HEAD position was {new}... {head_msg}\nSwitched to branch '{branch}'"),
    ("bisect log", "git bisect start\n# bad: [{head}] {head_msg}"),
    ("bisect run", "{head} is the first bad commit\nbisect found first bad commit"),
    ("submodule add", "Cloning into '{dir}/{arg}'...\ndone."),
    ("submodule init", "Submodule 'lib' (https://github.com/you/lib.git) registered for path 'lib'"),
    ("submodule update", "Submodule path 'lib': checked out '{new}'"),
    ("submodule status", " {new} lib (heads/main)"),
    ("submodule foreach", "Entering 'lib'"),
    ("submodule sync", "Synchronizing submodule url for 'lib'"),
    ("worktree add", "Preparing worktree (new branch '{arg}')\nHEAD is now at {head} {head_msg}"),
    ("worktree list", "{dir}  {head} [{branch}]"),
    ("worktree remove", "Worktree '{arg}' removed."),
    ("worktree prune", "Pruned stale worktree metadata."),
    ("sparse-checkout", "Sparse checkout updated."),
    ("sparse-checkout list", "src/\ndocs/"),
    ("notes", "Note added to {head}."),
    ("archive", "Archive written for {head}."),
    ("format-patch", "0001-{head}.patch"),
    ("am", "Applying: {head_msg}"),
    ("apply", "Patch applied cleanly."),
    ("request-pull", "The following changes since commit {head} are available in the git repository at:\n\n  https://github.com/you/my-project.git {branch}"),
    ("range-diff", "1:  {head} = 1:  {new} {head_msg}"),
    ("whatchanged", "commit {head}\nAuthor: {author}\n\n    {head_msg}\n\n:100644 100644 3b18e51 a9c2f4d M\tindex.html"),
    ("maintenance", "Maintenance tasks completed."),
    ("lfs", "Git LFS initialized."),
    ("filter-branch", "Rewrite {head} (1/1)\nRef 'refs/heads/{branch}' was rewritten"),
    ("replace", "Replacement ref created."),
    ("verify-commit", "gpg: Good signature from \"{author}\""),
];
