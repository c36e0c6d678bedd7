// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::SessionFixture;

use gitplay::{
    scenario::catalog::builtin, BadgeTracker, Entry, Interpreter, MemoryTracker, OutputQueue,
    Session, Transcript,
};
use simple_test_case::test_case;
use std::time::Duration;

#[test]
fn stage_and_commit_scenario() {
    let mut fixture = SessionFixture::with_scenario("beg-06");
    pretty_assertions::assert_eq!(fixture.state().staged_files(), ["index.html"]);

    let response = fixture.run("git commit -m \"Initial setup\"");
    let Entry::Command { output, .. } = &response.entry else {
        panic!("expected command entry");
    };
    assert!(output.contains("Initial setup"));
    pretty_assertions::assert_eq!(fixture.state().commits().len(), 1);
    assert!(fixture.state().staged_files().is_empty());
    assert!(response.completion.is_some_and(|done| done.first_time));
    assert!(fixture.session().engine().is_completed("beg-06"));
}

#[test]
fn switch_branch_scenario() {
    let mut fixture = SessionFixture::with_scenario("beg-09");
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "main");
    assert!(fixture.state().has_branch("develop"));

    let response = fixture.run("git checkout develop");
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "develop");
    assert!(response.completion.is_some());
}

#[test]
fn rename_branch_scenario() {
    let mut fixture = SessionFixture::with_scenario("beg-12");
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "master");
    pretty_assertions::assert_eq!(fixture.state().branches().collect::<Vec<_>>(), vec!["master"]);

    let response = fixture.run("git branch -m main-v2");
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "main-v2");
    assert!(fixture.state().has_branch("main-v2"));
    assert!(!fixture.state().has_branch("master"));
    assert!(response.completion.is_some());
}

#[test_case("git checkout -b hotfix"; "checkout")]
#[test_case("git switch -c hotfix"; "switch")]
#[test]
fn create_and_switch_scenario(line: &str) {
    let mut fixture = SessionFixture::with_scenario("beg-10");
    let response = fixture.run(line);
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "hotfix");
    assert!(response.completion.is_some_and(|done| done.first_time));
}

#[test_case("git merge feature"; "fast forward")]
#[test_case("git merge --no-ff feature"; "no fast forward")]
#[test]
fn merge_feature_scenario(line: &str) {
    let mut fixture = SessionFixture::with_scenario("int-02");
    pretty_assertions::assert_eq!(
        fixture.state().branches().collect::<Vec<_>>(),
        vec!["feature", "main"]
    );

    let response = fixture.run(line);
    let Entry::Command { output, .. } = &response.entry else {
        panic!("expected command entry");
    };
    assert!(output.contains("Fast-forward"));
    assert!(!output.has_error());
    assert!(response.completion.is_some());
}

#[test]
fn feature_branch_workflow_scenario() {
    let mut fixture = SessionFixture::with_scenario("adv-06");
    let steps = [
        "git checkout -b feature",
        "git add .",
        "git commit -m \"Add feature\"",
        "git checkout main",
    ];
    for line in steps {
        let response = fixture.run(line);
        assert!(response.completion.is_none(), "completed early at {line:?}");
    }

    let response = fixture.run("git merge feature");
    assert!(response.completion.is_some_and(|done| done.first_time));
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "main");
    pretty_assertions::assert_eq!(fixture.state().commits()[0].message, "Add feature");
}

#[test]
fn remote_commands_succeed_on_fresh_repository() {
    let mut fixture = SessionFixture::new();
    for line in ["git push", "git pull", "git fetch", "git log"] {
        let output = fixture.output(line);
        assert!(!output.has_error(), "{line}: {output}");
    }
    assert!(fixture.state().commits().is_empty());
}

#[test]
fn unknown_git_command_leaves_state_alone() {
    let mut fixture = SessionFixture::with_scenario("beg-06");
    let before = fixture.state().clone();

    let response = fixture.run("git nonsense");
    let Entry::Command { output, .. } = &response.entry else {
        panic!("expected command entry");
    };
    assert!(output.contains("is not a git command"));
    assert!(response.completion.is_none());

    let after = fixture.state();
    pretty_assertions::assert_eq!(after.current_branch(), before.current_branch());
    pretty_assertions::assert_eq!(after.branches().collect::<Vec<_>>(), before.branches().collect::<Vec<_>>());
    pretty_assertions::assert_eq!(after.staged_files(), before.staged_files());
    pretty_assertions::assert_eq!(after.commits(), before.commits());
    pretty_assertions::assert_eq!(after.command_history(), ["git nonsense"]);
}

#[test]
fn init_always_resets_branches() {
    let mut fixture = SessionFixture::new();
    fixture.run("git checkout -b feature");
    fixture.run("git branch hotfix");
    fixture.run("git init");

    pretty_assertions::assert_eq!(fixture.state().branches().collect::<Vec<_>>(), vec!["main"]);
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "main");
}

#[test]
fn add_all_then_commit() {
    let mut fixture = SessionFixture::new();
    fixture.run("git commit -m \"first\"");
    let before = fixture.state().commits().len();

    fixture.run("git add .");
    assert!(!fixture.state().staged_files().is_empty());
    fixture.run("git commit -m \"msg\"");

    assert!(fixture.state().staged_files().is_empty());
    pretty_assertions::assert_eq!(fixture.state().commits().len(), before + 1);
    pretty_assertions::assert_eq!(fixture.state().commits()[0].message, "msg");
}

#[test_case(&["feature"]; "single branch")]
#[test_case(&["feature", "bugfix-1", "release/2.0"]; "several branches")]
#[test_case(&["main", "develop", "main"]; "existing names")]
#[test]
fn branch_then_checkout_lands_on_branch(names: &[&str]) {
    let mut fixture = SessionFixture::new();
    for name in names {
        fixture.run(&format!("git branch {name}"));
        fixture.run(&format!("git checkout {name}"));

        pretty_assertions::assert_eq!(fixture.state().current_branch(), *name);
        assert!(fixture.state().has_branch(name));
    }
}

#[test]
fn completion_awards_badges_once() {
    let mut fixture = SessionFixture::with_scenario("beg-06");
    fixture.run("git commit -m \"Initial setup\"");
    let earned = fixture.session().tracker().progress().earned;
    assert!(earned > 0);

    for line in ["git log", "git status", "git log --oneline"] {
        let response = fixture.run(line);
        assert!(response.completion.is_some_and(|done| !done.first_time && done.badges.is_empty()));
    }
    pretty_assertions::assert_eq!(fixture.session().tracker().progress().earned, earned);
}

#[test]
fn loading_new_scenario_replaces_old_one() {
    let mut fixture = SessionFixture::with_scenario("beg-09");
    fixture.run("git checkout develop");

    assert!(fixture.session().load_scenario("beg-06").is_some());
    let active = fixture.session().active_scenario().map(|s| s.id.clone());
    pretty_assertions::assert_eq!(active.as_deref(), Some("beg-06"));
    pretty_assertions::assert_eq!(fixture.state().branches().collect::<Vec<_>>(), vec!["main"]);
    pretty_assertions::assert_eq!(fixture.state().current_branch(), "main");
    pretty_assertions::assert_eq!(fixture.state().staged_files(), ["index.html"]);
    assert!(fixture.state().command_history().is_empty());
}

#[test]
fn unknown_scenario_is_ignored() {
    let mut fixture = SessionFixture::with_scenario("beg-09");
    assert!(fixture.session().load_scenario("nope-99").is_none());
    let active = fixture.session().active_scenario().map(|s| s.id.clone());
    pretty_assertions::assert_eq!(active.as_deref(), Some("beg-09"));
}

#[test]
fn shell_commands_are_not_found() {
    let mut fixture = SessionFixture::new();
    assert!(fixture.output("cd src").contains("cd: command not found"));
    assert!(fixture.output("help").contains("Available commands"));
    pretty_assertions::assert_eq!(fixture.state().command_history(), ["cd src", "help"]);
}

#[tokio::test]
async fn queued_output_follows_submission_order() {
    let catalog = builtin();
    let tracker = MemoryTracker::new(&catalog);
    let mut session = Session::new(catalog, Interpreter::default(), tracker);
    let transcript = Transcript::new();
    let queue = OutputQueue::spawn(transcript.clone());

    let lines = ["git status", "git checkout -b feature", "git add .", "git status"];
    let delays = [40, 0, 20, 0];
    for (line, delay) in lines.iter().zip(delays) {
        let response = session.submit(line).expect("response");
        let _ = queue.push(response.entry, Duration::from_millis(delay));
    }
    queue.shutdown().await;

    let echoed = transcript
        .entries()
        .into_iter()
        .map(|entry| match entry {
            Entry::Command { prompt, .. } => prompt.to_string(),
            other => panic!("unexpected entry {other:?}"),
        })
        .collect::<Vec<_>>();
    pretty_assertions::assert_eq!(
        echoed,
        vec![
            "~/my-project (main) $ git status",
            "~/my-project (main) $ git checkout -b feature",
            "~/my-project (feature) $ git add .",
            "~/my-project (feature) $ git status",
        ]
    );
}
