// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Playground session controller.
//!
//! A [`Session`] owns everything one user interacts with: the mock repository
//! state, the command interpreter, the scenario engine, and the badge tracker.
//! Front ends submit raw input lines and get back terminal entries to show.
//! Nothing in here knows how entries are displayed, or when.

use crate::{
    badge::BadgeTracker,
    engine::{Completion, ScenarioEngine},
    interpreter::Interpreter,
    parser::{parse, Input},
    repo::RepositoryState,
    scenario::{Catalog, Filter, Scenario},
    terminal::{self, Entry, Output, Prompt},
};

use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of one submitted input line.
#[derive(Debug, Clone)]
pub struct Response {
    /// What the terminal should show.
    pub entry: Entry,

    /// Set whenever the active scenario's goal holds after the command.
    pub completion: Option<Completion>,
}

/// Single user playground session.
#[derive(Debug)]
pub struct Session<T>
where
    T: BadgeTracker,
{
    state: RepositoryState,
    interpreter: Interpreter,
    engine: ScenarioEngine,
    tracker: T,
}

impl<T> Session<T>
where
    T: BadgeTracker,
{
    /// Construct new session in free playground mode.
    ///
    /// Scenarios the tracker already knows as completed are treated as
    /// completed by the engine too.
    pub fn new(catalog: Catalog, interpreter: Interpreter, tracker: T) -> Self {
        let engine = ScenarioEngine::new(catalog).with_completed(tracker.completed_scenarios());
        Self {
            state: RepositoryState::new(),
            interpreter,
            engine,
            tracker,
        }
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    pub fn engine(&self) -> &ScenarioEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn active_scenario(&self) -> Option<&Arc<Scenario>> {
        self.engine.active()
    }

    /// Current prompt without a command, e.g., `~/my-project (main) $`.
    pub fn prompt(&self) -> String {
        format!(
            "{} ({}) $",
            self.state.current_directory(),
            self.state.current_branch()
        )
    }

    /// Submit one raw input line.
    ///
    /// Returns `None` for blank input, which is neither executed nor
    /// recorded. Everything else lands in the command history and is
    /// followed by a completion check of the active scenario.
    #[instrument(skip(self), level = "debug")]
    pub fn submit(&mut self, line: &str) -> Option<Response> {
        let input = parse(line);
        if input == Input::Empty {
            return None;
        }

        let raw = line.trim().to_owned();
        let prompt = Prompt {
            directory: self.state.current_directory().to_owned(),
            branch: self.state.current_branch().to_owned(),
            command: raw.clone(),
        };
        self.state.record(raw.as_str());

        let mut entry = match input {
            Input::Git(parsed) => Entry::Command {
                prompt,
                output: self.interpreter.execute(&mut self.state, &parsed),
            },
            Input::Unknown(parsed) => {
                let mut output = Output::new();
                output.error(format!("{}: command not found", parsed.main_command));
                Entry::Command { prompt, output }
            }
            Input::Help => Entry::Command {
                prompt,
                output: terminal::help(),
            },
            Input::Clear => {
                Entry::Clear(self.engine.active().map(|s| terminal::scenario_banner(s)))
            }
            Input::Empty => return None,
        };

        let completion = self.engine.evaluate(&self.state, &raw, &mut self.tracker);
        if let Some(done) = completion.as_ref().filter(|done| done.first_time) {
            let notice = terminal::completion_notice(&done.scenario, &done.badges);
            match &mut entry {
                Entry::Command { output, .. } | Entry::Notice(output) => {
                    output.extend(notice);
                }
                Entry::Clear(banner) => {
                    banner.get_or_insert_with(Output::new).extend(notice);
                }
            }
        }

        Some(Response { entry, completion })
    }

    /// Start scenario, showing its goal banner.
    ///
    /// Returns `None` if there is no scenario with that id.
    pub fn load_scenario(&mut self, id: &str) -> Option<Entry> {
        self.engine
            .load(id, &mut self.state)
            .map(|scenario| Entry::Clear(Some(terminal::scenario_banner(&scenario))))
    }

    /// Leave active scenario, keeping repository state as it is.
    pub fn quit_scenario(&mut self) -> Entry {
        let mut out = Output::new();
        match self.engine.quit() {
            Some(scenario) => out.info(format!(
                "Left scenario {}. You are in free playground mode.",
                scenario.id
            )),
            None => out.muted("No active scenario."),
        };

        Entry::Notice(out)
    }

    /// Put repository back to its starting point and empty the history.
    ///
    /// With an active scenario that is the scenario's initial state.
    pub fn reset(&mut self) -> Entry {
        let active = self.engine.active().map(|scenario| scenario.id.clone());
        if let Some(entry) = active.and_then(|id| self.load_scenario(&id)) {
            debug!("session reset to scenario start");
            return entry;
        }

        self.state.restore(None);
        debug!("session reset to defaults");
        let mut out = Output::new();
        out.info("Repository reset. History cleared.");
        Entry::Clear(Some(out))
    }

    /// Hint for active scenario.
    pub fn hint(&self) -> Output {
        let mut out = Output::new();
        match self.engine.active() {
            Some(scenario) => match &scenario.hint {
                Some(hint) => out.info(format!("Hint: {hint}")),
                None => out.muted("This scenario has no hint. Try the cheat sheet."),
            },
            None => out.muted("No active scenario. Browse them with `:scenarios`."),
        };

        out
    }

    /// Badge and completion summary.
    pub fn progress(&self) -> Output {
        terminal::progress_report(
            &self.tracker.progress(),
            &self.tracker.earned_badges(),
            self.engine.completed().len(),
        )
    }

    /// Scenario browser restricted by filter.
    pub fn browser(&self, filter: &Filter) -> Output {
        terminal::scenario_browser(self.engine.catalog().filter(filter), self.engine.completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{badge::MemoryTracker, scenario::catalog::builtin};
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemoryTracker> {
        let catalog = builtin();
        let tracker = MemoryTracker::new(&catalog);
        Session::new(catalog, Interpreter::default(), tracker)
    }

    fn output(response: &Response) -> &Output {
        match &response.entry {
            Entry::Command { output, .. } | Entry::Notice(output) => output,
            Entry::Clear(banner) => banner.as_ref().expect("clear without banner"),
        }
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = session();
        assert!(session.submit("   ").is_none());
        assert!(session.state().command_history().is_empty());
    }

    #[test]
    fn unknown_command_is_recorded() {
        let mut session = session();
        let response = session.submit("ls -la").unwrap();
        assert!(output(&response).contains("ls: command not found"));
        assert_eq!(session.state().command_history(), ["ls -la"]);
    }

    #[test]
    fn prompt_echo_shows_branch_before_command() {
        let mut session = session();
        let response = session.submit("git checkout -b feature").unwrap();
        let Entry::Command { prompt, .. } = response.entry else {
            panic!("expected command entry");
        };
        assert_eq!(prompt.to_string(), "~/my-project (main) $ git checkout -b feature");
        assert_eq!(session.prompt(), "~/my-project (feature) $");
    }

    #[test]
    fn clear_redisplays_active_banner() {
        let mut session = session();
        session.load_scenario("beg-01").unwrap();
        let response = session.submit("clear").unwrap();
        let Entry::Clear(Some(banner)) = response.entry else {
            panic!("expected clear with banner");
        };
        assert!(banner.contains("beg-01"));

        session.quit_scenario();
        let response = session.submit("clear").unwrap();
        assert_eq!(response.entry, Entry::Clear(None));
    }

    #[test]
    fn completion_notice_appears_once() {
        let mut session = session();
        session.load_scenario("beg-06").unwrap();

        let first = session.submit("git commit -m \"Initial setup\"").unwrap();
        assert!(output(&first).contains("Scenario complete"));
        assert!(output(&first).contains("First Steps"));
        assert!(output(&first).contains("One Shot"));

        let again = session.submit("git log").unwrap();
        assert!(again.completion.as_ref().is_some_and(|done| !done.first_time));
        assert!(!output(&again).contains("Scenario complete"));
        assert_eq!(session.tracker().progress().earned, 2);
    }

    #[test]
    fn reset_reloads_active_scenario() {
        let mut session = session();
        session.load_scenario("beg-09").unwrap();
        session.submit("git checkout develop");
        assert_eq!(session.state().current_branch(), "develop");

        session.reset();
        assert_eq!(session.state().current_branch(), "main");
        assert!(session.state().has_branch("develop"));
        assert!(session.state().command_history().is_empty());
        assert!(session.active_scenario().is_some());
    }

    #[test]
    fn reset_without_scenario_restores_defaults() {
        let mut session = session();
        session.submit("git checkout -b feature");
        session.submit("git add .");
        session.reset();

        assert_eq!(session.state(), &RepositoryState::new());
    }

    #[test]
    fn hint_depends_on_active_scenario() {
        let mut session = session();
        assert!(session.hint().contains("No active scenario"));
        session.load_scenario("beg-01").unwrap();
        assert!(session.hint().contains("Hint:"));
    }

    #[test]
    fn browser_marks_completed() {
        let mut session = session();
        session.load_scenario("beg-06").unwrap();
        session.submit("git commit -m \"done\"");

        let view = session.browser(&Filter::from_words(["beginner"]));
        assert!(view.contains("[✓] beg-06"));
        assert!(!view.contains("int-01"));
    }
}
