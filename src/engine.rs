// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Scenario engine.
//!
//! Keeps track of which scenario is active, applies its starting state when
//! it loads, and checks its goal after every command. At most one scenario is
//! active at any time. Without an active scenario the playground runs in
//! "free playground" mode and no goal is checked.
//!
//! Completion is idempotent. A satisfied goal may be reported any number of
//! times, but the badge tracker only hears about the first one, since the
//! engine remembers every completed scenario id.

use crate::{
    badge::{Badge, BadgeTracker},
    repo::RepositoryState,
    scenario::{Attempt, Catalog, Scenario},
};

use std::{collections::BTreeSet, sync::Arc};
use tracing::{debug, info, instrument, warn};

/// Outcome of a satisfied scenario goal.
#[derive(Debug, Clone)]
pub struct Completion {
    pub scenario: Arc<Scenario>,

    /// Whether this is the first time the scenario was completed.
    pub first_time: bool,

    /// Badges earned by this completion.
    pub badges: Vec<Badge>,
}

/// Active scenario bookkeeping.
#[derive(Debug, Default)]
pub struct ScenarioEngine {
    catalog: Catalog,
    active: Option<Arc<Scenario>>,
    completed: BTreeSet<String>,
}

impl ScenarioEngine {
    /// Construct new engine over catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Pre-seed completed scenario ids, e.g., from a badge tracker.
    pub fn with_completed(mut self, completed: impl IntoIterator<Item = String>) -> Self {
        self.completed.extend(completed);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active(&self) -> Option<&Arc<Scenario>> {
        self.active.as_ref()
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Make scenario active and apply its starting state.
    ///
    /// Replaces any previously active scenario. Repository state is reset to
    /// defaults first, so nothing leaks over from an earlier scenario. Command
    /// history starts out empty.
    ///
    /// Returns `None` without touching anything if no scenario has that id.
    #[instrument(skip(self, state), level = "debug")]
    pub fn load(&mut self, id: &str, state: &mut RepositoryState) -> Option<Arc<Scenario>> {
        let Some(scenario) = self.catalog.get(id) else {
            debug!("no scenario with id {id:?}");
            return None;
        };

        state.restore(scenario.initial_state.as_ref());
        self.active = Some(scenario.clone());
        info!("scenario {id} loaded");

        Some(scenario)
    }

    /// Leave active scenario.
    ///
    /// Repository state is left as it is.
    pub fn quit(&mut self) -> Option<Arc<Scenario>> {
        let scenario = self.active.take();
        if let Some(scenario) = &scenario {
            debug!("scenario {} left", scenario.id);
        }

        scenario
    }

    /// Evaluate scenario goal.
    ///
    /// A validator that fails counts as "not complete yet".
    pub fn check_completion(
        scenario: &Scenario,
        state: &RepositoryState,
        last_command: &str,
        history: &[String],
    ) -> bool {
        let attempt = Attempt {
            state,
            last_command,
            history,
        };

        match scenario.validator.check(&attempt) {
            Ok(done) => done,
            Err(error) => {
                warn!("scenario {} validator failed: {error}", scenario.id);
                false
            }
        }
    }

    /// Check active scenario after a command, and record completion.
    ///
    /// Notifies the tracker only on first completion of a scenario.
    #[instrument(skip(self, state, tracker), level = "debug")]
    pub fn evaluate(
        &mut self,
        state: &RepositoryState,
        last_command: &str,
        tracker: &mut dyn BadgeTracker,
    ) -> Option<Completion> {
        let scenario = self.active.clone()?;
        let history = state.command_history();
        if !Self::check_completion(&scenario, state, last_command, history) {
            return None;
        }

        let first_time = self.completed.insert(scenario.id.clone());
        let badges = if first_time {
            info!("scenario {} completed in {} commands", scenario.id, history.len());
            tracker.on_scenario_complete(&scenario.id, history.len())
        } else {
            Vec::new()
        };

        Some(Completion {
            scenario,
            first_time,
            badges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        badge::Progress,
        repo::StateOverride,
        scenario::{Level, Validator, ValidatorError},
    };
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct CountingTracker {
        calls: Vec<(String, usize)>,
    }

    impl BadgeTracker for CountingTracker {
        fn on_scenario_complete(&mut self, scenario_id: &str, command_count: usize) -> Vec<Badge> {
            self.calls.push((scenario_id.to_owned(), command_count));
            Vec::new()
        }

        fn progress(&self) -> Progress {
            Progress {
                earned: 0,
                total: 0,
                percent: 0.0,
            }
        }

        fn completed_scenarios(&self) -> BTreeSet<String> {
            BTreeSet::new()
        }

        fn earned_badges(&self) -> Vec<Badge> {
            Vec::new()
        }
    }

    fn engine() -> ScenarioEngine {
        ScenarioEngine::new(Catalog::new([
            Scenario::new(
                "a",
                "A",
                Level::Beginner,
                "stage things",
                Validator::predicate(|attempt| !attempt.state.staged_files().is_empty()),
            )
            .with_initial_state(
                StateOverride::default()
                    .with_branches(["main", "develop"])
                    .with_branch("develop"),
            ),
            Scenario::new(
                "b",
                "B",
                Level::Beginner,
                "anything",
                Validator::pattern("^git").unwrap(),
            )
            .with_initial_state(StateOverride::default().with_staged(["x.txt"])),
            Scenario::new(
                "broken",
                "Broken",
                Level::Advanced,
                "never",
                Validator::fallible(|_| Err(ValidatorError("bad definition".into()))),
            ),
        ]))
    }

    #[test]
    fn load_replaces_active_without_leaking_overrides() {
        let mut engine = engine();
        let mut state = RepositoryState::new();

        engine.load("a", &mut state);
        assert_eq!(state.current_branch(), "develop");
        state.record("git status");

        engine.load("b", &mut state);
        assert_eq!(engine.active().map(|s| s.id.as_str()), Some("b"));
        assert_eq!(state.current_branch(), "main");
        assert!(!state.has_branch("develop"));
        assert_eq!(state.staged_files(), ["x.txt"]);
        assert!(state.command_history().is_empty());
    }

    #[test]
    fn load_miss_is_silent_noop() {
        let mut engine = engine();
        let mut state = RepositoryState::new();
        engine.load("a", &mut state);
        let before = state.clone();

        assert!(engine.load("missing", &mut state).is_none());
        assert_eq!(engine.active().map(|s| s.id.as_str()), Some("a"));
        assert_eq!(state, before);
    }

    #[test]
    fn completion_notifies_tracker_once() {
        let mut engine = engine();
        let mut tracker = CountingTracker::default();
        let mut state = RepositoryState::new();
        engine.load("b", &mut state);
        state.record("git status");

        let first = engine.evaluate(&state, "git status", &mut tracker);
        let second = engine.evaluate(&state, "git status", &mut tracker);

        assert!(first.is_some_and(|c| c.first_time));
        assert!(second.is_some_and(|c| !c.first_time));
        assert_eq!(tracker.calls, vec![("b".to_owned(), 1)]);
        assert!(engine.is_completed("b"));
    }

    #[test]
    fn failing_validator_is_not_complete() {
        let mut engine = engine();
        let mut tracker = CountingTracker::default();
        let mut state = RepositoryState::new();
        engine.load("broken", &mut state);

        assert!(engine.evaluate(&state, "git status", &mut tracker).is_none());
        assert!(tracker.calls.is_empty());
    }

    #[test]
    fn quit_keeps_state() {
        let mut engine = engine();
        let mut tracker = CountingTracker::default();
        let mut state = RepositoryState::new();
        engine.load("a", &mut state);
        let before = state.clone();

        assert_eq!(engine.quit().map(|s| s.id.clone()), Some("a".into()));
        assert!(engine.active().is_none());
        assert_eq!(state, before);
        assert!(engine.evaluate(&state, "git add .", &mut tracker).is_none());
    }

    #[test]
    fn preseeded_completion_suppresses_notification() {
        let mut engine = engine().with_completed(["b".to_owned()]);
        let mut tracker = CountingTracker::default();
        let mut state = RepositoryState::new();
        engine.load("b", &mut state);

        let completion = engine.evaluate(&state, "git log", &mut tracker);
        assert!(completion.is_some_and(|c| !c.first_time));
        assert!(tracker.calls.is_empty());
    }
}
