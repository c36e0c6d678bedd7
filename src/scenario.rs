// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Guided exercises.
//!
//! A __scenario__ is a single exercise with a goal description, an optional
//! starting repository state, and a __validator__ that decides when the goal
//! has been met. Scenarios are immutable once built. They are kept in a
//! [`Catalog`] that can be browsed by level and free-text search.
//!
//! # Validators
//!
//! A validator is either a regular expression matched against the last
//! command, or a predicate over the repository state, the last command, and
//! the full command history. Both are evaluated through
//! [`Validator::check`], so callers never care which one they hold.

pub mod catalog;

use crate::repo::{RepositoryState, StateOverride};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::Arc,
};

/// Scenario difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "beginner" | "beg" => Ok(Self::Beginner),
            "intermediate" | "int" => Ok(Self::Intermediate),
            "advanced" | "adv" => Ok(Self::Advanced),
            _ => Err(UnknownLevel(value.to_owned())),
        }
    }
}

impl Display for Level {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        })
    }
}

/// Level name is not one of beginner, intermediate, or advanced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario level {0:?}")]
pub struct UnknownLevel(pub String);

/// Everything a validator gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    pub state: &'a RepositoryState,
    pub last_command: &'a str,
    pub history: &'a [String],
}

impl Attempt<'_> {
    /// Check if any command in history starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.history.iter().any(|command| command.starts_with(prefix))
    }

    /// Check if the last command starts with `prefix`.
    pub fn last_was(&self, prefix: &str) -> bool {
        self.last_command.starts_with(prefix)
    }
}

type PredicateFn = dyn Fn(&Attempt<'_>) -> Result<bool, ValidatorError> + Send + Sync;

/// Completion check of a scenario.
#[derive(Clone)]
pub enum Validator {
    /// Match last command against regular expression.
    Pattern(Regex),

    /// Custom check over state, last command, and history.
    Predicate(Arc<PredicateFn>),
}

impl Validator {
    /// Construct regular expression validator.
    ///
    /// # Errors
    ///
    /// - Return [`regex::Error`] if the pattern is invalid.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Construct infallible predicate validator.
    ///
    /// The check must not panic. Panics are not caught, and release builds
    /// abort on panic, so a panicking check ends the session. Use
    /// [`Validator::fallible`] for checks that can go wrong.
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&Attempt<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(move |attempt: &Attempt<'_>| Ok(check(attempt))))
    }

    /// Construct predicate validator that may fail.
    ///
    /// An [`Err`] from the check counts as "not complete".
    pub fn fallible<F>(check: F) -> Self
    where
        F: Fn(&Attempt<'_>) -> Result<bool, ValidatorError> + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(check))
    }

    /// Evaluate validator.
    ///
    /// # Errors
    ///
    /// - Return [`ValidatorError`] if a predicate fails.
    pub fn check(&self, attempt: &Attempt<'_>) -> Result<bool, ValidatorError> {
        match self {
            Self::Pattern(regex) => Ok(regex.is_match(attempt.last_command)),
            Self::Predicate(check) => check(attempt),
        }
    }
}

impl Debug for Validator {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Pattern(regex) => fmt.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => fmt.write_str("Predicate(..)"),
        }
    }
}

/// Validator could not reach a verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validator failed: {0}")]
pub struct ValidatorError(pub String);

/// Declarative predicate.
///
/// Every listed condition must hold. Lets configuration files describe goals
/// over repository state without writing code.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Expectation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_branch: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_branch: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lacks_branch: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_commits: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub staged_empty: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub staged_contains: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history_contains: Vec<String>,

    /// Regular expression the last command must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_command: Option<String>,
}

impl Expectation {
    /// Turn expectation into predicate validator.
    ///
    /// # Errors
    ///
    /// - Return [`regex::Error`] if `last_command` is not a valid pattern.
    pub fn into_validator(self) -> Result<Validator, regex::Error> {
        let last = self.last_command.as_deref().map(Regex::new).transpose()?;

        Ok(Validator::predicate(move |attempt| {
            let state = attempt.state;
            self.current_branch
                .as_deref()
                .is_none_or(|branch| state.current_branch() == branch)
                && self.has_branch.iter().all(|branch| state.has_branch(branch))
                && !self.lacks_branch.iter().any(|branch| state.has_branch(branch))
                && self.min_commits.is_none_or(|min| state.commits().len() >= min)
                && self
                    .staged_empty
                    .is_none_or(|empty| state.staged_files().is_empty() == empty)
                && self
                    .staged_contains
                    .iter()
                    .all(|file| state.staged_files().contains(file))
                && self
                    .history_contains
                    .iter()
                    .all(|needle| attempt.history.iter().any(|line| line.contains(needle.as_str())))
                && last
                    .as_ref()
                    .is_none_or(|regex| regex.is_match(attempt.last_command))
        }))
    }
}

/// Single guided exercise.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub level: Level,

    /// Goal text shown to the user.
    pub description: String,
    pub hint: Option<String>,
    pub initial_state: Option<StateOverride>,
    pub validator: Validator,
}

impl Scenario {
    /// Construct new scenario with no hint and no initial state.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        level: Level,
        description: impl Into<String>,
        validator: Validator,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            description: description.into(),
            hint: None,
            initial_state: None,
            validator,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_initial_state(mut self, initial_state: StateOverride) -> Self {
        self.initial_state = Some(initial_state);
        self
    }

    /// Case-insensitive search over title and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Browsing filter for the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter {
    pub level: Option<Level>,
    pub query: Option<String>,
}

impl Filter {
    /// Build filter from loose words, e.g., `["beginner", "branch"]`.
    ///
    /// A leading word naming a level becomes the level filter. Everything
    /// else is the search query.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut words = words.into_iter().peekable();
        let level = words.peek().and_then(|word| word.parse::<Level>().ok());
        if level.is_some() {
            words.next();
        }

        let query = words.collect::<Vec<_>>().join(" ");
        Self {
            level,
            query: (!query.is_empty()).then_some(query),
        }
    }

    pub fn accepts(&self, scenario: &Scenario) -> bool {
        self.level.is_none_or(|level| scenario.level == level)
            && self
                .query
                .as_deref()
                .is_none_or(|query| scenario.matches(query))
    }
}

/// Ordered collection of scenarios with unique ids.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    scenarios: Vec<Arc<Scenario>>,
}

impl Catalog {
    /// Construct new catalog.
    ///
    /// Later scenarios with an id already present replace the earlier one in
    /// place.
    pub fn new(scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        let mut catalog = Self::default();
        catalog.extend(scenarios);
        catalog
    }

    /// Add scenarios, replacing ones with the same id.
    pub fn extend(&mut self, scenarios: impl IntoIterator<Item = Scenario>) {
        for scenario in scenarios {
            let scenario = Arc::new(scenario);
            match self.scenarios.iter_mut().find(|known| known.id == scenario.id) {
                Some(known) => *known = scenario,
                None => self.scenarios.push(scenario),
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Scenario>> {
        self.scenarios.iter().find(|scenario| scenario.id == id).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().map(AsRef::as_ref)
    }

    /// Non-mutating view over scenarios accepted by filter.
    pub fn filter<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Scenario> + 'a {
        self.iter().filter(move |scenario| filter.accepts(scenario))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    fn attempt<'a>(state: &'a RepositoryState, last: &'a str, history: &'a [String]) -> Attempt<'a> {
        Attempt {
            state,
            last_command: last,
            history,
        }
    }

    #[test]
    fn pattern_matches_last_command() -> anyhow::Result<()> {
        let validator = Validator::pattern(r"^git\s+status$")?;
        let state = RepositoryState::new();
        pretty_assertions::assert_eq!(validator.check(&attempt(&state, "git status", &[])), Ok(true));
        pretty_assertions::assert_eq!(validator.check(&attempt(&state, "git status -s", &[])), Ok(false));
        Ok(())
    }

    #[test]
    fn fallible_predicate_reports_error() {
        let validator = Validator::fallible(|_| Err(ValidatorError("boom".into())));
        let state = RepositoryState::new();
        pretty_assertions::assert_eq!(
            validator.check(&attempt(&state, "git status", &[])),
            Err(ValidatorError("boom".into()))
        );
    }

    #[test]
    fn expectation_requires_every_condition() -> anyhow::Result<()> {
        let validator = Expectation {
            current_branch: Some("develop".into()),
            history_contains: vec!["git add".into()],
            last_command: Some("^git commit".into()),
            ..Default::default()
        }
        .into_validator()?;

        let mut state = RepositoryState::new();
        state.restore(Some(
            &StateOverride::default().with_branches(["main", "develop"]).with_branch("develop"),
        ));
        let history = vec!["git add .".to_owned(), "git commit -m x".to_owned()];

        pretty_assertions::assert_eq!(validator.check(&attempt(&state, "git commit -m x", &history)), Ok(true));
        pretty_assertions::assert_eq!(validator.check(&attempt(&state, "git status", &history)), Ok(false));
        pretty_assertions::assert_eq!(validator.check(&attempt(&state, "git commit -m x", &history[1..])), Ok(false));
        Ok(())
    }

    #[test_case(&["beginner"], Some(Level::Beginner), None; "level only")]
    #[test_case(&["adv", "rebase", "main"], Some(Level::Advanced), Some("rebase main"); "level and query")]
    #[test_case(&["branch"], None, Some("branch"); "query only")]
    #[test_case(&[], None, None; "empty")]
    #[test]
    fn filter_from_words(words: &[&str], level: Option<Level>, query: Option<&str>) {
        let filter = Filter::from_words(words.iter().copied());
        pretty_assertions::assert_eq!(
            filter,
            Filter {
                level,
                query: query.map(str::to_owned),
            }
        );
    }

    #[test]
    fn catalog_filter_is_pure() {
        let catalog = catalog::builtin();
        let before = catalog.len();
        let filter = Filter {
            level: Some(Level::Beginner),
            query: Some("BRANCH".into()),
        };

        let hits = catalog.filter(&filter).collect::<Vec<_>>();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|s| s.level == Level::Beginner && s.matches("branch")));
        pretty_assertions::assert_eq!(catalog.len(), before);
    }

    #[test]
    fn catalog_extend_replaces_same_id() {
        let mut catalog = Catalog::new([Scenario::new(
            "x",
            "old",
            Level::Beginner,
            "old",
            Validator::predicate(|_| false),
        )]);
        catalog.extend([Scenario::new(
            "x",
            "new",
            Level::Advanced,
            "new",
            Validator::predicate(|_| true),
        )]);
        pretty_assertions::assert_eq!(catalog.len(), 1);
        pretty_assertions::assert_eq!(catalog.get("x").map(|s| s.title.clone()), Some("new".into()));
    }
}
