// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Achievement tracking.
//!
//! The scenario engine reports every first-time scenario completion to a
//! [`BadgeTracker`], and shows whatever badges come back. How badges are
//! earned, and whether progress survives the session, is entirely up to the
//! tracker.

use crate::scenario::{catalog::BRANCHING, Catalog, Level};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Earned achievement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub gradient: String,
    pub level: Level,
}

/// Badge progress summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub earned: usize,
    pub total: usize,
    pub percent: f64,
}

/// Progress and achievement collaborator.
pub trait BadgeTracker {
    /// Record scenario completion, returning badges earned just now.
    fn on_scenario_complete(&mut self, scenario_id: &str, command_count: usize) -> Vec<Badge>;

    /// Summary over all known badges.
    fn progress(&self) -> Progress;

    /// Ids of every scenario completed so far.
    fn completed_scenarios(&self) -> BTreeSet<String>;

    /// Every badge earned so far.
    fn earned_badges(&self) -> Vec<Badge>;
}

/// Condition under which a badge is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    FirstCompletion,
    OneShot,
    LevelComplete(Level),
    AllOf(&'static [&'static str]),
    Everything,
}

struct BadgeSpec {
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    gradient: &'static str,
    level: Level,
    rule: Rule,
}

impl BadgeSpec {
    fn to_badge(&self) -> Badge {
        Badge {
            id: self.id.into(),
            title: self.title.into(),
            icon: self.icon.into(),
            gradient: self.gradient.into(),
            level: self.level,
        }
    }
}

const BADGES: &[BadgeSpec] = &[
    BadgeSpec {
        id: "first-steps",
        title: "First Steps",
        icon: "🌱",
        gradient: "from-green-400 to-emerald-600",
        level: Level::Beginner,
        rule: Rule::FirstCompletion,
    },
    BadgeSpec {
        id: "one-shot",
        title: "One Shot",
        icon: "🎯",
        gradient: "from-amber-400 to-orange-600",
        level: Level::Beginner,
        rule: Rule::OneShot,
    },
    BadgeSpec {
        id: "beginner-grad",
        title: "Beginner Graduate",
        icon: "🎓",
        gradient: "from-sky-400 to-blue-600",
        level: Level::Beginner,
        rule: Rule::LevelComplete(Level::Beginner),
    },
    BadgeSpec {
        id: "branch-master",
        title: "Branch Master",
        icon: "🌿",
        gradient: "from-teal-400 to-cyan-600",
        level: Level::Intermediate,
        rule: Rule::AllOf(BRANCHING),
    },
    BadgeSpec {
        id: "intermediate-grad",
        title: "Intermediate Graduate",
        icon: "🚀",
        gradient: "from-violet-400 to-purple-600",
        level: Level::Intermediate,
        rule: Rule::LevelComplete(Level::Intermediate),
    },
    BadgeSpec {
        id: "advanced-grad",
        title: "Advanced Graduate",
        icon: "🧙",
        gradient: "from-fuchsia-400 to-pink-600",
        level: Level::Advanced,
        rule: Rule::LevelComplete(Level::Advanced),
    },
    BadgeSpec {
        id: "completionist",
        title: "Completionist",
        icon: "🏆",
        gradient: "from-yellow-300 to-amber-500",
        level: Level::Advanced,
        rule: Rule::Everything,
    },
];

/// In-memory badge tracker over a scenario catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryTracker {
    levels: BTreeMap<String, Level>,
    completed: BTreeSet<String>,
    earned: BTreeSet<String>,
}

impl MemoryTracker {
    /// Construct new tracker that knows the levels of the catalog's scenarios.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            levels: catalog
                .iter()
                .map(|scenario| (scenario.id.clone(), scenario.level))
                .collect(),
            ..Default::default()
        }
    }

    /// Seed tracker with previously recorded progress.
    ///
    /// Unknown badge ids are dropped.
    pub fn with_history(
        mut self,
        completed: impl IntoIterator<Item = String>,
        earned: impl IntoIterator<Item = String>,
    ) -> Self {
        self.completed.extend(completed);
        self.earned.extend(
            earned
                .into_iter()
                .filter(|id| BADGES.iter().any(|badge| badge.id == id)),
        );
        self
    }

    /// Ids of earned badges.
    pub fn earned_ids(&self) -> &BTreeSet<String> {
        &self.earned
    }

    fn level_complete(&self, level: Level) -> bool {
        let mut ids = self
            .levels
            .iter()
            .filter(|(_, known)| **known == level)
            .peekable();
        ids.peek().is_some() && ids.all(|(id, _)| self.completed.contains(id))
    }

    fn satisfied(&self, rule: Rule, command_count: usize) -> bool {
        match rule {
            Rule::FirstCompletion => !self.completed.is_empty(),
            Rule::OneShot => command_count == 1,
            Rule::LevelComplete(level) => self.level_complete(level),
            Rule::AllOf(ids) => ids.iter().all(|id| self.completed.contains(*id)),
            Rule::Everything => {
                !self.levels.is_empty() && self.levels.keys().all(|id| self.completed.contains(id))
            }
        }
    }
}

impl BadgeTracker for MemoryTracker {
    fn on_scenario_complete(&mut self, scenario_id: &str, command_count: usize) -> Vec<Badge> {
        self.completed.insert(scenario_id.to_owned());

        let mut awarded = Vec::new();
        for spec in BADGES {
            if self.earned.contains(spec.id) || !self.satisfied(spec.rule, command_count) {
                continue;
            }

            self.earned.insert(spec.id.to_owned());
            awarded.push(spec.to_badge());
        }

        awarded
    }

    fn progress(&self) -> Progress {
        let total = BADGES.len();
        let earned = self.earned.len();
        Progress {
            earned,
            total,
            percent: earned as f64 * 100.0 / total as f64,
        }
    }

    fn completed_scenarios(&self) -> BTreeSet<String> {
        self.completed.clone()
    }

    fn earned_badges(&self) -> Vec<Badge> {
        BADGES
            .iter()
            .filter(|spec| self.earned.contains(spec.id))
            .map(BadgeSpec::to_badge)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::catalog::builtin;
    use pretty_assertions::assert_eq;

    fn ids(badges: &[Badge]) -> Vec<&str> {
        badges.iter().map(|badge| badge.id.as_str()).collect()
    }

    #[test]
    fn first_completion_awards_once() {
        let mut tracker = MemoryTracker::new(&builtin());
        assert_eq!(ids(&tracker.on_scenario_complete("beg-01", 3)), vec!["first-steps"]);
        assert!(tracker.on_scenario_complete("beg-02", 4).is_empty());
        assert_eq!(ids(&tracker.on_scenario_complete("beg-03", 1)), vec!["one-shot"]);
        assert!(tracker.on_scenario_complete("beg-04", 1).is_empty());
    }

    #[test]
    fn level_and_catalog_completion() {
        let catalog = builtin();
        let mut tracker = MemoryTracker::new(&catalog);
        let mut all = Vec::new();
        for scenario in catalog.iter() {
            all.extend(tracker.on_scenario_complete(&scenario.id, 2));
        }

        assert_eq!(
            ids(&all),
            vec![
                "first-steps",
                "beginner-grad",
                "branch-master",
                "intermediate-grad",
                "advanced-grad",
                "completionist",
            ]
        );

        let progress = tracker.progress();
        assert_eq!(progress.earned, 6);
        assert_eq!(progress.total, 7);
        assert_eq!(tracker.completed_scenarios().len(), catalog.len());
    }

    #[test]
    fn seeded_history_is_respected() {
        let tracker = MemoryTracker::new(&builtin())
            .with_history(["beg-01".to_owned()], ["first-steps".to_owned(), "bogus".to_owned()]);
        assert_eq!(ids(&tracker.earned_badges()), vec!["first-steps"]);
        assert_eq!(tracker.progress().earned, 1);
        assert!(tracker.completed_scenarios().contains("beg-01"));
    }
}
