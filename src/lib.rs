// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Git command playground.
//!
//! A safe place to practice Git. Commands typed into the playground terminal
//! never touch a real repository. Instead, they drive a small mock
//! [`RepositoryState`] through the [`Interpreter`], which prints output that
//! looks like what Git itself would say.
//!
//! # Scenarios
//!
//! Guided exercises called __scenarios__ give the user a goal, e.g., "rename
//! the current branch to main-v2". A scenario may seed the mock repository
//! with a starting state, and knows how to tell when its goal was reached.
//! The [`ScenarioEngine`] checks the active scenario after every command, and
//! reports first-time completions to a [`BadgeTracker`] that hands out
//! achievements.
//!
//! # Sessions
//!
//! A [`Session`] ties everything together for one user. Front ends submit raw
//! input lines and display the terminal entries that come back, optionally
//! through an [`OutputQueue`] that adds a cosmetic "thinking" delay while
//! keeping output in submission order.

pub mod badge;
pub mod config;
pub mod engine;
pub mod interpreter;
pub mod parser;
pub mod path;
pub mod repo;
pub mod scenario;
pub mod session;
pub mod store;
pub mod terminal;

pub use badge::{Badge, BadgeTracker, MemoryTracker, Progress};
pub use config::{Config, ConfigError};
pub use engine::{Completion, ScenarioEngine};
pub use interpreter::Interpreter;
pub use repo::{RepositoryState, StateOverride};
pub use scenario::{Catalog, Filter, Level, Scenario, Validator};
pub use session::{Response, Session};
pub use store::{ProgressStore, StoredTracker};
pub use terminal::{
    queue::{OutputQueue, Receipt, Transcript},
    AnsiRenderer, Entry, Output, Render, Settings,
};
