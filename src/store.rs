// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Progress persistence.
//!
//! Completed scenarios and earned badges are kept in a small TOML file called
//! the __progress file__, by default at `$XDG_DATA_HOME/gitplay/progress.toml`.
//! Persistence is best-effort. A session never fails because progress could
//! not be saved, it just forgets about it once it ends.
//!
//! # Progress File Layout
//!
//! ```text
//! completed = ["beg-01", "beg-02"]
//! earned = ["first-steps"]
//! ```

use crate::{
    badge::{Badge, BadgeTracker, MemoryTracker, Progress},
    scenario::Catalog,
};

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs::{read_to_string, write},
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, warn};

/// Recorded progress.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProgressRecord {
    /// Ids of completed scenarios.
    pub completed: BTreeSet<String>,

    /// Ids of earned badges.
    pub earned: BTreeSet<String>,
}

/// Handle to the progress file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Construct new store handle. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Read recorded progress.
    ///
    /// A missing progress file means no progress yet.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::ReadProgressFile`] if progress file exists but
    ///   cannot be read.
    /// - Return [`StoreError::Deserialize`] if progress file is not valid.
    #[instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    pub fn load(&self) -> Result<ProgressRecord> {
        let content = match read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no progress file yet");
                return Ok(ProgressRecord::default());
            }
            Err(err) => {
                return Err(StoreError::ReadProgressFile {
                    source: err,
                    progress_path: self.path.clone(),
                })
            }
        };

        toml::de::from_str(&content).map_err(StoreError::Deserialize)
    }

    /// Write progress, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::CreateProgressDir`] if parent directory cannot
    ///   be created.
    /// - Return [`StoreError::Serialize`] if record cannot be serialized.
    /// - Return [`StoreError::WriteProgressFile`] if progress file cannot be
    ///   written to.
    #[instrument(skip(self, record), fields(path = %self.path.display()), level = "debug")]
    pub fn save(&self, record: &ProgressRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            mkdirp::mkdirp(parent).map_err(|err| StoreError::CreateProgressDir {
                source: err,
                progress_path: self.path.clone(),
            })?;
        }

        let content = toml::ser::to_string_pretty(record).map_err(StoreError::Serialize)?;
        write(&self.path, content.as_bytes()).map_err(|err| StoreError::WriteProgressFile {
            source: err,
            progress_path: self.path.clone(),
        })?;

        Ok(())
    }
}

/// Badge tracker that keeps its progress in a progress file.
#[derive(Debug, Clone)]
pub struct StoredTracker {
    inner: MemoryTracker,
    store: ProgressStore,
}

impl StoredTracker {
    /// Open tracker, seeding it from the progress file.
    ///
    /// An unreadable progress file is logged and treated as no progress.
    pub fn open(catalog: &Catalog, store: ProgressStore) -> Self {
        let record = store.load().unwrap_or_else(|error| {
            warn!("ignoring progress file: {error}");
            ProgressRecord::default()
        });

        Self {
            inner: MemoryTracker::new(catalog).with_history(record.completed, record.earned),
            store,
        }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    fn record(&self) -> ProgressRecord {
        ProgressRecord {
            completed: self.inner.completed_scenarios(),
            earned: self.inner.earned_ids().clone(),
        }
    }
}

impl BadgeTracker for StoredTracker {
    fn on_scenario_complete(&mut self, scenario_id: &str, command_count: usize) -> Vec<Badge> {
        let badges = self.inner.on_scenario_complete(scenario_id, command_count);
        if let Err(error) = self.store.save(&self.record()) {
            warn!("progress not saved: {error}");
        }

        badges
    }

    fn progress(&self) -> Progress {
        self.inner.progress()
    }

    fn completed_scenarios(&self) -> BTreeSet<String> {
        self.inner.completed_scenarios()
    }

    fn earned_badges(&self) -> Vec<Badge> {
        self.inner.earned_badges()
    }
}

/// Progress persistence error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Directory holding the progress file cannot be created.
    #[error("failed to create directory for progress file at {:?}", progress_path.display())]
    CreateProgressDir {
        #[source]
        source: std::io::Error,
        progress_path: PathBuf,
    },

    /// Progress file cannot be read from.
    #[error("failed to read from progress file at {:?}", progress_path.display())]
    ReadProgressFile {
        #[source]
        source: std::io::Error,
        progress_path: PathBuf,
    },

    /// Progress file cannot be written to.
    #[error("failed to write to progress file at {:?}", progress_path.display())]
    WriteProgressFile {
        #[source]
        source: std::io::Error,
        progress_path: PathBuf,
    },

    /// Progress file content is malformed.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Progress record cannot be serialized.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Friendly result alias :3
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
