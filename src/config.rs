// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of the playground configuration file to simplify the
//! process of serialization and deserialization. The file lives at
//! `$XDG_CONFIG_HOME/gitplay/config.toml` by default, and is entirely
//! optional. A missing file means defaults all the way down.
//!
//! # General Layout
//!
//! The configuration file is composed of three parts: terminal settings, the
//! identity used to sign simulated commits, and a listing of extra scenarios
//! to append to the built-in catalog.
//!
//! ```text
//! progress_file = "$XDG_DATA_HOME/gitplay/progress.toml"
//!
//! [settings]
//! font_size = "medium"
//! theme = "dark"
//! delay = "normal"
//!
//! [author]
//! name = "You"
//! email = "you@example.com"
//!
//! [[scenario]]
//! id = "custom-01"
//! title = "Status Check"
//! level = "beginner"
//! description = "Look at the working tree."
//! pattern = '^git\s+status$'
//! ```

use crate::{
    path::{default_progress_file, NoWayHome},
    repo::StateOverride,
    scenario::{catalog, Catalog, Expectation, Level, Scenario, Validator},
    terminal::Settings,
};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, instrument};

/// Playground configuration.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Where to keep scenario and badge progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_file: Option<PathBuf>,

    /// Cosmetic terminal settings.
    pub settings: Settings,

    /// Identity that signs simulated commits.
    pub author: Author,

    /// Extra scenarios appended to the built-in catalog.
    #[serde(rename = "scenario", skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ScenarioDefinition>,
}

impl Config {
    /// Load configuration file at `path`.
    ///
    /// A missing configuration file means default configuration.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::ReadConfig`] if the file exists but cannot be
    ///   read.
    /// - Return [`ConfigError::Deserialize`] if the file is not valid.
    /// - Return [`ConfigError::ShellExpansion`] if shell expansion fails.
    #[instrument(skip(path), fields(path = %path.as_ref().display()), level = "debug")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match read_to_string(path.as_ref()) {
            Ok(content) => content.parse(),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::ReadConfig {
                source: err,
                config_path: path.as_ref().to_path_buf(),
            }),
        }
    }

    /// Path to progress file, falling back to the default location.
    ///
    /// # Errors
    ///
    /// - Return [`NoWayHome`] if no progress file is configured and the
    ///   default location cannot be determined.
    pub fn progress_path(&self) -> Result<PathBuf, NoWayHome> {
        match &self.progress_file {
            Some(path) => Ok(path.clone()),
            None => default_progress_file(),
        }
    }

    /// Built-in catalog with configured scenarios appended.
    ///
    /// A configured scenario with the id of a built-in one replaces it.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Regex`] if a scenario pattern is invalid.
    /// - Return [`ConfigError::MissingValidator`] if a scenario has neither a
    ///   pattern nor an expectation.
    pub fn catalog(&self) -> Result<Catalog> {
        let extra = self
            .scenarios
            .iter()
            .cloned()
            .map(Scenario::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut catalog = catalog::builtin();
        catalog.extend(extra);
        Ok(catalog)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut config: Config = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on progress file field.
        if let Some(path) = config.progress_file.take() {
            config.progress_file = Some(PathBuf::from(
                shellexpand::full(path.to_string_lossy().as_ref())
                    .map_err(ConfigError::ShellExpansion)?
                    .into_owned(),
            ));
        }

        Ok(config)
    }
}

impl Display for Config {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Commit signature.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "You".into(),
            email: "you@example.com".into(),
        }
    }
}

impl Display for Author {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "{} <{}>", self.name, self.email)
    }
}

/// Scenario as written in configuration.
///
/// Needs either a `pattern` matched against the last command, or an `expect`
/// table of conditions over repository state. The `expect` table wins when
/// both are given.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDefinition {
    pub id: String,
    pub title: String,
    pub level: Level,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<StateOverride>,
}

impl TryFrom<ScenarioDefinition> for Scenario {
    type Error = ConfigError;

    fn try_from(definition: ScenarioDefinition) -> Result<Self, Self::Error> {
        let ScenarioDefinition {
            id,
            title,
            level,
            description,
            hint,
            pattern,
            expect,
            initial_state,
        } = definition;

        let validator = match (expect, pattern) {
            (Some(expect), _) => expect.into_validator(),
            (None, Some(pattern)) => Validator::pattern(&pattern),
            (None, None) => return Err(ConfigError::MissingValidator(id)),
        }
        .map_err(|err| ConfigError::Regex {
            source: err,
            id: id.clone(),
        })?;

        let mut scenario = Scenario::new(id, title, level, description, validator);
        scenario.hint = hint;
        scenario.initial_state = initial_state;

        Ok(scenario)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),

    /// Configuration file cannot be read from.
    #[error("failed to read configuration file at {:?}", config_path.display())]
    ReadConfig {
        #[source]
        source: std::io::Error,
        config_path: PathBuf,
    },

    /// Scenario validator pattern is not a valid regular expression.
    #[error("scenario {id:?} has invalid pattern")]
    Regex {
        #[source]
        source: regex::Error,
        id: String,
    },

    /// Scenario defines no way to tell when it is complete.
    #[error("scenario {0:?} needs a pattern or an expect table")]
    MissingValidator(String),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
