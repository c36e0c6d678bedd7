// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Terminal view.
//!
//! Everything the playground shows the user goes through here. The
//! interpreter produces [`Output`], a list of toned lines, and the session
//! wraps it into an [`Entry`] together with the echoed prompt. A [`Render`]
//! implementation turns entries into something visible. The terminal view
//! never reads or writes repository state on its own.
//!
//! # Views
//!
//! Besides the scrolling command transcript, the terminal can show two static
//! views: the __scenario browser__ that lists exercises grouped by level, and
//! the __cheat sheet__ that lists common commands by category. A small
//! __settings panel__ controls purely cosmetic knobs.

pub mod queue;

use crate::{
    badge::{Badge, Progress},
    scenario::{Level, Scenario},
};

use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
    io::Write,
    str::FromStr,
    time::Duration,
};

/// Visual tone of a single output line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Plain,
    Success,
    Error,
    Warning,
    Info,
    Muted,
    Accent,
    Header,
}

/// Single line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

/// Toned lines produced by one command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Output {
    lines: Vec<Line>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every line of `text` with the given tone.
    pub fn push(&mut self, tone: Tone, text: impl AsRef<str>) -> &mut Self {
        for line in text.as_ref().lines() {
            self.lines.push(Line {
                tone,
                text: line.to_owned(),
            });
        }

        // INVARIANT: Empty text still yields a blank line.
        if text.as_ref().is_empty() {
            self.lines.push(Line {
                tone,
                text: String::new(),
            });
        }

        self
    }

    pub fn plain(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Plain, text)
    }

    pub fn success(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Success, text)
    }

    pub fn error(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Error, text)
    }

    pub fn warning(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Warning, text)
    }

    pub fn info(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Info, text)
    }

    pub fn muted(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Muted, text)
    }

    pub fn accent(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Accent, text)
    }

    pub fn header(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(Tone::Header, text)
    }

    /// Move all lines of another output to the end of this one.
    pub fn extend(&mut self, other: Output) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if any line contains the given text.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    /// Check if any line carries the error tone.
    pub fn has_error(&self) -> bool {
        self.lines.iter().any(|line| line.tone == Tone::Error)
    }
}

impl Display for Output {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        for line in &self.lines {
            writeln!(fmt, "{}", line.text)?;
        }

        Ok(())
    }
}

/// Echo of the submitted command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub directory: String,
    pub branch: String,
    pub command: String,
}

impl Display for Prompt {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "{} ({}) $ {}", self.directory, self.branch, self.command)
    }
}

/// Unit of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Command echo followed by its output.
    Command { prompt: Prompt, output: Output },

    /// Output not tied to a command, e.g., a scenario banner.
    Notice(Output),

    /// Wipe displayed output, then optionally show a banner again.
    Clear(Option<Output>),
}

/// Something that can display terminal entries.
pub trait Render: Send + 'static {
    /// Display one entry.
    fn entry(&mut self, entry: &Entry);

    /// Pick up changed settings.
    fn configure(&mut self, _settings: &Settings) {}
}

/// Render entries as styled text on a writer.
pub struct AnsiRenderer<W>
where
    W: Write,
{
    writer: W,
    settings: Settings,
}

impl<W> AnsiRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W, settings: Settings) -> Self {
        Self { writer, settings }
    }

    fn write_output(&mut self, output: &Output) -> std::io::Result<()> {
        let indent = match self.settings.font_size {
            FontSize::Large => "  ",
            _ => "",
        };

        for line in output.lines() {
            let text = self.settings.theme.paint(line.tone, &line.text);
            writeln!(self.writer, "{indent}{text}")?;
        }

        Ok(())
    }

    fn write_entry(&mut self, entry: &Entry) -> std::io::Result<()> {
        match entry {
            Entry::Command { prompt, output } => {
                let echo = self.settings.theme.paint_prompt(prompt);
                writeln!(self.writer, "{echo}")?;
                self.write_output(output)?;
            }
            Entry::Notice(output) => self.write_output(output)?,
            Entry::Clear(banner) => {
                // ANSI: erase display, cursor home.
                write!(self.writer, "\x1b[2J\x1b[H")?;
                if let Some(banner) = banner {
                    self.write_output(banner)?;
                }
            }
        }

        if self.settings.font_size != FontSize::Small {
            writeln!(self.writer)?;
        }

        self.writer.flush()
    }
}

impl<W> Render for AnsiRenderer<W>
where
    W: Write + Send + 'static,
{
    fn entry(&mut self, entry: &Entry) {
        if let Err(error) = self.write_entry(entry) {
            tracing::warn!("failed to render terminal entry: {error}");
        }
    }

    fn configure(&mut self, settings: &Settings) {
        self.settings = *settings;
    }
}

/// Cosmetic terminal knobs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub font_size: FontSize,
    pub theme: Theme,
    pub delay: Delay,
}

impl Settings {
    /// Change a knob by name.
    ///
    /// # Errors
    ///
    /// - Return [`SettingError`] if the knob or its value is unknown.
    pub fn set(&mut self, knob: &str, value: &str) -> Result<(), SettingError> {
        match knob {
            "font_size" | "font-size" | "font" => self.font_size = value.parse()?,
            "theme" => self.theme = value.parse()?,
            "delay" => self.delay = value.parse()?,
            _ => return Err(SettingError::UnknownKnob(knob.to_owned())),
        }

        Ok(())
    }

    /// Settings panel listing.
    pub fn panel(&self) -> Output {
        let mut out = Output::new();
        out.header("Settings");
        out.plain(format!("  font_size  {}   (small | medium | large)", self.font_size));
        out.plain(format!("  theme      {}   (dark | light | mono)", self.theme));
        out.plain(format!(
            "  delay      {} ({} ms)   (instant | fast | normal | slow)",
            self.delay,
            self.delay.as_duration().as_millis()
        ));
        out.muted("change with `:set <knob> <value>`");
        out
    }
}

/// Output density.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FromStr for FontSize {
    type Err = SettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(SettingError::InvalidValue("font_size", value.to_owned())),
        }
    }
}

impl Display for FontSize {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        })
    }
}

/// Color theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Mono,
}

impl Theme {
    fn color(&self, tone: Tone) -> Option<Color> {
        match (self, tone) {
            (Self::Mono, _) | (_, Tone::Plain) => None,
            (Self::Dark, Tone::Success) => Some(Color::Green),
            (Self::Dark, Tone::Error) => Some(Color::Red),
            (Self::Dark, Tone::Warning) => Some(Color::Yellow),
            (Self::Dark, Tone::Info) => Some(Color::Cyan),
            (Self::Dark, Tone::Muted) => Some(Color::DarkGrey),
            (Self::Dark, Tone::Accent) => Some(Color::Magenta),
            (Self::Dark, Tone::Header) => Some(Color::White),
            (Self::Light, Tone::Success) => Some(Color::DarkGreen),
            (Self::Light, Tone::Error) => Some(Color::DarkRed),
            (Self::Light, Tone::Warning) => Some(Color::DarkYellow),
            (Self::Light, Tone::Info) => Some(Color::DarkBlue),
            (Self::Light, Tone::Muted) => Some(Color::Grey),
            (Self::Light, Tone::Accent) => Some(Color::DarkMagenta),
            (Self::Light, Tone::Header) => Some(Color::Black),
        }
    }

    /// Style text according to tone.
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        let bold = tone == Tone::Header || (*self == Self::Mono && tone == Tone::Error);
        match (self.color(tone), bold) {
            (None, false) => text.to_owned(),
            (None, true) => text.bold().to_string(),
            (Some(color), false) => text.with(color).to_string(),
            (Some(color), true) => text.with(color).bold().to_string(),
        }
    }

    fn paint_prompt(&self, prompt: &Prompt) -> String {
        format!(
            "{} {} {} {}",
            self.paint(Tone::Info, &prompt.directory),
            self.paint(Tone::Accent, &format!("({})", prompt.branch)),
            self.paint(Tone::Muted, "$"),
            prompt.command
        )
    }
}

impl FromStr for Theme {
    type Err = SettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "mono" => Ok(Self::Mono),
            _ => Err(SettingError::InvalidValue("theme", value.to_owned())),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Mono => "mono",
        })
    }
}

/// Artificial delay between a submitted command and its output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delay {
    Instant,
    Fast,
    #[default]
    Normal,
    Slow,
}

impl Delay {
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(match self {
            Self::Instant => 0,
            Self::Fast => 100,
            Self::Normal => 300,
            Self::Slow => 800,
        })
    }
}

impl FromStr for Delay {
    type Err = SettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "instant" | "0" => Ok(Self::Instant),
            "fast" | "100" => Ok(Self::Fast),
            "normal" | "300" => Ok(Self::Normal),
            "slow" | "800" => Ok(Self::Slow),
            _ => Err(SettingError::InvalidValue("delay", value.to_owned())),
        }
    }
}

impl Display for Delay {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Instant => "instant",
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Slow => "slow",
        })
    }
}

/// Settings panel failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingError {
    #[error("unknown setting {0:?}")]
    UnknownKnob(String),

    #[error("invalid value {1:?} for setting {0}")]
    InvalidValue(&'static str, String),
}

/// Scenario browser view.
///
/// Lists scenarios grouped by level, marking completed ones.
pub fn scenario_browser<'a>(
    scenarios: impl IntoIterator<Item = &'a Scenario>,
    completed: &BTreeSet<String>,
) -> Output {
    let scenarios = scenarios.into_iter().collect::<Vec<_>>();
    let mut out = Output::new();
    out.header("Scenarios");

    if scenarios.is_empty() {
        out.muted("  no scenarios match the current filter");
        return out;
    }

    for level in [Level::Beginner, Level::Intermediate, Level::Advanced] {
        let group = scenarios
            .iter()
            .filter(|scenario| scenario.level == level)
            .collect::<Vec<_>>();
        if group.is_empty() {
            continue;
        }

        out.accent(format!("{level}"));
        for scenario in group {
            let mark = if completed.contains(&scenario.id) { "✓" } else { " " };
            let line = format!("  [{mark}] {:<8} {}", scenario.id, scenario.title);
            if completed.contains(&scenario.id) {
                out.success(line);
            } else {
                out.plain(line);
            }
        }
    }

    out.muted("load one with `:load <id>`");
    out
}

/// Static cheat sheet view.
pub fn cheat_sheet() -> Output {
    let mut out = Output::new();
    out.header("Git Cheat Sheet");
    for (category, commands) in CHEAT_SHEET {
        out.accent(*category);
        for (command, summary) in *commands {
            out.plain(format!("  {command:<28} {summary}"));
        }
    }
    out
}

const CHEAT_SHEET: &[(&str, &[(&str, &str)])] = &[
    (
        "Getting started",
        &[
            ("git init", "create a new repository"),
            ("git clone <url>", "copy a remote repository"),
            ("git status", "show staged and unstaged changes"),
        ],
    ),
    (
        "Snapshots",
        &[
            ("git add <file>", "stage a file"),
            ("git add .", "stage everything"),
            ("git commit -m \"<msg>\"", "record staged changes"),
            ("git diff [--staged]", "show changes"),
            ("git log [--oneline]", "show commit history"),
        ],
    ),
    (
        "Branching",
        &[
            ("git branch", "list branches"),
            ("git branch <name>", "create a branch"),
            ("git branch -m <name>", "rename the current branch"),
            ("git branch -d <name>", "delete a branch"),
            ("git checkout <name>", "switch branches"),
            ("git checkout -b <name>", "create and switch"),
            ("git switch -c <name>", "create and switch"),
            ("git merge <name>", "merge a branch into the current one"),
        ],
    ),
    (
        "Remotes",
        &[
            ("git remote -v", "list remotes"),
            ("git fetch", "download remote changes"),
            ("git pull", "fetch and merge"),
            ("git push [-u origin <branch>]", "upload commits"),
        ],
    ),
    (
        "Undoing",
        &[
            ("git stash", "shelve uncommitted work"),
            ("git stash pop", "restore shelved work"),
            ("git reset [--soft|--hard] <ref>", "move the branch tip"),
            ("git revert <hash>", "undo a commit with a new commit"),
            ("git restore <file>", "discard working tree changes"),
        ],
    ),
];

/// Scenario goal banner.
pub fn scenario_banner(scenario: &Scenario) -> Output {
    let mut out = Output::new();
    out.header(format!("Scenario {} · {} ({})", scenario.id, scenario.title, scenario.level));
    out.info(format!("Goal: {}", scenario.description));
    out.muted("type `:hint` for a hint, `:quit` to leave the scenario");
    out
}

/// Scenario completion notice with newly earned badges.
pub fn completion_notice(scenario: &Scenario, badges: &[Badge]) -> Output {
    let mut out = Output::new();
    out.success(format!("✓ Scenario complete: {}", scenario.title));
    for badge in badges {
        out.accent(format!("{} Badge earned: {} ({})", badge.icon, badge.title, badge.level));
    }
    out
}

/// Progress summary.
pub fn progress_report(progress: &Progress, earned: &[Badge], completed: usize) -> Output {
    let mut out = Output::new();
    out.header("Progress");
    out.plain(format!(
        "  badges     {}/{} ({:.0}%)",
        progress.earned, progress.total, progress.percent
    ));
    out.plain(format!("  scenarios  {completed} completed"));
    for badge in earned {
        out.accent(format!("  {} {}", badge.icon, badge.title));
    }
    out
}

/// Static terminal help.
pub fn help() -> Output {
    let mut out = Output::new();
    out.header("Available commands");
    out.plain("  git <command> [args]   run a simulated git command");
    out.plain("  clear                  clear the terminal");
    out.plain("  help                   show this help");
    out.header("Playground commands");
    out.plain("  :scenarios [level] [search]   browse scenarios");
    out.plain("  :load <id>                    start a scenario");
    out.plain("  :hint                         hint for the active scenario");
    out.plain("  :quit                         leave the active scenario");
    out.plain("  :reset                        reset the mock repository");
    out.plain("  :cheatsheet                   show the git cheat sheet");
    out.plain("  :settings | :set <k> <v>      show or change settings");
    out.plain("  :progress                     show earned badges");
    out.plain("  :exit                         leave the playground");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test]
    fn output_splits_multiline_text() {
        let mut out = Output::new();
        out.success("one\ntwo").error("");
        pretty_assertions::assert_eq!(
            out.lines(),
            [
                Line { tone: Tone::Success, text: "one".into() },
                Line { tone: Tone::Success, text: "two".into() },
                Line { tone: Tone::Error, text: String::new() },
            ]
        );
        assert!(out.has_error());
        pretty_assertions::assert_eq!(out.to_string(), "one\ntwo\n\n");
    }

    #[test_case("delay", "slow", Settings { delay: Delay::Slow, ..Default::default() }; "delay preset")]
    #[test_case("delay", "100", Settings { delay: Delay::Fast, ..Default::default() }; "delay millis")]
    #[test_case("theme", "mono", Settings { theme: Theme::Mono, ..Default::default() }; "theme")]
    #[test_case("font", "large", Settings { font_size: FontSize::Large, ..Default::default() }; "font alias")]
    #[test]
    fn settings_set_knob(knob: &str, value: &str, expect: Settings) {
        let mut settings = Settings::default();
        pretty_assertions::assert_eq!(settings.set(knob, value), Ok(()));
        pretty_assertions::assert_eq!(settings, expect);
    }

    #[test]
    fn settings_reject_unknown() {
        let mut settings = Settings::default();
        pretty_assertions::assert_eq!(
            settings.set("volume", "11"),
            Err(SettingError::UnknownKnob("volume".into()))
        );
        pretty_assertions::assert_eq!(
            settings.set("delay", "forever"),
            Err(SettingError::InvalidValue("delay", "forever".into()))
        );
        pretty_assertions::assert_eq!(settings, Settings::default());
    }

    #[test]
    fn mono_renderer_writes_plain_prompt() {
        let settings = Settings {
            theme: Theme::Mono,
            font_size: FontSize::Small,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        {
            let mut renderer = AnsiRenderer::new(&mut buffer, settings);
            let mut output = Output::new();
            output.plain("nothing to commit, working tree clean");
            renderer
                .write_entry(&Entry::Command {
                    prompt: Prompt {
                        directory: "~/my-project".into(),
                        branch: "main".into(),
                        command: "git status".into(),
                    },
                    output,
                })
                .unwrap();
        }
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("(main)"));
        assert!(text.ends_with("nothing to commit, working tree clean\n"));
    }
}
