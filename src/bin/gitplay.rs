// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use gitplay::{
    badge::BadgeTracker,
    config::Config,
    interpreter::Interpreter,
    path::default_config_file,
    scenario::{Filter, Level},
    session::Session,
    store::{ProgressStore, StoredTracker},
    terminal::{
        self,
        queue::{OutputQueue, Receipt},
        AnsiRenderer, Delay, Entry, FontSize, Output, Render, Settings, Theme,
    },
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use inquire::{InquireError, Text};
use std::{io::stdout, path::PathBuf, process::exit, time::Duration};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "gitplay [options] <command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    async fn run(self) -> Result<()> {
        let config = load_config(self.config)?;
        match self.command {
            Command::Play(opts) => run_play(config, opts).await,
            Command::Scenarios(opts) => run_scenarios(config, opts),
            Command::Cheatsheet => run_cheatsheet(config),
            Command::Progress => run_progress(config),
            Command::Config => run_config(config),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Start interactive playground terminal.
    #[command(override_usage = "gitplay play [options]")]
    Play(PlayOptions),

    /// List available scenarios.
    #[command(override_usage = "gitplay scenarios [options]")]
    Scenarios(ScenariosOptions),

    /// Show Git cheat sheet.
    Cheatsheet,

    /// Show earned badges and completed scenarios.
    Progress,

    /// Show effective configuration.
    Config,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct PlayOptions {
    /// Start with scenario loaded.
    #[arg(short, long, value_name = "id")]
    pub scenario: Option<String>,

    /// Delay before command output shows up.
    #[arg(short, long, value_name = "instant|fast|normal|slow")]
    pub delay: Option<Delay>,

    /// Color theme.
    #[arg(short, long, value_name = "dark|light|mono")]
    pub theme: Option<Theme>,

    /// Output density.
    #[arg(short, long, value_name = "small|medium|large")]
    pub font_size: Option<FontSize>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct ScenariosOptions {
    /// Only list scenarios of this level.
    #[arg(short, long, value_name = "level")]
    pub level: Option<Level>,

    /// Only list scenarios whose title or description contains this text.
    #[arg(short, long, value_name = "text")]
    pub search: Option<String>,
}

#[tokio::main]
async fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run().await {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

async fn run() -> Result<()> {
    Cli::parse().run().await
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => default_config_file()?,
    };

    Ok(Config::load(path)?)
}

fn open_tracker(config: &Config) -> Result<(gitplay::Catalog, StoredTracker)> {
    let catalog = config.catalog()?;
    let store = ProgressStore::new(config.progress_path()?);
    let tracker = StoredTracker::open(&catalog, store);
    Ok((catalog, tracker))
}

fn show(settings: Settings, output: Output) {
    AnsiRenderer::new(stdout(), settings).entry(&Entry::Notice(output));
}

fn run_scenarios(config: Config, opts: ScenariosOptions) -> Result<()> {
    let (catalog, tracker) = open_tracker(&config)?;
    let filter = Filter {
        level: opts.level,
        query: opts.search,
    };
    show(
        config.settings,
        terminal::scenario_browser(catalog.filter(&filter), &tracker.completed_scenarios()),
    );

    Ok(())
}

fn run_cheatsheet(config: Config) -> Result<()> {
    show(config.settings, terminal::cheat_sheet());
    Ok(())
}

fn run_progress(config: Config) -> Result<()> {
    let (_, tracker) = open_tracker(&config)?;
    show(
        config.settings,
        terminal::progress_report(
            &tracker.progress(),
            &tracker.earned_badges(),
            tracker.completed_scenarios().len(),
        ),
    );

    Ok(())
}

fn run_config(mut config: Config) -> Result<()> {
    config.progress_file = Some(config.progress_path()?);
    print!("{config}");
    Ok(())
}

async fn run_play(config: Config, opts: PlayOptions) -> Result<()> {
    let mut settings = config.settings;
    settings.delay = opts.delay.unwrap_or(settings.delay);
    settings.theme = opts.theme.unwrap_or(settings.theme);
    settings.font_size = opts.font_size.unwrap_or(settings.font_size);

    let (catalog, tracker) = open_tracker(&config)?;
    let mut session = Session::new(catalog, Interpreter::new(config.author.to_string()), tracker);

    let bars = MultiProgress::new();
    let queue = OutputQueue::spawn(Suspended {
        inner: AnsiRenderer::new(stdout(), settings),
        bars: bars.clone(),
    });

    queue.push(Entry::Notice(welcome()), Duration::ZERO).rendered().await;
    if let Some(id) = opts.scenario {
        let entry = session
            .load_scenario(&id)
            .unwrap_or_else(|| warning(format!("no scenario with id {id:?}")));
        queue.push(entry, Duration::ZERO).rendered().await;
    }

    loop {
        let prompt = session.prompt();
        let line = match tokio::task::spawn_blocking(move || Text::new(&prompt).prompt()).await? {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(error) => return Err(error.into()),
        };

        let line = line.trim();
        if let Some(meta) = line.strip_prefix(':') {
            let before = settings;
            let entry = match meta_command(&mut session, &mut settings, meta) {
                Meta::Show(entry) => entry,
                Meta::Exit => break,
            };

            if settings != before {
                queue.configure(settings);
            }
            queue.push(entry, Duration::ZERO).rendered().await;
            continue;
        }

        let Some(response) = session.submit(line) else {
            continue;
        };

        let receipt = queue.push(response.entry, settings.delay.as_duration());
        wait_with_spinner(&bars, receipt, settings.delay).await?;
    }

    info!("leaving playground");
    queue.shutdown().await;

    Ok(())
}

/// Renderer that hides progress spinners while it writes.
struct Suspended<R> {
    inner: R,
    bars: MultiProgress,
}

impl<R> Render for Suspended<R>
where
    R: Render,
{
    fn entry(&mut self, entry: &Entry) {
        let inner = &mut self.inner;
        self.bars.suspend(|| inner.entry(entry));
    }

    fn configure(&mut self, settings: &Settings) {
        self.inner.configure(settings);
    }
}

async fn wait_with_spinner(bars: &MultiProgress, receipt: Receipt, delay: Delay) -> Result<()> {
    if delay == Delay::Instant {
        receipt.rendered().await;
        return Ok(());
    }

    let bar = bars.add(ProgressBar::new_spinner());
    bar.set_style(ProgressStyle::with_template("{spinner:.yellow} {msg}")?);
    bar.set_message("running...");
    bar.enable_steady_tick(Duration::from_millis(80));

    receipt.rendered().await;
    bar.finish_and_clear();
    bars.remove(&bar);

    Ok(())
}

enum Meta {
    Show(Entry),
    Exit,
}

fn meta_command<T>(session: &mut Session<T>, settings: &mut Settings, line: &str) -> Meta
where
    T: BadgeTracker,
{
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default();
    let rest = words.collect::<Vec<_>>();

    let entry = match name {
        "scenarios" => Entry::Notice(session.browser(&Filter::from_words(rest))),
        "cheatsheet" => Entry::Notice(terminal::cheat_sheet()),
        "load" => match rest.first() {
            Some(id) => session
                .load_scenario(id)
                .unwrap_or_else(|| warning(format!("no scenario with id {id:?}"))),
            None => warning("usage: :load <id>"),
        },
        "quit" => session.quit_scenario(),
        "reset" => session.reset(),
        "settings" => Entry::Notice(settings.panel()),
        "set" => match rest.as_slice() {
            [knob, value] => match settings.set(knob, value) {
                Ok(()) => Entry::Notice(settings.panel()),
                Err(error) => warning(error.to_string()),
            },
            _ => warning("usage: :set <knob> <value>"),
        },
        "progress" => Entry::Notice(session.progress()),
        "hint" => Entry::Notice(session.hint()),
        "exit" => return Meta::Exit,
        "" | "help" => Entry::Notice(terminal::help()),
        other => warning(format!("unknown playground command :{other}")),
    };

    Meta::Show(entry)
}

fn warning(text: impl AsRef<str>) -> Entry {
    let mut out = Output::new();
    out.warning(text);
    Entry::Notice(out)
}

fn welcome() -> Output {
    let mut out = Output::new();
    out.header("Git Command Playground");
    out.plain("Practice Git without touching a real repository.");
    out.muted("type `help` for commands, `:scenarios` to browse exercises, `:exit` to leave");
    out
}
