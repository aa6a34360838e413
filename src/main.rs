// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use readaloud::annotations::{MemoryDocument, ScoreCard, get_scored_units, units_at};
use readaloud::app_config::{self, Config};
use readaloud::document::{Delta, Range};
use readaloud::formats::{Toolbar, toolbar};
use readaloud::relay::{MockRelay, ReadAloudSession, RelayState};
use readaloud::skill::{ReadIntent, User};
use readaloud::ssml::wrap_speak;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Selection given on the command line
#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// Start of the selection (characters, embeds count as one)
    #[arg(long, requires = "length")]
    index: Option<usize>,

    /// Length of the selection; 0 selects the whole document
    #[arg(long, requires = "index")]
    length: Option<usize>,
}

impl SelectionArgs {
    fn range(&self) -> Option<Range> {
        match (self.index, self.length) {
            (Some(index), Some(length)) => Some(Range::new(index, length)),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document (or a selection of it) into SSML
    Render {
        /// Document in delta JSON format
        #[arg(value_name = "DOCUMENT")]
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Wrap the fragment into a <speak> element
        #[arg(short, long)]
        speak: bool,

        /// Validate the fragment and print the report to stderr
        #[arg(short, long)]
        validate: bool,
    },

    /// Validate an SSML fragment
    Validate {
        /// File holding the fragment
        #[arg(value_name = "FRAGMENT")]
        input: PathBuf,
    },

    /// Show the score cards of an annotation document
    Scores {
        /// Annotation document in JSON format
        #[arg(value_name = "ANNOTATIONS")]
        input: PathBuf,

        /// Only show units covering this text offset
        #[arg(long)]
        at: Option<usize>,

        /// Print the cards as HTML instead of JSON
        #[arg(long)]
        html: bool,
    },

    /// Print the editor toolbar layout as JSON
    Toolbar,

    /// Run a read-aloud round trip against an offline relay
    Rehearse {
        /// Document in delta JSON format
        #[arg(value_name = "DOCUMENT")]
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Generate shell completions for readaloud
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// readaloud - Read rich text aloud through a voice assistant
///
/// Converts rich-text documents into SSML, validates fragments and shows
/// analysis scores of annotated texts.
#[derive(Parser, Debug)]
#[command(name = "readaloud")]
#[command(version)]
#[command(about = "Rich text to SSML for voice assistants")]
#[command(long_about = "readaloud converts rich-text documents into SSML fragments for a voice assistant.

EXAMPLES:
    readaloud render story.json                      # Convert the whole document
    readaloud render story.json --index 0 --length 42 # Convert a selection
    readaloud render -s -v story.json                # Wrap in <speak> and validate
    readaloud validate fragment.ssml                 # Check a fragment
    readaloud scores analysis.json --at 120          # Score cards around offset 120
    readaloud completions bash > readaloud.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "✖"),
            Level::Warn => ("1;33", "!"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "·"),
            Level::Trace => ("1;35", "…"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here, the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "readaloud", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    config.validate().context("Configuration validation failed")?;

    match cli.command {
        Commands::Render { input, selection, speak, validate } => {
            run_render(&config, &input, selection.range(), speak, validate)
        }
        Commands::Validate { input } => run_validate(&config, &input),
        Commands::Scores { input, at, html } => run_scores(&input, at, html),
        Commands::Toolbar => {
            let toolbar = Toolbar::new(&config.editor);
            println!("{}", serde_json::to_string_pretty(&toolbar)?);
            Ok(())
        }
        Commands::Rehearse { input, selection } => run_rehearse(&config, &input, selection.range()).await,
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_render(config: &Config, input: &Path, range: Option<Range>, speak: bool, validate: bool) -> Result<()> {
    let delta = Delta::from_file(input)?;
    let writer = config.ssml.writer()?;
    let fragment = writer.render(&delta.select(range));

    if validate {
        let report = config.ssml.validator().validate_fragment(&fragment);
        print_report(&report);
    }

    if speak {
        println!("{}", wrap_speak(&fragment));
    } else {
        println!("{}", fragment);
    }
    Ok(())
}

fn run_validate(config: &Config, input: &Path) -> Result<()> {
    let fragment = std::fs::read_to_string(input)
        .context(format!("Failed to read fragment: {}", input.display()))?;
    let report = config.ssml.validator().validate_fragment(fragment.trim());
    print_report(&report);

    if report.contains_errors() {
        return Err(anyhow!("{} error(s) in {}", report.errors.len(), input.display()));
    }
    info!("Fragment is valid: {}", input.display());
    Ok(())
}

fn print_report(report: &readaloud::ValidationReport) {
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    for error in &report.errors {
        log::error!("{}", error);
    }
}

fn run_scores(input: &Path, at: Option<usize>, html: bool) -> Result<()> {
    let document = MemoryDocument::from_file(input)?;
    let units = get_scored_units(&document)?;
    let selected: Vec<_> = match at {
        Some(position) => units_at(&units, position),
        None => units.iter().collect(),
    };
    debug!("Showing {} of {} scored units", selected.len(), units.len());

    let cards: Vec<ScoreCard> = selected.into_iter().map(ScoreCard::from_unit).collect();
    if html {
        for card in &cards {
            println!("{}", card.to_html());
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    }
    Ok(())
}

async fn run_rehearse(config: &Config, input: &Path, range: Option<Range>) -> Result<()> {
    let delta = Delta::from_file(input)?;
    let writer = config.ssml.writer()?;

    let relay = MockRelay::working();
    let session = ReadAloudSession::new(relay.clone(), &config.relay);
    session.connect().await?;

    toolbar::read_selection(&session, &writer, &delta, range).await?;
    session.on_state(RelayState::Listening).await?;
    info!("Relay played prompts: {:?}", relay.played_prompts());

    let intent = ReadIntent::new(config.ssml.validator());
    let response = intent.handle(&User::linked("rehearsal", &session));
    info!("Intent answered with {}", response.response_type.as_str());
    if let Some(report) = session.last_report() {
        print_report(&report);
    }
    println!("{}", response.speech());
    Ok(())
}
