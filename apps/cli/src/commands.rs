//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use textrelay_core::{ChunkObserver, WebhookProcessor};
use textrelay_shared::{AppConfig, ProcessingState, init_config, load_config, validate_endpoint};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// TextRelay — submit documents to a transform webhook in bounded chunks.
#[derive(Parser)]
#[command(
    name = "textrelay",
    version,
    about = "Process documents through a text-transform webhook, one bounded chunk at a time.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Process a document through the webhook and print the result markup.
    Process {
        /// Input file (reads stdin when omitted).
        input: Option<PathBuf>,

        /// Webhook endpoint URL (overrides the config file).
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Write the result here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Count the words in a document.
    Wordcount {
        /// Input file (reads stdin when omitted).
        input: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "textrelay=info",
        1 => "textrelay=debug",
        _ => "textrelay=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process {
            input,
            endpoint,
            out,
        } => cmd_process(input.as_deref(), endpoint.as_deref(), out.as_deref()).await,
        Command::Wordcount { input } => cmd_wordcount(input.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Read the input document from a file or stdin.
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read '{}': {e}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| eyre!("cannot read stdin: {e}"))?;
            Ok(text)
        }
    }
}

async fn cmd_process(
    input: Option<&Path>,
    endpoint: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let config = load_config()?;

    let endpoint = endpoint
        .map(String::from)
        .unwrap_or_else(|| config.webhook.url.clone());
    validate_endpoint(&endpoint)?;

    let text = read_input(input)?;
    let word_count = textrelay_chunker::count_words(&text);

    info!(endpoint, word_count, "processing document");

    let mut processor = WebhookProcessor::new();
    if let Some(secs) = config.webhook.timeout_secs {
        processor = processor.with_timeout(std::time::Duration::from_secs(secs));
    }

    let observer = CliProgress::new();
    let markup = processor.process(&endpoint, &text, &observer).await?;
    observer.finish();

    match out {
        Some(path) => {
            std::fs::write(path, &markup)
                .map_err(|e| eyre!("cannot write '{}': {e}", path.display()))?;
            eprintln!("  Wrote {} bytes to {}", markup.len(), path.display());
        }
        None => println!("{markup}"),
    }

    Ok(())
}

fn cmd_wordcount(input: Option<&Path>) -> Result<()> {
    let text = read_input(input)?;
    println!("{}", textrelay_chunker::count_words(&text));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress observer
// ---------------------------------------------------------------------------

/// Chunk-level progress bar using indicatif.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:32.cyan/blue} {pos:>3}% {msg}")
                .expect("valid progress template"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ChunkObserver for CliProgress {
    fn progress(&self, state: &ProcessingState) {
        self.bar.set_position(state.progress as u64);
        if state.is_processing {
            self.bar.set_message(format!(
                "chunk {}/{}",
                state.current_chunk, state.total_chunks
            ));
        }
    }
}
