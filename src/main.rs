//! commit-genius - CLI entry point.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commit_genius::config::{Config, ConfigStore};
use commit_genius::editor::default_editor;
use commit_genius::generate::{GenerateConfig, GenerateOverrides, TerminalPrompt, run_generate};
use commit_genius::git::{StagedRepo, is_repository};
use commit_genius::i18n::Message;
use commit_genius::message::CommitType;
use commit_genius::{GenerateError, GitError, OllamaClient, OllamaError};

/// Generate commit messages for staged changes with a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "commit-genius")]
#[command(about = "Generate commit messages for staged changes with a local Ollama model")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message from the staged changes
    Generate(GenerateArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// List conventional commit types
    Types,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Ollama model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature (capped at 0.3 when sent)
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Commit with the generated message without asking
    #[arg(short, long)]
    commit: bool,

    /// Only show the staged diff
    #[arg(short, long)]
    preview: bool,

    /// Format as a conventional commit
    #[arg(long)]
    conventional: bool,

    /// Message language (en, vi)
    #[arg(short, long)]
    language: Option<String>,

    /// Conventional commit type (feat, fix, docs, ...)
    #[arg(long = "type")]
    commit_type: Option<String>,

    /// Conventional commit scope
    #[arg(long)]
    scope: Option<String>,

    /// Print the message and never commit
    #[arg(long)]
    dry_run: bool,

    /// Ollama host URL
    #[arg(long)]
    host: Option<String>,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ConfigArgs {
    /// Set a value, e.g. `model.defaultModel=mistral`
    #[arg(short, long, value_name = "KEY=VALUE")]
    set: Option<String>,

    /// Print one value, e.g. `model.temperature`
    #[arg(short, long, value_name = "KEY")]
    get: Option<String>,

    /// Print the whole configuration
    #[arg(short, long)]
    list: bool,

    /// Restore defaults
    #[arg(short, long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = ConfigStore::default_location().context("Failed to locate config file")?;
    debug!("Using config at {}", store.path().display());

    match cli.command {
        Command::Generate(args) => generate(&store, args).await,
        Command::Config(args) => config(&store, args),
        Command::Types => {
            print_types();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn generate(store: &ConfigStore, args: GenerateArgs) -> Result<()> {
    let file_config = store.load_or_default();
    let host = args
        .host
        .clone()
        .unwrap_or_else(|| file_config.model.host.clone());

    let settings = GenerateConfig::resolve(
        &file_config,
        GenerateOverrides {
            model: args.model,
            temperature: args.temperature,
            language: args.language,
            conventional: args.conventional,
            commit_type: args.commit_type,
            scope: args.scope,
            commit: args.commit,
            preview: args.preview,
            dry_run: args.dry_run,
        },
    );
    let lang = settings.language;

    if !is_repository(Path::new(".")) {
        bail!(Message::NotGitRepository.text(lang));
    }
    let repo = StagedRepo::discover(Path::new(".")).context("Failed to open repository")?;

    let client = OllamaClient::new(&host).context("Failed to create Ollama client")?;
    let prompt = TerminalPrompt::new(default_editor());

    match run_generate(&repo, &client, &prompt, &host, &settings).await {
        Ok(_) => Ok(()),
        Err(GenerateError::Git(GitError::NoStagedChanges)) => {
            println!("{}", Message::NoStagedChanges.text(lang));
            Ok(())
        }
        Err(GenerateError::ServiceUnavailable { .. }) => {
            bail!(Message::OllamaNotAvailable.text(lang));
        }
        Err(GenerateError::Ollama(OllamaError::NoModels)) => {
            eprintln!("{}", Message::NoModelsFound.text(lang));
            bail!(Message::PullModelHint.text(lang));
        }
        Err(e) => Err(e).context("Failed to generate commit message"),
    }
}

fn config(store: &ConfigStore, args: ConfigArgs) -> Result<()> {
    if let Some(assignment) = args.set {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("Invalid format. Use --set key=value");
        };
        store
            .set(key.trim(), value)
            .with_context(|| format!("Failed to set '{}'", key.trim()))?;
        println!("✓ Configuration saved");
        return Ok(());
    }

    if let Some(key) = args.get {
        let value = store.get(&key)?;
        match value {
            serde_json::Value::String(s) => println!("{}", s),
            serde_json::Value::Object(_) => println!("{}", serde_json::to_string_pretty(&value)?),
            other => println!("{}", other),
        }
        return Ok(());
    }

    if args.reset {
        store.reset().context("Failed to reset configuration")?;
        println!("✓ Configuration reset to defaults");
        return Ok(());
    }

    print_config(&store.load_or_default())
}

fn print_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn print_types() {
    let width = CommitType::ALL
        .iter()
        .map(|t| t.as_str().len())
        .max()
        .unwrap_or(0);

    for commit_type in CommitType::ALL {
        println!(
            "  {:<width$}  {}",
            commit_type.as_str(),
            commit_type.description(),
            width = width
        );
    }
}
