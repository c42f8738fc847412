//! The generate command: staged diff in, commit message (and commit) out.

pub mod prompt;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{GenerateError, GitError, OllamaError};
use crate::git::StagedChanges;
use crate::i18n::{Language, Message};
use crate::message::{CommitType, MessageOptions, finalize_message};
use crate::ollama::{CompletionRequest, InferenceClient, build_prompt, complete_with_retry, select_model};

pub use prompt::{Action, ActionPrompt, TerminalPrompt};

/// Settings for one run, merged from CLI flags and the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub model: String,
    pub temperature: f64,
    pub language: Language,
    pub message: MessageOptions,
    /// Commit without asking.
    pub commit: bool,
    /// Print the staged diff and stop.
    pub preview: bool,
    /// Print the message and never commit.
    pub dry_run: bool,
}

/// Values given on the command line. Unset fields fall back to the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOverrides {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub language: Option<String>,
    pub conventional: bool,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub commit: bool,
    pub preview: bool,
    pub dry_run: bool,
}

impl GenerateConfig {
    pub fn resolve(config: &Config, overrides: GenerateOverrides) -> Self {
        let language = overrides
            .language
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_else(|| config.language());

        let commit_type = overrides
            .commit_type
            .as_deref()
            .map(CommitType::parse_lenient)
            .or_else(|| config.default_commit_type());

        Self {
            model: overrides
                .model
                .unwrap_or_else(|| config.model.default_model.clone()),
            temperature: overrides.temperature.unwrap_or(config.model.temperature),
            language,
            message: MessageOptions {
                conventional: overrides.conventional || config.format.use_conventional_commits,
                commit_type,
                scope: overrides.scope.filter(|s| !s.trim().is_empty()),
                ..Default::default()
            },
            commit: overrides.commit,
            preview: overrides.preview,
            dry_run: overrides.dry_run,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Previewed,
    Printed(String),
    Committed { id: String, message: String },
    Cancelled,
}

/// Staged file list and diff text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSnapshot {
    pub files: Vec<String>,
    pub diff: String,
}

/// Read the index, failing when nothing is staged.
pub fn read_staged<R>(repo: &R) -> Result<StagedSnapshot, GitError>
where
    R: StagedChanges + ?Sized,
{
    if !repo.has_staged_changes()? {
        return Err(GitError::NoStagedChanges);
    }

    Ok(StagedSnapshot {
        files: repo.staged_files()?,
        diff: repo.staged_diff()?,
    })
}

/// Check the service is up and pick the model to run.
pub async fn resolve_model<C>(
    client: &C,
    requested: &str,
    host: &str,
) -> Result<String, GenerateError>
where
    C: InferenceClient + ?Sized,
{
    if !client.is_available().await {
        return Err(GenerateError::ServiceUnavailable {
            host: host.to_string(),
        });
    }

    let models = client.list_models().await?;
    debug!("Installed models: {:?}", models);
    Ok(select_model(requested, &models)?)
}

/// Ask the model for a message and shape it.
pub async fn generate_message<C>(
    client: &C,
    model: &str,
    diff: &str,
    config: &GenerateConfig,
) -> Result<String, OllamaError>
where
    C: InferenceClient + ?Sized,
{
    let request = CompletionRequest::new(
        model,
        build_prompt(diff, config.language),
        config.temperature as f32,
    );

    let raw = complete_with_retry(client, &request).await?;
    debug!("Raw completion: {:?}", raw);

    Ok(finalize_message(&raw, diff, &config.message))
}

/// Run the whole generate flow against a repository and a service.
pub async fn run_generate<R, C, P>(
    repo: &R,
    client: &C,
    prompt: &P,
    host: &str,
    config: &GenerateConfig,
) -> Result<Outcome, GenerateError>
where
    R: StagedChanges + ?Sized,
    C: InferenceClient + ?Sized,
    P: ActionPrompt + ?Sized,
{
    let lang = config.language;
    let staged = read_staged(repo)?;

    println!("{}", Message::StagedFiles.text(lang));
    for file in &staged.files {
        println!("  • {}", file);
    }
    println!();

    if config.preview {
        println!("{}", Message::StagedChanges.text(lang));
        println!("{}", staged.diff);
        return Ok(Outcome::Previewed);
    }

    println!("{}", Message::CheckingOllama.text(lang));
    let model = resolve_model(client, &config.model, host).await?;
    println!("✓ {}", Message::OllamaAvailable.text(lang));

    loop {
        println!("{} {}...", Message::Generating.text(lang), model);
        let message = generate_message(client, &model, &staged.diff, config).await?;

        println!();
        println!("{}", Message::GeneratedCommitMessage.text(lang));
        println!("{}", message);
        println!();

        if config.dry_run {
            return Ok(Outcome::Printed(message));
        }

        if config.commit {
            return commit(repo, message, lang);
        }

        match prompt.choose_action(lang)? {
            Action::Commit => return commit(repo, message, lang),
            Action::Edit => {
                return match prompt.edit_message(&message, lang)? {
                    Some(edited) if !edited.trim().is_empty() => {
                        commit(repo, edited.trim().to_string(), lang)
                    }
                    _ => {
                        println!("{}", Message::EmptyMessageCancelled.text(lang));
                        Ok(Outcome::Cancelled)
                    }
                };
            }
            Action::Regenerate => {
                info!("Regenerating commit message");
                continue;
            }
            Action::Cancel => {
                println!("{}", Message::CommitCancelled.text(lang));
                return Ok(Outcome::Cancelled);
            }
        }
    }
}

fn commit<R>(repo: &R, message: String, lang: Language) -> Result<Outcome, GenerateError>
where
    R: StagedChanges + ?Sized,
{
    let id = repo.commit(&message)?;
    println!("✓ {}", Message::Committed.text(lang));
    Ok(Outcome::Committed { id, message })
}
