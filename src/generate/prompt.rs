//! Interactive choices after a message has been generated.

use dialoguer::{Editor, Select};

use crate::error::GenerateError;
use crate::i18n::{Language, Message};

/// What to do with a generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Commit,
    Edit,
    Regenerate,
    Cancel,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Commit,
        Action::Edit,
        Action::Regenerate,
        Action::Cancel,
    ];

    pub fn label(self) -> Message {
        match self {
            Action::Commit => Message::ActionCommit,
            Action::Edit => Message::ActionEdit,
            Action::Regenerate => Message::ActionRegenerate,
            Action::Cancel => Message::ActionCancel,
        }
    }
}

/// User interaction needed by the generate flow.
///
/// This abstraction allows scripting the user's choices in tests.
#[cfg_attr(test, mockall::automock)]
pub trait ActionPrompt {
    fn choose_action(&self, language: Language) -> Result<Action, GenerateError>;

    /// Let the user edit `message`. `None` means the editor was closed
    /// without saving.
    fn edit_message(
        &self,
        message: &str,
        language: Language,
    ) -> Result<Option<String>, GenerateError>;
}

/// Terminal prompts backed by dialoguer.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    editor: Option<String>,
}

impl TerminalPrompt {
    pub fn new(editor: Option<String>) -> Self {
        Self { editor }
    }
}

impl ActionPrompt for TerminalPrompt {
    fn choose_action(&self, language: Language) -> Result<Action, GenerateError> {
        let labels = Action::ALL.map(|action| action.label().text(language));

        let index = Select::new()
            .with_prompt(Message::ChooseAction.text(language))
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| GenerateError::PromptFailed(e.to_string()))?;

        Ok(Action::ALL[index])
    }

    fn edit_message(
        &self,
        message: &str,
        language: Language,
    ) -> Result<Option<String>, GenerateError> {
        println!("{}", Message::EditPrompt.text(language));

        let edited = match &self.editor {
            Some(cmd) => Editor::new().executable(cmd).edit(message),
            None => Editor::new().edit(message),
        };

        edited.map_err(|e| GenerateError::PromptFailed(e.to_string()))
    }
}
