//! User-facing status strings for the CLI.

use super::Language;

/// A localizable CLI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NotGitRepository,
    NoStagedChanges,
    StagedFiles,
    StagedChanges,
    CheckingOllama,
    OllamaAvailable,
    OllamaNotAvailable,
    NoModelsFound,
    PullModelHint,
    Generating,
    GeneratedCommitMessage,
    ChooseAction,
    ActionCommit,
    ActionEdit,
    ActionRegenerate,
    ActionCancel,
    EditPrompt,
    Committed,
    CommitCancelled,
    EmptyMessageCancelled,
}

impl Message {
    pub const ALL: [Message; 20] = [
        Message::NotGitRepository,
        Message::NoStagedChanges,
        Message::StagedFiles,
        Message::StagedChanges,
        Message::CheckingOllama,
        Message::OllamaAvailable,
        Message::OllamaNotAvailable,
        Message::NoModelsFound,
        Message::PullModelHint,
        Message::Generating,
        Message::GeneratedCommitMessage,
        Message::ChooseAction,
        Message::ActionCommit,
        Message::ActionEdit,
        Message::ActionRegenerate,
        Message::ActionCancel,
        Message::EditPrompt,
        Message::Committed,
        Message::CommitCancelled,
        Message::EmptyMessageCancelled,
    ];

    /// Look up the string for `language`.
    pub fn text(self, language: Language) -> &'static str {
        match language {
            Language::En => self.english(),
            Language::Vi => self.vietnamese(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Message::NotGitRepository => "Not a git repository. Run commit-genius inside a repository.",
            Message::NoStagedChanges => "No staged changes. Stage files with `git add` first.",
            Message::StagedFiles => "Staged files:",
            Message::StagedChanges => "Staged changes:",
            Message::CheckingOllama => "Checking Ollama service...",
            Message::OllamaAvailable => "Ollama is running",
            Message::OllamaNotAvailable => "Ollama is not available. Start it with `ollama serve`.",
            Message::NoModelsFound => "No Ollama models found.",
            Message::PullModelHint => "Pull a model first, e.g. `ollama pull llama2` (or another model).",
            Message::Generating => "Generating commit message with",
            Message::GeneratedCommitMessage => "Generated commit message:",
            Message::ChooseAction => "What would you like to do?",
            Message::ActionCommit => "Use this message and commit",
            Message::ActionEdit => "Edit the message before committing",
            Message::ActionRegenerate => "Generate another message",
            Message::ActionCancel => "Cancel",
            Message::EditPrompt => "Edit the commit message",
            Message::Committed => "Changes committed successfully!",
            Message::CommitCancelled => "Commit cancelled",
            Message::EmptyMessageCancelled => "Commit cancelled: empty commit message",
        }
    }

    fn vietnamese(self) -> &'static str {
        match self {
            Message::NotGitRepository => "Không phải kho git. Hãy chạy commit-genius trong một kho git.",
            Message::NoStagedChanges => "Không có thay đổi nào được stage. Dùng `git add` trước.",
            Message::StagedFiles => "Các tệp đã stage:",
            Message::StagedChanges => "Các thay đổi đã stage:",
            Message::CheckingOllama => "Đang kiểm tra dịch vụ Ollama...",
            Message::OllamaAvailable => "Ollama đang chạy",
            Message::OllamaNotAvailable => "Ollama không khả dụng. Khởi động bằng `ollama serve`.",
            Message::NoModelsFound => "Không tìm thấy model Ollama nào.",
            Message::PullModelHint => "Hãy tải một model trước, ví dụ `ollama pull llama2` (hoặc model khác).",
            Message::Generating => "Đang tạo thông điệp commit với",
            Message::GeneratedCommitMessage => "Thông điệp commit đã tạo:",
            Message::ChooseAction => "Bạn muốn làm gì?",
            Message::ActionCommit => "Dùng thông điệp này và commit",
            Message::ActionEdit => "Sửa thông điệp trước khi commit",
            Message::ActionRegenerate => "Tạo thông điệp khác",
            Message::ActionCancel => "Hủy",
            Message::EditPrompt => "Sửa thông điệp commit",
            Message::Committed => "Đã commit thành công!",
            Message::CommitCancelled => "Đã hủy commit",
            Message::EmptyMessageCancelled => "Đã hủy commit: thông điệp trống",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_message_is_translated() {
        for message in Message::ALL {
            for language in Language::ALL {
                assert!(
                    !message.text(language).is_empty(),
                    "{:?} missing for {}",
                    message,
                    language
                );
            }
        }
    }

    #[test]
    fn test_languages_differ() {
        assert_ne!(
            Message::Committed.text(Language::En),
            Message::Committed.text(Language::Vi)
        );
    }
}
