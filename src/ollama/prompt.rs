//! Prompt templates for commit message generation.

use crate::i18n::Language;

/// Diffs longer than this are cut before being embedded in a prompt.
pub const MAX_PROMPT_DIFF_LENGTH: usize = 12_000;

struct PromptTemplate {
    language: Language,
    request: &'static str,
    examples: &'static str,
    forbidden: &'static str,
    answer_cue: &'static str,
    truncation_note: &'static str,
}

const TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        language: Language::En,
        request: "Create SHORT English commit message (3-5 words):",
        examples: "Examples: \"Add test function\", \"Fix auth bug\", \"Update README\", \"Remove unused code\"",
        forbidden: "DO NOT write: \"Here is\", \"The commit message\", explanations",
        answer_cue: "Answer:",
        truncation_note: "[diff truncated]",
    },
    PromptTemplate {
        language: Language::Vi,
        request: "Tạo commit message bằng tiếng Việt (chỉ 3-5 từ):",
        examples: "Ví dụ đúng: \"Thêm test function\", \"Sửa lỗi auth\", \"Cập nhật README\"",
        forbidden: "KHÔNG viết: \"Đây là commit message\" hoặc giải thích dài",
        answer_cue: "Trả lời:",
        truncation_note: "[diff đã bị cắt bớt]",
    },
];

fn template_for(language: Language) -> &'static PromptTemplate {
    TEMPLATES
        .iter()
        .find(|t| t.language == language)
        .unwrap_or(&TEMPLATES[0])
}

/// Render the generation prompt for a staged diff.
pub fn build_prompt(diff: &str, language: Language) -> String {
    let template = template_for(language);

    let diff = match truncate_at_char_boundary(diff, MAX_PROMPT_DIFF_LENGTH) {
        Some(head) => format!("{}\n{}", head, template.truncation_note),
        None => diff.to_string(),
    };

    format!(
        "Git diff:\n{}\n\n{}\n\n{}\n{}\n\n{}",
        diff, template.request, template.examples, template.forbidden, template.answer_cue
    )
}

/// Returns the leading slice when `text` exceeds `max` bytes.
fn truncate_at_char_boundary(text: &str, max: usize) -> Option<&str> {
    if text.len() <= max {
        return None;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Some(&text[..end])
}
