//! Normalization of raw model completions into a single commit subject line.
//!
//! Models rarely answer with just the message. They wrap it in quotes, prefix
//! it with "Here is the commit message:", number it, or add a paragraph of
//! explanation. [`clean_response`] runs a fixed sequence of small text
//! transformations over the completion. The order matters: later steps assume
//! the earlier ones already ran (filler words are only stripped once the text
//! has been reduced to its first line, for example).

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::i18n::Language;

/// Maximum length of a cleaned subject line, in characters.
pub const SUBJECT_MAX_LEN: usize = 50;

/// Marker appended to hard-truncated text.
pub const ELLIPSIS: &str = "...";

/// Leading meta-commentary, per language.
///
/// Matched case-insensitively at the start of the completion. `#` stands for
/// one or more ASCII digits. Longer phrases precede their own prefixes.
const BOILERPLATE: &[(Language, &[&str])] = &[
    (
        Language::En,
        &[
            "this is the commit message",
            "the commit message is",
            "the commit message:",
            "commit message:",
            "commit message",
            "commit:",
            "message:",
            "here is",
            "here are # possible",
            "this is",
            "for the changes",
            "for the change",
            "for this diff",
            "a possible",
            "diff result",
            "answer:",
            "response:",
            "result:",
            "based on",
            "according to",
        ],
    ),
    (
        Language::Vi,
        &[
            "dưới đây là",
            "đây là",
            "thông điệp commit:",
            "thông điệp commit",
            "cho những thay đổi",
            "trả lời:",
            "dựa trên",
        ],
    ),
];

/// Words models like to open a sentence with. Stripped once.
const FILLER_WORDS: &[&str] = &[
    "the ", "a ", "an ", "that ", "which ", "what ", "how ", "when ", "where ",
];

static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("numbered marker pattern is valid"));

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("bullet marker pattern is valid"));

/// Clean a raw model completion into a single subject line of at most
/// `max_len` characters.
///
/// Never fails: input that is nothing but boilerplate yields an empty string.
pub fn clean_response(raw: &str, max_len: usize) -> String {
    let text = strip_boilerplate(raw);
    let text = strip_trailing_period(text);
    let text = text.replace('"', "");
    let text = first_line(text.trim());
    let text = strip_numbered_marker(text);
    let text = strip_bullet_marker(text);
    let text = strip_filler_word(text);
    let text = strip_trailing_colon(text);
    let text = capitalize_first(text);
    fit_to_length(text, max_len)
}

/// Strip leading boilerplate phrases from every language table until none
/// matches.
pub fn strip_boilerplate(text: &str) -> &str {
    let mut rest = text.trim_start();
    while let Some(stripped) = BOILERPLATE
        .iter()
        .flat_map(|(_, phrases)| phrases.iter())
        .find_map(|phrase| strip_prefix_ignore_case(rest, phrase))
    {
        rest = stripped.trim_start();
    }
    rest
}

/// Phrases for a single language.
pub fn boilerplate_phrases(language: Language) -> &'static [&'static str] {
    BOILERPLATE
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, phrases)| *phrases)
        .unwrap_or(&[])
}

pub fn strip_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("").trim()
}

pub fn strip_numbered_marker(text: &str) -> &str {
    strip_match(&NUMBERED_MARKER, text)
}

pub fn strip_bullet_marker(text: &str) -> &str {
    strip_match(&BULLET_MARKER, text)
}

pub fn strip_filler_word(text: &str) -> &str {
    FILLER_WORDS
        .iter()
        .find_map(|word| strip_prefix_ignore_case(text, word))
        .unwrap_or(text)
}

pub fn strip_trailing_colon(text: &str) -> &str {
    text.strip_suffix(':').unwrap_or(text)
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shorten text that exceeds `max_len` characters.
///
/// Prefers the leading clause (up to the first `.`, `,`, `:` or `;`) when it
/// fits, otherwise hard-truncates with [`ELLIPSIS`].
pub fn fit_to_length(text: String, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text;
    }

    let head = text.split(['.', ',', ':', ';']).next().unwrap_or("");
    if !head.is_empty() && head.chars().count() <= max_len {
        return head.trim().to_string();
    }

    truncate_with_ellipsis(&text, max_len)
}

/// Keep `max_len - 3` characters and append [`ELLIPSIS`].
///
/// The result is exactly `max_len` characters when `text` is longer.
pub fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    let marker_len = ELLIPSIS.chars().count();
    if max_len < marker_len {
        return text.chars().take(max_len).collect();
    }

    let mut out: String = text.chars().take(max_len - marker_len).collect();
    out.push_str(ELLIPSIS);
    out
}

fn strip_match<'a>(pattern: &Regex, text: &'a str) -> &'a str {
    match pattern.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Case-insensitive prefix strip. `#` in `pattern` matches a run of digits.
fn strip_prefix_ignore_case<'a>(text: &'a str, pattern: &str) -> Option<&'a str> {
    let mut chars = text.char_indices().peekable();

    for expected in pattern.chars() {
        if expected == '#' {
            let mut digits = 0;
            while chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {
                digits += 1;
            }
            if digits == 0 {
                return None;
            }
            continue;
        }

        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }

    let end = chars.peek().map_or(text.len(), |(idx, _)| *idx);
    Some(&text[end..])
}
