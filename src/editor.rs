//! Finding an editor for interactive message editing.

use tracing::debug;

/// Editors tried, in order, when neither `$EDITOR` nor `$VISUAL` is set.
pub const FALLBACK_EDITORS: &[&str] = &["nano", "vim", "vi", "code", "gedit", "notepad"];

/// The editor command to launch, if any can be found.
pub fn default_editor() -> Option<String> {
    resolve_editor(
        std::env::var("EDITOR").ok(),
        std::env::var("VISUAL").ok(),
        |name| which::which(name).is_ok(),
    )
}

fn resolve_editor(
    editor: Option<String>,
    visual: Option<String>,
    is_installed: impl Fn(&str) -> bool,
) -> Option<String> {
    if let Some(cmd) = editor
        .into_iter()
        .chain(visual)
        .find(|cmd| !cmd.trim().is_empty())
    {
        return Some(cmd);
    }

    let found = FALLBACK_EDITORS
        .iter()
        .find(|name| is_installed(name))
        .map(|name| name.to_string());
    debug!("No editor configured, found on PATH: {:?}", found);
    found
}
