//! Choosing which installed model to run.

use tracing::warn;

use crate::error::OllamaError;

/// Pick the requested model if installed, otherwise the first available one.
///
/// A bare name like `llama2` matches an installed `llama2:latest`.
pub fn select_model(requested: &str, available: &[String]) -> Result<String, OllamaError> {
    let first = available.first().ok_or(OllamaError::NoModels)?;

    if let Some(found) = available.iter().find(|name| matches_model(requested, name)) {
        return Ok(found.clone());
    }

    warn!(
        "Model '{}' is not installed, falling back to '{}'",
        requested, first
    );
    Ok(first.clone())
}

fn matches_model(requested: &str, installed: &str) -> bool {
    if requested == installed {
        return true;
    }
    match installed.split_once(':') {
        Some((base, _tag)) => !requested.contains(':') && base == requested,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_wins() {
        let available = names(&["mistral:latest", "llama2:7b"]);
        assert_eq!(select_model("llama2:7b", &available).unwrap(), "llama2:7b");
    }

    #[test]
    fn test_bare_name_matches_tagged_model() {
        let available = names(&["mistral:latest", "llama2:latest"]);
        assert_eq!(
            select_model("llama2", &available).unwrap(),
            "llama2:latest"
        );
    }

    #[test]
    fn test_tag_mismatch_does_not_match() {
        let available = names(&["llama2:7b"]);
        assert!(!matches_model("llama2:13b", &available[0]));
    }

    #[test]
    fn test_missing_model_falls_back_to_first() {
        let available = names(&["mistral:latest", "codellama:latest"]);
        assert_eq!(
            select_model("llama2", &available).unwrap(),
            "mistral:latest"
        );
    }

    #[test]
    fn test_no_models_is_an_error() {
        let result = select_model("llama2", &[]);
        assert!(matches!(result, Err(OllamaError::NoModels)));
    }
}
