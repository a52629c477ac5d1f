// file: src/utils/validation.rs
// description: input validation applied at the caller boundary
// reference: input validation patterns

use crate::error::{EditorError, Result};

pub struct Validator;

impl Validator {
    /// Trim a user-entered title; blank titles are rejected.
    pub fn title(input: &str) -> Result<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EditorError::Validation("Title cannot be empty".to_string()));
        }
        Ok(trimmed.to_string())
    }

    pub fn debounce_ms(ms: u64) -> Result<()> {
        if ms == 0 {
            return Err(EditorError::Validation(
                "debounce_ms must be greater than 0".to_string(),
            ));
        }

        if ms > 10_000 {
            return Err(EditorError::Validation(
                "debounce_ms too large (max 10000)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn storage_key(key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(EditorError::Validation(
                "Storage key cannot be empty".to_string(),
            ));
        }

        if key.chars().any(char::is_whitespace) {
            return Err(EditorError::Validation(format!(
                "Storage key contains whitespace: {:?}",
                key
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trims() {
        assert_eq!(Validator::title("  Notes \n").unwrap(), "Notes");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Validator::title("").is_err());
        assert!(matches!(
            Validator::title(" \t "),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_debounce_bounds() {
        assert!(Validator::debounce_ms(150).is_ok());
        assert!(Validator::debounce_ms(0).is_err());
        assert!(Validator::debounce_ms(60_000).is_err());
    }

    #[test]
    fn test_storage_key() {
        assert!(Validator::storage_key("mdpad-documents").is_ok());
        assert!(Validator::storage_key("").is_err());
        assert!(Validator::storage_key("two words").is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("héllo wörld", 4), "héll...");
    }
}
