use regex::Regex;
use std::sync::LazyLock;

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Loose e-mail shape check (something@something.tld)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Truncates a string to a maximum number of characters with ellipsis
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ana@empresa.com.br"));
        assert!(is_valid_email("  ana@empresa.com  "));
        assert!(!is_valid_email("ana@empresa"));
        assert!(!is_valid_email("ana empresa@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Gestão", 10), "Gestão");
        assert_eq!(truncate("Criativos para Redes Sociais", 12), "Criativos...");
    }
}
