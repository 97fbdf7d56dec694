//! Input validation helpers
//!
//! Presence checks only: a required field is one that is present and
//! non-empty after trimming. No format or length rules are applied.

/// Trim a required text field, returning `None` when nothing is left
pub fn required_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalize an email for storage and comparison: trimmed, lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text(Some("  R&D ")), Some("R&D".to_string()));
    }

    #[test]
    fn test_required_text_rejects_blank_and_missing() {
        assert_eq!(required_text(Some("   ")), None);
        assert_eq!(required_text(Some("")), None);
        assert_eq!(required_text(None), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@X.COM "), "ada@x.com");
        assert_eq!(normalize_email("ada@x.com"), "ada@x.com");
    }
}
