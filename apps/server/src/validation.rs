//! Input validation for text fields accepted over the API.
//!
//! Deterministic single-pass checks with a valid/invalid outcome: a fixed
//! list of script-injection patterns, matched case-insensitively.

use crate::error::ServerError;

/// Patterns rejected anywhere in a text field.
const XSS_PATTERNS: &[&str] = &["<script", "javascript:", "onerror=", "onload="];

/// Maximum accepted length for free-text fields.
const MAX_TEXT_LEN: usize = 64 * 1024;

/// Validates one free-text field, naming it in the error.
pub fn validate_text(field: &str, value: &str) -> Result<(), ServerError> {
    if value.len() > MAX_TEXT_LEN {
        return Err(ServerError::BadRequest(format!(
            "field '{field}' exceeds {MAX_TEXT_LEN} bytes"
        )));
    }

    let lowered = value.to_lowercase();
    for pattern in XSS_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ServerError::BadRequest(format!(
                "field '{field}' contains a rejected pattern"
            )));
        }
    }

    Ok(())
}

/// Validates a 64-bit Steam ID: 17 digits, nothing else.
pub fn validate_steam_id(value: &str) -> Result<(), ServerError> {
    if value.len() != 17 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServerError::BadRequest(
            "steamId must be a 17-digit SteamID64".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_text() {
        assert!(validate_text("source", "New Game +").is_ok());
        assert!(validate_text("target", "Nuova Partita <3").is_ok());
    }

    #[test]
    fn rejects_script_tags_case_insensitively() {
        assert!(validate_text("source", "<SCRIPT>alert(1)</SCRIPT>").is_err());
        assert!(validate_text("source", "click javascript:void(0)").is_err());
        assert!(validate_text("source", "<img onerror=hack()>").is_err());
    }

    #[test]
    fn rejects_oversized_text() {
        let big = "a".repeat(MAX_TEXT_LEN + 1);
        assert!(validate_text("source", &big).is_err());
    }

    #[test]
    fn steam_id_must_be_seventeen_digits() {
        assert!(validate_steam_id("76561198000000001").is_ok());
        assert!(validate_steam_id("7656119800000000").is_err());
        assert!(validate_steam_id("76561198000000001x").is_err());
        assert!(validate_steam_id("not-a-steam-id-00").is_err());
    }
}
