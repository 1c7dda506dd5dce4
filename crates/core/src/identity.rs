//! Registration-time identity validation.
//!
//! CodaBrate accounts are restricted to university students: the email must
//! end with the configured institutional suffix (`.edu.tr` by default, set
//! via `REGISTRATION_EMAIL_SUFFIX`). Usernames are lowercase handles used in
//! profile URLs.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Default institutional email suffix accepted at registration.
pub const DEFAULT_EMAIL_SUFFIX: &str = ".edu.tr";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_]{3,24}$").expect("static regex"))
}

/// Validate that an email belongs to the configured institutional domain.
///
/// The check is a case-insensitive suffix match on the full address, the
/// same rule the registration form applies.
pub fn validate_institutional_email(email: &str, suffix: &str) -> Result<(), CoreError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation("A valid email is required".into()));
    }
    if !email.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
        return Err(CoreError::Validation(format!(
            "Registration requires a university email ending with {suffix}"
        )));
    }
    Ok(())
}

/// Validate a username handle: lowercase letters, digits, underscore, 3-24
/// characters.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username_regex().is_match(username) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Username must be 3-24 characters of lowercase letters, digits, or underscore".into(),
        ))
    }
}

/// Validate that a password meets the minimum length requirement.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
