//! Field-level checks shared by the services

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{13}$").expect("ISBN pattern is valid"));

/// Reject empty or whitespace-only text
pub fn require_non_empty(value: &str, field_name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{} cannot be empty or just spaces.",
            field_name
        )));
    }
    Ok(())
}

/// ISBN must be exactly 13 ASCII digits
pub fn validate_isbn(isbn: &str) -> AppResult<()> {
    if !ISBN_RE.is_match(isbn) {
        return Err(AppError::Validation(
            "ISBN must be exactly 13 digits.".to_string(),
        ));
    }
    Ok(())
}

/// Birth year must be present and have four digits
pub fn validate_birth_year(birth_year: Option<i64>) -> AppResult<i32> {
    let year = birth_year
        .ok_or_else(|| AppError::Validation("Birth year must be a number.".to_string()))?;

    if !(1000..=9999).contains(&year) {
        return Err(AppError::Validation(
            "Year must be a 4 digit number.".to_string(),
        ));
    }
    Ok(year as i32)
}

/// Loose email shape check: an `@` and a `.` somewhere
pub fn validate_email(email: &str) -> AppResult<()> {
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

/// Case-insensitive name comparison used by the duplicate checks
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
