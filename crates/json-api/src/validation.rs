//! Request field checks shared by handlers.
//!
//! Each helper returns a 400 naming the offending field so clients can fix
//! the payload without guessing.

use salvo::prelude::StatusError;

pub(crate) fn length_between(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), StatusError> {
    let length = value.trim().chars().count();

    if length < min || length > max {
        return Err(StatusError::bad_request().brief(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }

    Ok(())
}

pub(crate) fn not_blank(field: &str, value: &str) -> Result<(), StatusError> {
    if value.trim().is_empty() {
        return Err(StatusError::bad_request().brief(format!("{field} is required")));
    }

    Ok(())
}

pub(crate) fn email(value: &str) -> Result<(), StatusError> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !value.chars().any(char::is_whitespace)
    });

    if !valid {
        return Err(StatusError::bad_request().brief("email must be a valid address"));
    }

    Ok(())
}

pub(crate) fn phone_number(field: &str, value: &str) -> Result<(), StatusError> {
    let digits = value.strip_prefix('+').unwrap_or(value);

    if !(7..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(StatusError::bad_request().brief(format!(
            "{field} must contain between 7 and 15 digits"
        )));
    }

    Ok(())
}

/// At least eight characters mixing upper and lower case letters, digits and
/// symbols.
pub(crate) fn strong_password(value: &str) -> Result<(), StatusError> {
    let strong = value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_punctuation());

    if !strong {
        return Err(StatusError::bad_request().brief(
            "password must be at least 8 characters with upper and lower case letters, \
             a digit and a symbol",
        ));
    }

    Ok(())
}
