//! Request body validation.

use crate::error::AppError;
use crate::model::NewUser;
use regex::Regex;

/// Width of every text column.
pub const MAX_TEXT_LEN: usize = 120;
pub const MIN_PASSWORD_LEN: usize = 8;
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate catalog attributes given as parallel column/value lists.
    pub fn validate_attributes(columns: &[&str], values: &[&str]) -> Result<(), AppError> {
        for (col, value) in columns.iter().zip(values) {
            validate_text(col, value)?;
        }
        Ok(())
    }

    pub fn validate_new_user(user: &NewUser) -> Result<(), AppError> {
        validate_email(&user.email)?;
        validate_text("name", &user.name)?;
        if user.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    /// Login only checks presence; wrong values are the auth gate's concern.
    pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::Validation("email is required".into()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password is required".into()));
        }
        Ok(())
    }
}

fn validate_text(col: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), AppError> {
    validate_text("email", value)?;
    let re = Regex::new(EMAIL_PATTERN).map_err(|_| AppError::Internal("invalid email pattern".into()))?;
    if !re.is_match(value) {
        return Err(AppError::Validation("email must be a valid email".into()));
    }
    Ok(())
}
