use super::ApiError;
use crate::constants::{content_types, usage};

pub fn validate_required<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = validate_required(email, "Email")?;

    // Full RFC 5322 parsing is the mail relay's problem; catch the obvious.
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !well_formed {
        return Err(ApiError::validation(format!("Invalid email: {}", email)));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    Ok(password)
}

pub fn validate_user_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_content_type(content_type: &str) -> Result<&str, ApiError> {
    if content_type != content_types::BLOG && content_type != content_types::WEBSITE {
        return Err(ApiError::validation(format!(
            "Invalid content type: {}. Use '{}' or '{}'",
            content_type,
            content_types::BLOG,
            content_types::WEBSITE
        )));
    }
    Ok(content_type)
}

pub fn validate_usage_type(kind: &str) -> Result<&str, ApiError> {
    if kind != usage::GENERATION && kind != usage::REGENERATION {
        return Err(ApiError::validation(format!(
            "Invalid usage type: {}. Use '{}' or '{}'",
            kind,
            usage::GENERATION,
            usage::REGENERATION
        )));
    }
    Ok(kind)
}
