use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INTERESTS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9,\s]+$").expect("interests pattern compiles"));

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty!")]
    EmptyName,

    #[error("Interests must be comma-separated letters and numbers!")]
    InvalidInterests,
}

/// Trimmed input that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub name: String,
    pub interests: String,
}

pub fn validate(name: &str, interests: &str) -> Result<ValidForm, ValidationError> {
    let name = name.trim();
    let interests = interests.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if interests.is_empty() || !INTERESTS_PATTERN.is_match(interests) {
        return Err(ValidationError::InvalidInterests);
    }

    Ok(ValidForm {
        name: name.to_string(),
        interests: interests.to_string(),
    })
}
