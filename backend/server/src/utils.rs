use axum::{extract::Multipart, http::HeaderMap};
use roster::models::{INTERESTS_FIELD, NAME_FIELD, REQUESTED_WITH, XML_HTTP_REQUEST};
use tracing::debug;

use crate::error::AppError;

/// Raw submission, fields left as sent. Empty strings count as missing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: Option<String>,
    pub interests: Option<String>,
}

impl Submission {
    pub fn fields(self) -> Option<(String, String)> {
        let name = self.name.filter(|name| !name.is_empty())?;
        let interests = self.interests.filter(|interests| !interests.is_empty())?;

        Some((name, interests))
    }
}

pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::MalformedPayload)?
    {
        let Some(key) = field.name().map(str::to_string) else {
            continue;
        };

        let value = field.text().await.map_err(|_| AppError::MalformedPayload)?;

        match key.as_str() {
            NAME_FIELD => submission.name = Some(value),
            INTERESTS_FIELD => submission.interests = Some(value),
            _ => debug!("Ignoring unexpected field {key}"),
        }
    }

    Ok(submission)
}

pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .is_some_and(|value| value == XML_HTTP_REQUEST)
}
