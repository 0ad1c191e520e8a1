use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use frontend::page::render_page;
use roster::{
    Recommender, Store, StoreError, SubmitResponse, User,
    store::normalize_interests,
};
use tracing::{error, info};

use crate::{
    error::AppError,
    state::AppState,
    utils::{Submission, is_ajax, read_submission},
};

pub const MISSING_FIELDS: &str = "Please provide both name and interests!";
pub const MISROUTED: &str = "Error: This route should not be accessed. Form should submit to /";

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let store = state.store.lock().await;
    let response = snapshot(&store, None)?;

    Ok(Html(render_page(&response)))
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;
    info!(
        "Received submission - Name: {:?}, Interests: {:?}",
        submission.name, submission.interests
    );

    let response = {
        let store = state.store.lock().await;
        let error_message = register(&store, submission)?;

        snapshot(&store, error_message)?
    };

    if is_ajax(&headers) {
        return Ok(Json(response).into_response());
    }

    Ok(Html(render_page(&response)).into_response())
}

pub async fn misrouted_handler() -> impl IntoResponse {
    info!("Unexpected request to /submit");

    (StatusCode::NOT_FOUND, MISROUTED)
}

/// Stores the submission, or returns the message explaining why it was refused.
fn register(store: &Store, submission: Submission) -> Result<Option<String>, AppError> {
    let Some((name, interests)) = submission.fields() else {
        return Ok(Some(MISSING_FIELDS.to_string()));
    };

    let exists = store.name_exists(&name).unwrap_or_else(|e| {
        error!("Error checking name in {}: {e}", store.path().display());
        false
    });

    if exists {
        return Ok(Some(format!(
            "Error: The name '{name}' is already registered!"
        )));
    }

    store.append(&User::new(name, normalize_interests(&interests)))?;

    Ok(None)
}

/// Current users and recommendations. A file without its header row reads as empty.
fn snapshot(store: &Store, error_message: Option<String>) -> Result<SubmitResponse, AppError> {
    let users = match store.load_users() {
        Ok(users) => users,
        Err(e @ StoreError::MissingHeaders(_)) => {
            error!("Error: {e}");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    let recommendations = Recommender::new(&users).recommend_all();

    Ok(SubmitResponse {
        error_message,
        users,
        recommendations: Some(recommendations),
    })
}
