use http::StatusCode;
#[cfg(not(target_arch = "wasm32"))]
use reqwest::{Client, multipart::Form};
#[cfg(not(target_arch = "wasm32"))]
use roster::models::{REQUESTED_WITH, XML_HTTP_REQUEST};
use roster::models::{INTERESTS_FIELD, NAME_FIELD, SubmitResponse};
use thiserror::Error;
#[cfg(not(target_arch = "wasm32"))]
use tracing::debug;

use crate::validate::ValidForm;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("HTTP error! Status: {0}")]
    Status(StatusCode),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[cfg(target_arch = "wasm32")]
    #[error("Request failed: {0}")]
    Transport(#[from] gloo_net::Error),

    /// A browser API refused the call, e.g. building the form body.
    #[cfg(target_arch = "wasm32")]
    #[error("Browser error: {0}")]
    Browser(String),
}

/// Multipart fields of one submission, in the order they are sent.
pub fn form_fields(form: &ValidForm) -> [(&'static str, &str); 2] {
    [(NAME_FIELD, &form.name), (INTERESTS_FIELD, &form.interests)]
}

/// Sends one validated form and hands back the decoded server reply.
#[allow(async_fn_in_trait)]
pub trait Submit {
    async fn submit(&self, form: &ValidForm) -> Result<SubmitResponse, SubmitError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Submit for HttpSubmitter {
    async fn submit(&self, form: &ValidForm) -> Result<SubmitResponse, SubmitError> {
        let body = form_fields(form)
            .into_iter()
            .fold(Form::new(), |body, (field, value)| {
                body.text(field, value.to_string())
            });

        let response = self
            .client
            .post(&self.endpoint)
            .header(REQUESTED_WITH, XML_HTTP_REQUEST)
            .multipart(body)
            .send()
            .await?;

        debug!("Status: {}", response.status());

        if !response.status().is_success() {
            return Err(SubmitError::Status(response.status()));
        }

        Ok(response.json::<SubmitResponse>().await?)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn test_form_fields() {
        let form = ValidForm {
            name: "Alice".to_string(),
            interests: "reading, chess".to_string(),
        };

        assert_eq!(
            form_fields(&form),
            [("name", "Alice"), ("interests", "reading, chess")]
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let submitter = HttpSubmitter::new(format!("http://127.0.0.1:{port}/"));
        let form = ValidForm {
            name: "Alice".to_string(),
            interests: "chess".to_string(),
        };

        let result = submitter.submit(&form).await;

        assert!(matches!(result, Err(SubmitError::Transport(_))));
    }
}
