use tracing::{debug, error};

use crate::{
    dom::{Display, Page},
    error::PageError,
    page::{ERROR_MESSAGE, FORM, INTERESTS_INPUT, LOADING, NAME_INPUT},
    render::render_lists,
    submit::Submit,
    validate::{ValidationError, validate},
};

pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A required element was missing from the page.
    Aborted(PageError),
    Invalid(ValidationError),
    /// The server answered with its own error message.
    Rejected(String),
    /// Transport or HTTP status failure.
    Failed,
    Rendered,
}

pub struct FormHandler<S> {
    submitter: S,
}

impl<S: Submit> FormHandler<S> {
    /// Wires the submit handler once the page is loaded. `None` when the form is absent.
    pub fn on_dom_ready<P: Page>(page: &P, submitter: S) -> Option<Self> {
        if !page.has(FORM) {
            error!("Error: Form with ID \"{FORM}\" not found.");
            return None;
        }

        Some(Self { submitter })
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub async fn on_submit<P: Page>(&self, page: &mut P) -> Outcome {
        if ![NAME_INPUT, INTERESTS_INPUT, ERROR_MESSAGE, LOADING]
            .iter()
            .all(|id| page.has(id))
        {
            error!("Error: {}", PageError::MissingElements);
            return Outcome::Aborted(PageError::MissingElements);
        }

        let name = page.value(NAME_INPUT);
        let interests = page.value(INTERESTS_INPUT);

        page.set_display(ERROR_MESSAGE, Display::None);
        page.set_text(ERROR_MESSAGE, "");

        let form = match validate(&name, &interests) {
            Ok(form) => form,
            Err(e) => {
                show_error(page, &e.to_string());
                debug!("Validation failed: {e:?}");
                return Outcome::Invalid(e);
            }
        };

        page.set_display(LOADING, Display::Block);
        let result = self.submitter.submit(&form).await;
        page.set_display(LOADING, Display::None);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                show_error(page, GENERIC_ERROR);
                error!("Fetch error: {e}");
                return Outcome::Failed;
            }
        };

        debug!("Received data: {response:?}");

        if let Some(message) = response.error() {
            show_error(page, message);
            return Outcome::Rejected(message.to_string());
        }

        if let Err(e) = render_lists(page, &response) {
            error!("Error: {e}");
            return Outcome::Aborted(e);
        }

        page.set_value(NAME_INPUT, "");
        page.set_value(INTERESTS_INPUT, "");

        Outcome::Rendered
    }
}

fn show_error<P: Page>(page: &mut P, message: &str) {
    page.set_text(ERROR_MESSAGE, message);
    page.set_display(ERROR_MESSAGE, Display::Block);
}
