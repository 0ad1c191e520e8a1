//! # Index Page
//!
//! Element ids the form handler relies on, and the page skeleton carrying them.
//!
//! The server renders this same skeleton on `GET /` (and on plain form posts), so the
//! handler and the server always agree on where things live.
//!
//! The page loads the browser build of this crate from [`CLIENT_SCRIPT`]. Without it the
//! form still works as a plain multipart post answered with a fresh page.
use roster::models::{INTERESTS_FIELD, NAME_FIELD, SubmitResponse};
use tracing::error;

use crate::{
    dom::{Display, Document, Element},
    render::render_lists,
};

pub const FORM: &str = "interests-form";
pub const NAME_INPUT: &str = "name";
pub const INTERESTS_INPUT: &str = "interests";
pub const ERROR_MESSAGE: &str = "error-message";
pub const LOADING: &str = "loading";
pub const USERS_LIST: &str = "users-list";
pub const RECOMMENDATIONS_SECTION: &str = "recommendations-section";

pub const TITLE: &str = "Interest Matcher";

/// Output of `wasm-pack build --target web`, served by the backend under `/pkg`.
pub const CLIENT_SCRIPT: &str = "/pkg/frontend.js";

/// Empty page: form, hidden error and loading indicators, empty list regions.
pub fn index_document() -> Document {
    let form = Element::new("form")
        .with_id(FORM)
        .attr("method", "post")
        .attr("action", "/")
        .attr("enctype", "multipart/form-data")
        .child(
            Element::new("label")
                .attr("for", NAME_INPUT)
                .child("Name:"),
        )
        .child(
            Element::new("input")
                .with_id(NAME_INPUT)
                .attr("type", "text")
                .attr("name", NAME_FIELD),
        )
        .child(
            Element::new("label")
                .attr("for", INTERESTS_INPUT)
                .child("Interests (comma-separated):"),
        )
        .child(
            Element::new("input")
                .with_id(INTERESTS_INPUT)
                .attr("type", "text")
                .attr("name", INTERESTS_FIELD),
        )
        .child(Element::new("button").attr("type", "submit").child("Submit"));

    let body = Element::new("body")
        .child(Element::new("h1").child(TITLE))
        .child(form)
        .child(Element::new("div").with_id(ERROR_MESSAGE).hidden())
        .child(Element::new("div").with_id(LOADING).hidden().child("Loading..."))
        .child(Element::new("h2").child("Users"))
        .child(Element::new("ul").with_id(USERS_LIST))
        .child(Element::new("h2").child("Recommendations"))
        .child(Element::new("div").with_id(RECOMMENDATIONS_SECTION));

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").child(TITLE))
        .child(
            Element::new("script")
                .attr("type", "module")
                .child(format!(r#"import init from "{CLIENT_SCRIPT}"; init();"#)),
        );

    Document::new(Element::new("html").child(head).child(body))
}

/// Full page for a server reply, error shown when present.
pub fn render_page(response: &SubmitResponse) -> String {
    render_document(index_document(), response)
}

/// Fills `document` from a reply. Regions missing from it are logged and skipped.
pub fn render_document(mut document: Document, response: &SubmitResponse) -> String {
    if let Some(message) = response.error() {
        if let Some(error) = document.get_element_by_id_mut(ERROR_MESSAGE) {
            error.set_text(message);
            error.set_display(Display::Block);
        }
    }

    if let Err(e) = render_lists(&mut document, response) {
        error!("Error: {e}");
    }

    document.to_html()
}

#[cfg(test)]
mod tests {
    use roster::models::User;

    use super::*;

    #[test]
    fn test_skeleton_has_every_id() {
        let document = index_document();

        for id in [
            FORM,
            NAME_INPUT,
            INTERESTS_INPUT,
            ERROR_MESSAGE,
            LOADING,
            USERS_LIST,
            RECOMMENDATIONS_SECTION,
        ] {
            assert!(document.contains(id), "missing {id}");
        }

        assert!(document.get_element_by_id(ERROR_MESSAGE).unwrap().is_hidden());
        assert!(document.get_element_by_id(LOADING).unwrap().is_hidden());
    }

    #[test]
    fn test_render_page_with_error() {
        let html = render_page(&SubmitResponse {
            error_message: Some("Error: The name 'A' is already registered!".to_string()),
            users: vec![User::new("A", "x")],
            recommendations: None,
        });

        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains(
            r#"<div id="error-message" style="display: block">Error: The name &#39;A&#39; is already registered!</div>"#
        ));
        assert!(html.contains(" A: x</li>"));
    }

    #[test]
    fn test_missing_region_still_renders_the_rest() {
        let document = Document::new(
            Element::new("body")
                .child(Element::new("div").with_id(ERROR_MESSAGE).hidden())
                .child(Element::new("ul").with_id(USERS_LIST)),
        );

        let html = render_document(
            document,
            &SubmitResponse {
                error_message: None,
                users: vec![User::new("A", "x")],
                recommendations: None,
            },
        );

        assert!(html.contains(" A: x</li>"));
        assert!(!html.contains(RECOMMENDATIONS_SECTION));
    }

    #[test]
    fn test_page_loads_client() {
        let html = index_document().to_html();

        assert!(html.contains(
            r#"<script type="module">import init from "/pkg/frontend.js"; init();</script>"#
        ));
    }

    #[test]
    fn test_render_page_without_error() {
        let html = render_page(&SubmitResponse::default());

        assert!(html.contains(r#"<div id="error-message" style="display: none"></div>"#));
        assert!(html.contains("<p>No users yet!</p>"));
    }
}
