//! # Browser Binding
//!
//! Runs [`FormHandler`] against the live page when built for `wasm32` with
//! `wasm-pack build --target web`. The server serves the output under `/pkg`.
//!
//! - [`BrowserPage`] implements [`Page`] over `web_sys::Document`
//! - [`FetchSubmitter`] posts the form with `fetch` through `gloo_net`
//! - [`start`] waits for `DOMContentLoaded` and hooks the form's `submit` event
use std::rc::Rc;

use gloo_net::http::Request;
use http::StatusCode;
use roster::models::{REQUESTED_WITH, SubmitResponse, XML_HTTP_REQUEST};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, FormData, HtmlElement, HtmlInputElement, window};

use crate::{
    dom::{Display, Node, Page},
    handler::FormHandler,
    page::FORM,
    submit::{Submit, SubmitError, form_fields},
    validate::ValidForm,
};

/// The page posts back to the origin it was served from.
pub const BROWSER_ENDPOINT: &str = "/";

#[derive(Clone)]
pub struct BrowserPage {
    document: web_sys::Document,
}

impl BrowserPage {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.element(id)?.dyn_into::<HtmlInputElement>().ok()
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }
}

impl Page for BrowserPage {
    fn has(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn value(&self, id: &str) -> String {
        self.input(id).map(|input| input.value()).unwrap_or_default()
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        self.input(id).map(|input| input.set_value(value)).is_some()
    }

    fn set_display(&mut self, id: &str, display: Display) -> bool {
        let Some(element) = self.html_element(id) else {
            return false;
        };

        let style = element.style();
        match display.css_value() {
            Some(value) => style.set_property("display", value).is_ok(),
            None => style.remove_property("display").is_ok(),
        }
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.element(id)
            .map(|element| element.set_text_content(Some(text)))
            .is_some()
    }

    fn replace_children(&mut self, id: &str, children: Vec<Node>) -> bool {
        let html: String = children.iter().map(Node::to_html).collect();

        self.element(id)
            .map(|element| element.set_inner_html(&html))
            .is_some()
    }
}

pub struct FetchSubmitter {
    endpoint: String,
}

impl FetchSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Submit for FetchSubmitter {
    async fn submit(&self, form: &ValidForm) -> Result<SubmitResponse, SubmitError> {
        let body = FormData::new().map_err(browser_error)?;
        for (field, value) in form_fields(form) {
            body.append_with_str(field, value).map_err(browser_error)?;
        }

        let response = Request::post(&self.endpoint)
            .header(REQUESTED_WITH, XML_HTTP_REQUEST)
            .body(body)?
            .send()
            .await?;

        debug!("Status: {}", response.status());

        if !response.ok() {
            let status = StatusCode::from_u16(response.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Err(SubmitError::Status(status));
        }

        Ok(response.json::<SubmitResponse>().await?)
    }
}

fn browser_error(value: JsValue) -> SubmitError {
    SubmitError::Browser(format!("{value:?}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document to attach to"))?;

    if document.ready_state() != "loading" {
        return attach(BrowserPage::new(document));
    }

    let page = BrowserPage::new(document.clone());
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = attach(page.clone()) {
            error!("Error: {e:?}");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();

    Ok(())
}

fn attach(page: BrowserPage) -> Result<(), JsValue> {
    let Some(handler) = FormHandler::on_dom_ready(&page, FetchSubmitter::new(BROWSER_ENDPOINT))
    else {
        return Ok(());
    };
    let Some(form) = page.element(FORM) else {
        return Ok(());
    };

    let handler = Rc::new(handler);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let handler = Rc::clone(&handler);
        let mut page = page.clone();
        spawn_local(async move {
            let outcome = handler.on_submit(&mut page).await;
            debug!("Submission finished: {outcome:?}");
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}
