//! # Interests Form
//!
//! Client side of the interest matcher: everything that happens between the user
//! pressing submit and the lists on the page being redrawn.
//!
//! ## Flow
//!
//! 1. [`FormHandler::on_dom_ready`] checks the page has the form and wires the handler
//! 2. [`validate::validate`] trims and checks the two inputs, nothing is sent on failure
//! 3. [`Submit::submit`] posts the form once, loading indicator shown meanwhile
//! 4. [`render::render_lists`] rebuilds the user list and recommendations from the reply
//!
//! ## Errors
//!
//! - Validation errors are shown inline and no request is made
//! - A server reported `error_message` is shown verbatim, lists untouched
//! - Transport or HTTP status failures show one generic message, details only go to the log
//!
//! None of them are fatal, the form stays usable.
//!
//! Natively the handler drives [`Document`]. Built for `wasm32`, `browser` drives the
//! live page with the same handler.
#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod handler;
pub mod page;
pub mod render;
pub mod submit;
pub mod validate;

pub use dom::{Display, Document, Element};
pub use error::PageError;
pub use handler::{FormHandler, Outcome};
#[cfg(not(target_arch = "wasm32"))]
pub use submit::HttpSubmitter;
pub use submit::{Submit, SubmitError};
pub use validate::{ValidForm, ValidationError};
