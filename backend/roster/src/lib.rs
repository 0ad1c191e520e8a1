//! # Roster
//!
//! Shared pieces of the interest matching app.
//!
//! ## Contents
//!
//! - [`models`]: payloads exchanged between the page and the server
//! - [`store`]: CSV file holding every registered user
//! - [`recommend`]: Jaccard based peer ranking over the stored users
//! - [`config`]: environment lookups with logged defaults
//!
//! ## Payloads
//!
//! To backend
//! - `multipart/form-data` with `name` and `interests` fields
//! - `X-Requested-With: XMLHttpRequest` to ask for JSON instead of a page
//!
//! From backend
//! - JSON, `error_message` (null when fine), full user list, recommendations keyed by user
//! - Each recommendation is a `[peer, similarity]` pair
pub mod config;
pub mod models;
pub mod recommend;
pub mod store;

pub use models::{Recommendation, Recommendations, SubmitResponse, User};
pub use recommend::Recommender;
pub use store::{Store, StoreError};
