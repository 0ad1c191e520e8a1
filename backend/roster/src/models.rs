use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const NAME_FIELD: &str = "name";
pub const INTERESTS_FIELD: &str = "interests";

/// Header marking a programmatic submission that expects JSON back.
pub const REQUESTED_WITH: &str = "X-Requested-With";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub interests: String,
}

impl User {
    pub fn new(name: impl Into<String>, interests: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interests: interests.into(),
        }
    }
}

/// Peer name and similarity score, carried on the wire as `["name", 0.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation(pub String, pub f64);

impl Recommendation {
    pub fn peer(&self) -> &str {
        &self.0
    }

    pub fn similarity(&self) -> f64 {
        self.1
    }
}

/// User name to ranked peers, in the order they were produced.
pub type Recommendations = IndexMap<String, Vec<Recommendation>>;

/// Body returned to programmatic submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub recommendations: Option<Recommendations>,
}

impl SubmitResponse {
    /// Server-reported error, ignoring an empty string.
    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|message| !message.is_empty())
    }
}
