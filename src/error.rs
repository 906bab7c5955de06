//! Error types for cascade-merge

use serde::Serialize;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the crate
#[derive(Debug, Error)]
pub enum Error {
    /// A repository API call was rejected or could not be completed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// GitHub client setup or response handling failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable token could be found
    #[error("authentication error: {0}")]
    Auth(String),

    /// I/O error (event payload, `gh` invocation)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON (event payload)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A structured failure from the repository-hosting API
///
/// Mirrors the shape of GitHub's error responses: a top-level message plus a
/// list of detail objects, each usually carrying its own `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// HTTP status code, if the request reached the server
    #[serde(skip)]
    pub status: Option<u16>,
    /// Top-level error message
    pub message: String,
    /// Detail errors as returned by the API
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,
    /// Link to the API documentation for this error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl ApiError {
    /// Create an error with a status code and message and no details
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
            documentation_url: None,
        }
    }

    /// Add a detail error carrying `message`
    #[must_use]
    pub fn with_detail(mut self, message: impl Into<String>) -> Self {
        self.errors
            .push(serde_json::json!({ "message": message.into() }));
        self
    }

    /// Messages of the detail errors, in order
    ///
    /// Details that are plain strings are returned as-is; objects contribute
    /// their `message` field. Anything else is ignored.
    pub fn detail_messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().filter_map(|e| match e {
            serde_json::Value::String(s) => Some(s.as_str()),
            other => other.get("message").and_then(serde_json::Value::as_str),
        })
    }

    /// The raw error body rendered as JSON, for embedding in issues and comments
    pub fn detail(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "API error (HTTP {code}): {}", self.message)?,
            None => write!(f, "API error: {}", self.message)?,
        }
        let details: Vec<&str> = self.detail_messages().collect();
        if !details.is_empty() {
            write!(f, " ({})", details.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::Api(ApiError {
                status: Some(source.status_code.as_u16()),
                message: source.message.clone(),
                errors: source.errors.clone().unwrap_or_default(),
                documentation_url: source.documentation_url.clone(),
            }),
            other => Self::Api(ApiError::new(None, other.to_string())),
        }
    }
}

impl Error {
    /// The structured API error, if this is one
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Raw error detail for issue and comment bodies
    pub fn detail(&self) -> String {
        match self {
            Self::Api(e) => e.detail(),
            other => serde_json::json!({ "message": other.to_string() }).to_string(),
        }
    }
}
