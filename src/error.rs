use reqwest::StatusCode;

pub const MSG_CONNECTION: &str =
    "Could not connect to the server. Check your internet connection.";
pub const MSG_SERVER: &str = "Internal server error. Please try again later.";
pub const MSG_NOT_FOUND: &str = "Resource not found.";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized. Please sign in.";
pub const MSG_UNKNOWN: &str = "Unknown error communicating with the server";

#[derive(Debug, thiserror::Error)]
pub enum CardHavenError {
    #[error("{}", MSG_CONNECTION)]
    Connection(#[source] reqwest::Error),

    #[error("{}", MSG_SERVER)]
    Server(u16),

    #[error("{}", MSG_NOT_FOUND)]
    NotFound(String),

    #[error("{}", MSG_UNAUTHORIZED)]
    Unauthorized(u16),

    #[error("Code {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Empty response from server: {0}")]
    EmptyResponse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The background poll loop is no longer running.
    #[error("Product poller has stopped")]
    Stopped,

    #[error("{}", MSG_UNKNOWN)]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CardHavenError {
    /// Map a non-success HTTP status to its user-facing category.
    ///
    /// `body` is the raw response body; when it is a JSON object with a
    /// `message` field that text is used for uncategorized statuses,
    /// otherwise the canonical reason phrase is.
    pub fn from_status(status: StatusCode, resource: &str, body: &str) -> Self {
        let code = status.as_u16();
        match code {
            401 | 403 => CardHavenError::Unauthorized(code),
            404 => CardHavenError::NotFound(resource.to_string()),
            c if c >= 500 => CardHavenError::Server(c),
            _ => {
                let message = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
                CardHavenError::Status {
                    status: code,
                    message,
                }
            }
        }
    }

    /// Classify a transport-level failure. Requests that never got a response
    /// are connectivity failures; everything else is the generic fallback.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            CardHavenError::Connection(err)
        } else if err.is_decode() {
            CardHavenError::Http(err)
        } else if let Some(status) = err.status() {
            CardHavenError::from_status(status, err.url().map(|u| u.path()).unwrap_or(""), "")
        } else {
            CardHavenError::Http(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CardHavenError::NotFound(_))
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, CardHavenError>;
