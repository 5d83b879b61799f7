use thiserror::Error;

/// Errors returned by the Linear client
#[derive(Error, Debug)]
pub enum LinearError {
    /// The request never produced an HTTP response (refused, timed out, DNS)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered but the body could not be read as text
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    #[error("Response is missing `{0}`")]
    MissingData(String),
}

impl LinearError {
    /// True when the server was never reached
    pub fn is_transport(&self) -> bool {
        matches!(self, LinearError::Transport(_) | LinearError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, LinearError>;
