//! Error types for backend requests.

/// Missing input caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter both an ID and a name")]
    MissingIdOrName,

    #[error("Please select a person to delete")]
    NoSelection,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The backend answered with a status other than `success`.
    #[error("{message}")]
    Remote {
        /// Status discriminator the backend sent
        status: String,
        /// Backend-supplied text, shown to the user verbatim
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response from backend (HTTP {status}): {detail}")]
    InvalidResponse {
        /// HTTP status code of the response
        status: u16,
        /// What was wrong with the body
        detail: String,
    },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Text to show the user for this failure.
    ///
    /// Backend-supplied messages are passed through unchanged; transport
    /// problems get a generic connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Validation(e) => e.to_string(),
            BackendError::Remote { message, .. } => message.clone(),
            BackendError::HttpError(_)
            | BackendError::InvalidResponse { .. }
            | BackendError::InvalidUrl(_) => format!("Connection error: {}", self),
        }
    }

    /// Whether the backend itself reported the failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, BackendError::Remote { .. })
    }

    /// Whether the failure was caught locally, before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, BackendError::Validation(_))
    }
}
