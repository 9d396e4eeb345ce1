//! Correction service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),

    #[error("API request failed: {status} {status_text}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No wire format registered for {0}")]
    UnknownFormat(String),
}

impl ServiceError {
    /// Build an API error from a non-success status.
    pub fn from_status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Display text plus the raw error body, if any.
    pub fn detailed(&self) -> String {
        match self {
            Self::Api {
                status,
                status_text,
                body,
            } if !body.trim().is_empty() => {
                format!("{} {}: {}", status, status_text, body.trim())
            }
            Self::Api {
                status, status_text, ..
            } => format!("{} {}", status, status_text),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
