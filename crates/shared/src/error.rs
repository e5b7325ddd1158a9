use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the roster service may attach to a failed response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The server-provided message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Prefer the server's message, falling back to `fallback` when the body had none.
    pub fn from_body(status: Option<u16>, body: Option<&ApiErrorBody>, fallback: &str) -> Self {
        let message = body
            .and_then(ApiErrorBody::message)
            .unwrap_or(fallback)
            .to_string();
        Self { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Name already taken"}"#).expect("body");
        let failure = ApiFailure::from_body(Some(409), Some(&body), "Error adding superhero.");
        assert_eq!(failure.to_string(), "Name already taken");
        assert_eq!(failure.status, Some(409));
    }

    #[test]
    fn blank_server_message_uses_fallback() {
        let body = ApiErrorBody {
            message: Some("   ".to_string()),
        };
        let failure = ApiFailure::from_body(Some(500), Some(&body), "Failed to fetch superheroes.");
        assert_eq!(failure.message, "Failed to fetch superheroes.");

        let failure = ApiFailure::from_body(None, None, "Error adding superhero.");
        assert_eq!(failure.message, "Error adding superhero.");
    }
}
