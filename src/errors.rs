use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpEaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Server reported failure: {}", message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    #[error("Experience not found: {0}")]
    NotFound(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl serde::Serialize for ExpEaseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

pub type ExpEaseResult<T> = Result<T, ExpEaseError>;

/// Coarse classification of a failed fetch. All kinds end up in the same
/// error view state; the kind only shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    NetworkFailure,
    MalformedResponse,
    ApplicationError,
}

impl ExpEaseError {
    pub fn fetch_kind(&self) -> FetchErrorKind {
        match self {
            ExpEaseError::Json(_) | ExpEaseError::MalformedResponse(_) => {
                FetchErrorKind::MalformedResponse
            }
            ExpEaseError::Http(e) if e.is_decode() => FetchErrorKind::MalformedResponse,
            ExpEaseError::Application { .. } | ExpEaseError::NotFound(_) => {
                FetchErrorKind::ApplicationError
            }
            _ => FetchErrorKind::NetworkFailure,
        }
    }

    /// Message that may be shown to the user, if the server supplied one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ExpEaseError::Application { message } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_fetch_errors() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ExpEaseError::from(bad_json).fetch_kind(),
            FetchErrorKind::MalformedResponse
        );
        assert_eq!(
            ExpEaseError::Status { status: 502, body: String::new() }.fetch_kind(),
            FetchErrorKind::NetworkFailure
        );
        assert_eq!(
            ExpEaseError::Application { message: None }.fetch_kind(),
            FetchErrorKind::ApplicationError
        );
    }

    #[test]
    fn application_error_exposes_server_message() {
        let err = ExpEaseError::Application { message: Some("db down".into()) };
        assert_eq!(err.user_message(), Some("db down"));
        assert_eq!(err.to_string(), "Server reported failure: db down");
        assert_eq!(serde_json::to_string(&err).unwrap(), "\"Server reported failure: db down\"");
    }
}
