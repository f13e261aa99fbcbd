use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Failed to generate music";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl GenerationError {
    /// Message shown to the user. Prefers the detail sent by the service,
    /// then the transport message, then a generic text.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Api { status, .. } => format!("Request failed with status code {status}"),
            Self::Transport(message) | Self::Decode(message) | Self::Client(message) => {
                message.clone()
            }
        };

        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else if err.is_timeout() {
            Self::Transport(format!("Request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    #[error("{key} must be a number of milliseconds, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Response has no {0} field")]
    MissingField(&'static str),

    #[error("Invalid base64 in {field}: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
