use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ACCESS_CODE is not set")]
    MissingAccessCodeSecret,

    #[error("SILICONFLOW_API_KEY is not set")]
    MissingApiKey,

    #[error("Access code missing or mismatched")]
    InvalidAccessCode,

    #[error("Request has no image")]
    MissingImage,

    #[error("Request body rejected: {0}")]
    InvalidBody(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Upstream call failed: {0}")]
    UpstreamCall(String),

    #[error("Upstream call timed out after {secs}s")]
    UpstreamTimeout { secs: u64 },

    #[error("Upstream reply has no text content")]
    EmptyReply,

    #[error("Upstream reply contains no JSON object: {reply}")]
    NoJsonInReply { reply: String },

    #[error("Upstream reply JSON is malformed: {0}")]
    MalformedJson(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamCall(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable diagnostic code, logged alongside every failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAccessCodeSecret => "config.access_code_unset",
            Self::MissingApiKey => "config.api_key_unset",
            Self::InvalidAccessCode => "auth.invalid_access_code",
            Self::MissingImage => "request.missing_image",
            Self::InvalidBody(_) => "request.invalid_body",
            Self::PayloadTooLarge { .. } => "request.too_large",
            Self::UpstreamCall(_) => "upstream.call_failed",
            Self::UpstreamTimeout { .. } => "upstream.timeout",
            Self::EmptyReply => "upstream.empty_reply",
            Self::NoJsonInReply { .. } => "upstream.no_json",
            Self::MalformedJson(_) => "upstream.malformed_json",
            Self::Config(_)
            | Self::Yaml(_)
            | Self::Io(_)
            | Self::AddrParse(_)
            | Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAccessCode => StatusCode::UNAUTHORIZED,
            Self::MissingImage | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The only text a caller ever sees; internal detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingAccessCodeSecret => "Server configuration error",
            Self::MissingApiKey => "API key not configured",
            Self::InvalidAccessCode => "Invalid access code",
            Self::MissingImage => "No image provided",
            Self::InvalidBody(_) => "Invalid request body",
            Self::PayloadTooLarge { .. } => "Image too large",
            Self::UpstreamCall(_) | Self::UpstreamTimeout { .. } => {
                "Failed to get prediction from AI"
            }
            Self::EmptyReply => "Invalid response from AI",
            Self::NoJsonInReply { .. } | Self::MalformedJson(_) => "Could not parse AI response",
            _ => "Internal server error",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.client_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
