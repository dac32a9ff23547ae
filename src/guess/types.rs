use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of `POST /api/guess`, kept as raw JSON values.
///
/// Field types are only looked at by the relay, in validation order: a
/// missing or non-string `accessCode` is an auth failure, a missing or
/// non-string `image` is a missing image.
#[derive(Clone, Default)]
pub struct GuessRequest {
    pub image: Option<Value>,
    pub access_code: Option<Value>,
}

impl GuessRequest {
    pub fn new(image: impl Into<String>, access_code: impl Into<String>) -> Self {
        Self {
            image: Some(Value::String(image.into())),
            access_code: Some(Value::String(access_code.into())),
        }
    }

    pub fn access_code(&self) -> Option<&str> {
        self.access_code.as_ref().and_then(Value::as_str)
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_ref().and_then(Value::as_str)
    }

    pub fn image_len(&self) -> usize {
        self.image().map_or(0, str::len)
    }
}

/// Any JSON document is accepted; anything but an object carries no fields.
impl From<Value> for GuessRequest {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                image: fields.remove("image"),
                access_code: fields.remove("accessCode"),
            },
            _ => Self::default(),
        }
    }
}

// Images are large data URIs and the access code is a secret; neither
// belongs in a log line.
impl fmt::Debug for GuessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuessRequest")
            .field("image_len", &self.image_len())
            .field("has_access_code", &self.access_code.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub guess: String,
    pub confidence: u8,
}
