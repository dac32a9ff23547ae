//! Turns the model's free-text answer into a [`GuessResult`].
//!
//! The model is told to answer with bare JSON but often wraps it in prose,
//! so the reply is scanned for an embedded object first.

use super::types::GuessResult;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Returned as the guess when the model gives none.
pub const UNKNOWN_GUESS: &str = "未知";

pub const MIN_CONFIDENCE: u8 = 0;
pub const MAX_CONFIDENCE: u8 = 100;

/// Greedy span from the first `{` to the last `}` in `text`.
///
/// Returns `None` when there is no `{`, or no `}` after it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_reply(text: &str) -> Result<GuessResult> {
    let span = extract_json_object(text).ok_or_else(|| Error::NoJsonInReply {
        reply: text.to_string(),
    })?;

    let fields: Map<String, Value> =
        serde_json::from_str(span).map_err(|e| Error::MalformedJson(e.to_string()))?;

    Ok(GuessResult::from_fields(&fields))
}

impl GuessResult {
    /// Normalizes whatever the model put under `guess` and `confidence`.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            guess: normalize_guess(fields.get("guess")),
            confidence: normalize_confidence(fields.get("confidence")),
        }
    }
}

fn normalize_guess(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => UNKNOWN_GUESS.to_string(),
    }
}

fn normalize_confidence(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if !raw.is_finite() {
        return MIN_CONFIDENCE;
    }

    raw.clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE))
        .round() as u8
}
