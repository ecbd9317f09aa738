//! Answer value decoding.
//!
//! The quiz service stores some answers as plain scalars and others as a
//! string holding serialized JSON, with no marker telling which is which.
//! The sniffing heuristic lives here and nowhere else.

use serde_json::Value;

/// Outcome of decoding one stored answer value.
#[derive(Debug)]
pub enum DecodedAnswer {
    /// The value was a JSON-encoded object or array and parsed cleanly.
    Parsed(Value),
    /// The value was not a candidate for decoding and is returned untouched.
    Verbatim(Value),
    /// The value looked like encoded JSON but did not parse; the original
    /// string is preserved.
    Fallback {
        raw: String,
        error: serde_json::Error,
    },
}

impl DecodedAnswer {
    /// The value to expose to callers. Fallbacks yield the original string.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            DecodedAnswer::Parsed(value) | DecodedAnswer::Verbatim(value) => value,
            DecodedAnswer::Fallback { raw, .. } => Value::String(raw),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, DecodedAnswer::Fallback { .. })
    }
}

/// Decode a stored answer value.
///
/// Only strings whose first character is `{` or `[` are parsed. Everything
/// else, including strings that hold a JSON scalar such as `"42"`, passes
/// through unchanged.
#[must_use]
pub fn decode_answer_value(raw: Value) -> DecodedAnswer {
    let Value::String(text) = raw else {
        return DecodedAnswer::Verbatim(raw);
    };

    if !looks_like_encoded_json(&text) {
        return DecodedAnswer::Verbatim(Value::String(text));
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => DecodedAnswer::Parsed(parsed),
        Err(error) => DecodedAnswer::Fallback { raw: text, error },
    }
}

fn looks_like_encoded_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}
