//! Value coercion strategies.
//!
//! A client value is resolved by walking the strategy list of its feature's
//! [`Encoding`](super::Encoding) in order. Each strategy yields a value or
//! defers to the next one; [`Coercion::Fallback`] always yields `0.0`.

use super::table::Encoding;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

const TRUTHY: [&str; 4] = ["on", "true", "yes", "1"];
const FALSY: [&str; 4] = ["off", "false", "no", "0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Numeric reading rescaled into [0, 1] by a linear range.
    Rescale,
    /// Exact match of the text form against a category label.
    Label,
    /// Numeric reading truncated to an integer, then matched as a label.
    TruncatedLabel,
    /// Numeric reading passed through unchanged.
    Numeric,
    /// Truthy/falsy token recognition.
    Token,
    /// Final default.
    Fallback,
}

impl Coercion {
    pub fn apply(self, encoding: &Encoding, raw: &RawValue<'_>) -> Option<f64> {
        match self {
            Coercion::Rescale => match *encoding {
                Encoding::LinearRange { min, max } => {
                    let span = max - min;
                    if span == 0.0 {
                        return None;
                    }
                    raw.number().map(|v| ((v - min) / span).clamp(0.0, 1.0))
                }
                _ => None,
            },
            Coercion::Label => encoding.lookup(raw.text()),
            Coercion::TruncatedLabel => raw
                .number()
                .and_then(|v| encoding.lookup(&(v.trunc() as i64).to_string())),
            Coercion::Numeric => raw.number(),
            Coercion::Token => raw.token().map(|t| if t { 1.0 } else { 0.0 }),
            Coercion::Fallback => Some(0.0),
        }
    }
}

/// Borrowed view of a client value: its text rendering and numeric reading.
#[derive(Debug, Clone)]
pub struct RawValue<'a> {
    text: Cow<'a, str>,
    number: Option<f64>,
}

impl<'a> RawValue<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            text: render(value),
            number: read_number(value),
        }
    }

    /// Text form used for label matching. Null renders as the empty string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Finite numeric reading, if the value has one.
    pub fn number(&self) -> Option<f64> {
        self.number
    }

    /// `Some(true)` for a truthy token, `Some(false)` for a falsy one.
    pub fn token(&self) -> Option<bool> {
        let lower = self.text.to_lowercase();
        if TRUTHY.contains(&lower.as_str()) {
            Some(true)
        } else if FALSY.contains(&lower.as_str()) {
            Some(false)
        } else {
            None
        }
    }
}

fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        other => Cow::Owned(other.to_string()),
    }
}

fn read_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    v.is_finite().then_some(v)
}
