use serde_json::{Map, Value};
use std::str::FromStr;

use crate::{FinderError, Result, numerics::Coordinate};

/// Number of results when the request does not mention `k`.
pub const DEFAULT_K: usize = 5;

/// Number of results when `k` is present but cannot be read as an integer.
///
/// This differs from [`DEFAULT_K`]. Both values are kept as observed in
/// production; they may well have been meant to agree.
pub const FALLBACK_K: usize = 3;

/// How many results a request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KSelection {
    /// `k` was absent.
    Absent,
    /// `k` coerced to an integer.
    Given(i64),
    /// `k` was present but not integer-coercible.
    Invalid,
}

impl KSelection {
    /// Reads the raw `k` field of a request body.
    ///
    /// Integers are taken as-is, finite floats are truncated toward zero,
    /// booleans count as 1 and 0, and strings are trimmed and parsed as a
    /// signed integer. Anything else, `null` included, is invalid.
    pub fn from_json(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return KSelection::Absent;
        };

        let coerced = match raw {
            Value::Number(number) => number.as_i64().or_else(|| {
                if number.is_u64() {
                    Some(i64::MAX)
                } else {
                    number
                        .as_f64()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                }
            }),
            Value::Bool(flag) => Some(i64::from(*flag)),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        };

        coerced.map_or(KSelection::Invalid, KSelection::Given)
    }

    /// Final result count. Negative requests are clamped to zero.
    pub fn resolve(self) -> usize {
        match self {
            KSelection::Absent => DEFAULT_K,
            KSelection::Invalid => FALLBACK_K,
            KSelection::Given(k) => usize::try_from(k.max(0)).unwrap_or(usize::MAX),
        }
    }
}

/// A validated nearest-location request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestRequest {
    pub origin: Coordinate,
    pub k: usize,
}

impl NearestRequest {
    pub fn new(origin: Coordinate, k: usize) -> Self {
        NearestRequest { origin, k }
    }

    /// Validates a request body of the form
    /// `{ "latitude": .., "longitude": .., "k": .. }`.
    pub fn from_json(body: &Value) -> Result<Self> {
        let fields = body.as_object().ok_or(FinderError::InvalidRequest {
            found: json_kind(body),
        })?;

        let latitude = coordinate_field(fields, "latitude")?;
        let longitude = coordinate_field(fields, "longitude")?;
        let k = KSelection::from_json(fields.get("k")).resolve();

        Ok(NearestRequest {
            origin: Coordinate::new(latitude, longitude),
            k,
        })
    }
}

impl FromStr for NearestRequest {
    type Err = FinderError;

    fn from_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| FinderError::InvalidRequest {
            found: if e.is_eof() { "truncated JSON" } else { "malformed JSON" },
        })?;
        Self::from_json(&value)
    }
}

fn coordinate_field(fields: &Map<String, Value>, field: &'static str) -> Result<f64> {
    let invalid = |reason: String| FinderError::InvalidCoordinate { field, reason };

    let value = match fields.get(field) {
        None => return Err(invalid("missing".to_string())),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| invalid(format!("{number} is not representable")))?,
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("{text:?} is not a number")))?,
        Some(other) => return Err(invalid(format!("expected a number, got {}", json_kind(other)))),
    };

    if !value.is_finite() {
        return Err(invalid(format!("{value} is not finite")));
    }
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
