//! Content addressing for shared filters
//!
//! The filters service stores each payload under a prefix of the SHA-256 of its
//! canonical JSON: no whitespace, object keys sorted, whole numbers written as
//! integers and non-ASCII escaped as `\uXXXX`.
//! Producing the same bytes here lets a client compute a share id without a round
//! trip.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::WireError;

/// Length of the id the service hands out before any collision extension.
pub const SHARE_ID_LENGTH: usize = 16;

static HASH_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{16,64}$").ok());

/// A validated share id: a 16 to 64 character prefix of a lowercase SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashId(String);

impl HashId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the first `length` characters of a full hex digest.
    pub fn from_digest(digest: &str, length: usize) -> Result<Self, WireError> {
        let prefix = digest.get(..length).unwrap_or(digest);
        prefix.parse()
    }
}

impl FromStr for HashId {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = HASH_ID_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(s));
        if valid {
            Ok(HashId(s.to_string()))
        } else {
            Err(WireError::InvalidHashId(s.to_string()))
        }
    }
}

impl fmt::Display for HashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize `payload` in canonical form.
pub fn canonical_json<T: Serialize>(payload: &T) -> Result<String, WireError> {
    let value = normalize(serde_json::to_value(payload)?);
    let compact = serde_json::to_string(&value)?;
    Ok(escape_non_ascii(&compact))
}

/// Lowercase hex SHA-256 of the canonical form of `payload`.
pub fn content_hash<T: Serialize>(payload: &T) -> Result<String, WireError> {
    let canonical = canonical_json(payload)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

// Largest magnitude below which every f64 whole number is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Number(number) => match number.as_f64() {
            Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
                Value::from(f as i64)
            }
            _ => Value::Number(number),
        },
        other => other,
    }
}

// Non-ASCII can only occur inside string literals, so escaping char by char is safe.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
