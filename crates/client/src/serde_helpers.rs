//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for numeric fields.
//! - Accept booleans, `"0"`/`"1"` and `"true"`/`"false"` for flag fields.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//!
//! Invariants / assumptions:
//! - Splunk may return numeric fields as `"123"` strings or as `123` numbers depending on endpoint/version.
//! - These helpers must not log or print secrets; errors are generic parse errors.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolOrScalar {
    Bool(bool),
    U64(u64),
    String(String),
}

pub fn usize_from_string_or_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match U64OrString::deserialize(deserializer)? {
        U64OrString::U64(v) => usize::try_from(v).map_err(D::Error::custom),
        U64OrString::I64(v) => usize::try_from(v).map_err(D::Error::custom),
        U64OrString::String(s) => s.trim().parse::<usize>().map_err(D::Error::custom),
    }
}

pub fn opt_usize_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<U64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(U64OrString::U64(v)) => Ok(Some(usize::try_from(v).map_err(D::Error::custom)?)),
        Some(U64OrString::I64(v)) => Ok(Some(usize::try_from(v).map_err(D::Error::custom)?)),
        Some(U64OrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(U64OrString::String(s)) => {
            Ok(Some(s.trim().parse::<usize>().map_err(D::Error::custom)?))
        }
    }
}

pub fn bool_from_string_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match BoolOrScalar::deserialize(deserializer)? {
        BoolOrScalar::Bool(b) => Ok(b),
        BoolOrScalar::U64(n) => Ok(n != 0),
        BoolOrScalar::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean flag: {other}"))),
        },
    }
}
