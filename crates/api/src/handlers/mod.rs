pub mod ai_analysis;
pub mod auth;
pub mod effects;
pub mod health;
pub mod project;
pub mod track;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use studio_core::types::DbId;

/// Trim a present string; `Some("")` after trimming is treated as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Distinguish a present `null` (`Some(None)`) from an absent field (`None`).
/// Pair with `#[serde(default)]`.
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An optional id where `""` (or whitespace) counts as absent, as browser
/// forms and query strings send it.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}
