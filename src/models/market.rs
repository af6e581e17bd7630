//! Market descriptor models.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A trading market (pair/context) used to filter visible trades.
///
/// Equality is the filter predicate: a trade is visible when its recorded
/// market descriptor matches the selected market on both `id` and `name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Numeric market id. Upstream payloads sometimes carry this as a
    /// decimal string, so it is integer-parsed during deserialization.
    #[serde(deserialize_with = "int_from_str_or_int")]
    pub id: i64,
    pub name: String,
}

/// Accepts a JSON integer or a numeric string for market ids.
pub(crate) fn int_from_str_or_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid market id {s:?}"))),
    }
}
