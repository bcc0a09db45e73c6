//! Lenient boolean handling for legacy configuration files
//!
//! Older configuration files encode some boolean fields as strings
//! (`tls-acme: "true"`). These helpers accept either form.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parse a boolean the way configuration tooling conventionally does.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and the matching false forms.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

struct LenientBoolVisitor;

impl<'de> Visitor<'de> for LenientBoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or a string containing a boolean")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_bool(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct OptionalLenientBoolVisitor;

impl<'de> Visitor<'de> for OptionalLenientBoolVisitor {
    type Value = Option<bool>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean or a string containing a boolean")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientBoolVisitor).map(Some)
    }
}

/// Deserialize a `bool` that may be written as a string.
pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientBoolVisitor)
}

/// Deserialize an `Option<bool>` that may be written as a string.
///
/// Use together with `#[serde(default)]` so a missing field stays `None`.
pub fn option_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalLenientBoolVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "option_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "bool")]
        watch: bool,
    }

    #[test]
    fn test_parse_bool_forms() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("F"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_string_booleans_are_coerced() {
        let probe: Probe = serde_json::from_str(r#"{"flag":"false","watch":"true"}"#).unwrap();
        assert_eq!(probe.flag, Some(false));
        assert!(probe.watch);
    }

    #[test]
    fn test_missing_and_null_stay_unset() {
        let probe: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(probe.flag, None);
        assert!(!probe.watch);

        let probe: Probe = serde_json::from_str(r#"{"flag":null}"#).unwrap();
        assert_eq!(probe.flag, None);
    }

    #[test]
    fn test_unparsable_string_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"flag":"maybe"}"#).is_err());
    }
}
