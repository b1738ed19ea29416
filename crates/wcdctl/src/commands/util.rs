//! Shared helpers for command handlers.

use std::str::FromStr;

use chrono::NaiveDateTime;

use wcdctl_api::Settings;

use crate::error::CliError;

/// A `field=value` assignment from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected field=value, got '{s}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing field name in '{s}'"));
        }
        Ok(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// Collect assignments into an ordered settings row.
pub fn to_settings(values: &[KeyValue]) -> Settings {
    values
        .iter()
        .map(|kv| (kv.key.as_str(), kv.value.as_str()))
        .collect()
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a local date and time for `--at`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM:SS, got '{s}'"))
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn key_value_splits_on_first_equals() {
        let kv: KeyValue = "description=a=b".parse().unwrap();
        assert_eq!(kv.key, "description");
        assert_eq!(kv.value, "a=b");
    }

    #[test]
    fn key_value_allows_empty_value() {
        let kv: KeyValue = "generalTaggedVLANs=".parse().unwrap();
        assert_eq!(kv.value, "");
    }

    #[test]
    fn key_value_rejects_missing_parts() {
        assert!("agingInterval".parse::<KeyValue>().is_err());
        assert!("=300".parse::<KeyValue>().is_err());
    }

    #[test]
    fn settings_keep_argument_order() {
        let values: Vec<KeyValue> = ["b=2", "a=1"].iter().map(|s| s.parse().unwrap()).collect();
        let settings = to_settings(&values);
        let pairs: Vec<_> = settings.iter().collect();
        assert_eq!(pairs, [("b", "2"), ("a", "1")]);
    }

    #[test]
    fn datetime_formats() {
        let at = parse_datetime("2024-03-09 07:05:01").unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2024, 3, 9));
        assert_eq!((at.hour(), at.minute(), at.second()), (7, 5, 1));

        let at = parse_datetime("2024-03-09T07:05:01").unwrap();
        assert_eq!(at.second(), 1);

        let at = parse_datetime("2024-03-09 07:05").unwrap();
        assert_eq!(at.second(), 0);

        assert!(parse_datetime("yesterday").is_err());
    }
}
