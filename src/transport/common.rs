use serde::Deserialize;
use serde::de::Error as DeError;

use crate::domain::{Status, UnixTimestamp};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains invalid receipt: {value}")]
    InvalidReceipt { value: String },
}

/// Integer Pushover sends as a JSON number, numeric string, or boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportInt(i64);

impl TransportInt {
    pub fn into_status(self) -> Status {
        Status::from_code(self.0)
    }

    pub fn into_flag(self) -> bool {
        self.0 != 0
    }

    pub fn into_count(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    /// `0` means "not happened yet".
    pub fn into_timestamp(self) -> Option<UnixTimestamp> {
        match u64::try_from(self.0) {
            Ok(0) | Err(_) => None,
            Ok(secs) => Some(UnixTimestamp::new(secs)),
        }
    }
}

impl<'de> Deserialize<'de> for TransportInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Bool(bool),
            String(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(Self(value)),
            Raw::Bool(value) => Ok(Self(i64::from(value))),
            Raw::String(value) => value
                .trim()
                .parse::<i64>()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("expected integer, got {value:?}"))),
        }
    }
}

pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapped {
        value: TransportInt,
    }

    fn decode(json: &str) -> TransportInt {
        serde_json::from_str::<Wrapped>(json).unwrap().value
    }

    #[test]
    fn transport_int_accepts_numbers_strings_and_bools() {
        assert_eq!(decode(r#"{"value": 7}"#).0, 7);
        assert_eq!(decode(r#"{"value": " 42 "}"#).0, 42);
        assert_eq!(decode(r#"{"value": true}"#).0, 1);
        assert_eq!(decode(r#"{"value": -1}"#).0, -1);
        assert!(serde_json::from_str::<Wrapped>(r#"{"value": "x"}"#).is_err());
    }

    #[test]
    fn zero_timestamps_are_absent() {
        assert_eq!(decode(r#"{"value": 0}"#).into_timestamp(), None);
        assert_eq!(
            decode(r#"{"value": 1393653600}"#).into_timestamp(),
            Some(UnixTimestamp::new(1_393_653_600))
        );
        assert_eq!(decode(r#"{"value": -5}"#).into_count(), None);
    }

    #[test]
    fn non_blank_drops_empty_strings() {
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("u1".to_owned())), Some("u1".to_owned()));
        assert_eq!(non_blank(None), None);
    }
}
