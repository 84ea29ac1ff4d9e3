use serde::Deserialize;

use super::common::{TransportError, TransportInt};
use crate::domain::LimitsResponse;

#[derive(Debug, Clone, Deserialize)]
struct LimitsJsonResponse {
    status: TransportInt,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    limit: Option<TransportInt>,
    #[serde(default)]
    remaining: Option<TransportInt>,
    #[serde(default)]
    reset: Option<TransportInt>,
}

pub fn decode_limits_json_response(json: &str) -> Result<LimitsResponse, TransportError> {
    let parsed: LimitsJsonResponse = serde_json::from_str(json)?;
    Ok(LimitsResponse {
        status: parsed.status.into_status(),
        request: parsed.request,
        errors: parsed.errors,
        limit: parsed.limit.and_then(TransportInt::into_count),
        remaining: parsed.remaining.and_then(TransportInt::into_count),
        reset: parsed.reset.and_then(TransportInt::into_timestamp),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{Status, UnixTimestamp};

    use super::*;

    #[test]
    fn decode_limits_payload() {
        let json = r#"
        {
          "limit": 10000,
          "remaining": "7496",
          "reset": 1393653600,
          "status": 1,
          "request": "000000000000000000000000000000000000"
        }
        "#;

        let parsed = decode_limits_json_response(json).unwrap();
        assert_eq!(parsed.status, Status::Success);
        assert_eq!(parsed.limit, Some(10_000));
        assert_eq!(parsed.remaining, Some(7_496));
        assert_eq!(parsed.reset, Some(UnixTimestamp::new(1_393_653_600)));
    }

    #[test]
    fn decode_limits_error_has_no_counts() {
        let json = r#"
        {
          "token": "invalid",
          "errors": ["application token is invalid"],
          "status": 0
        }
        "#;

        let parsed = decode_limits_json_response(json).unwrap();
        assert_eq!(parsed.status, Status::Failure);
        assert_eq!(parsed.limit, None);
        assert_eq!(parsed.remaining, None);
        assert_eq!(parsed.reset, None);
        assert_eq!(parsed.request, None);
    }
}
