// Response envelope decoding - the one place `{error, message, data}` gets unwrapped
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Wrapper shape returned by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Turn a raw response into either the payload or a single error channel
///
/// Non-2xx statuses, `error: true` bodies and unparseable payloads all come
/// back as `Err`, so callers never destructure `data` from a failed request.
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<Value>>(body)
            .ok()
            .map(|env| env.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ApiError::Status { status, message });
    }

    // 204 and friends carry no body at all
    if body.trim().is_empty() {
        return serde_json::from_value(Value::Null).map_err(|_| ApiError::MissingData);
    }

    let envelope: Envelope<Value> = serde_json::from_str(body)?;

    if envelope.error {
        return Err(ApiError::Rejected(envelope.message));
    }

    match envelope.data {
        Some(Value::Null) | None => {
            // Mutations often answer with no data at all; that's fine when the
            // caller asked for `()` or an `Option`.
            serde_json::from_value(Value::Null).map_err(|_| ApiError::MissingData)
        }
        Some(data) => Ok(serde_json::from_value(data)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    #[test]
    fn test_success_unwraps_data() {
        let body = r#"{"error":false,"message":"fetched","data":{"ok":true}}"#;
        let ping: Ping = decode_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(ping, Ping { ok: true });
    }

    #[test]
    fn test_logical_error_in_2xx_is_rejected() {
        let body = r#"{"error":true,"message":"Vendor already verified","data":null}"#;
        let result = decode_envelope::<Ping>(StatusCode::OK, body);

        match result {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Vendor already verified"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_short_circuits() {
        let result = decode_envelope::<Ping>(StatusCode::UNAUTHORIZED, "whatever");
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn test_non_2xx_prefers_envelope_message() {
        let body = r#"{"error":true,"message":"Store not found","data":null}"#;
        match decode_envelope::<Ping>(StatusCode::NOT_FOUND, body) {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Store not found");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_non_2xx_falls_back_to_raw_body() {
        match decode_envelope::<Ping>(StatusCode::BAD_GATEWAY, "<html>upstream down</html>\n") {
            Err(ApiError::Status { message, .. }) => {
                assert_eq!(message, "<html>upstream down</html>")
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_ok_for_unit() {
        let body = r#"{"error":false,"message":"Notification queued"}"#;
        assert!(decode_envelope::<()>(StatusCode::OK, body).is_ok());

        let maybe: Option<Ping> = decode_envelope(StatusCode::CREATED, body).unwrap();
        assert!(maybe.is_none());
    }

    #[test]
    fn test_empty_success_body() {
        assert!(decode_envelope::<()>(StatusCode::NO_CONTENT, "").is_ok());
        assert!(decode_envelope::<()>(StatusCode::OK, "  \n").is_ok());

        let result = decode_envelope::<Ping>(StatusCode::NO_CONTENT, "");
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[test]
    fn test_missing_data_is_error_for_required_payload() {
        let body = r#"{"error":false,"message":"ok","data":null}"#;
        let result = decode_envelope::<Ping>(StatusCode::OK, body);
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let body = r#"{"error":false,"message":"ok","data":{"ok":"yes"}}"#;
        let result = decode_envelope::<Ping>(StatusCode::OK, body);
        assert!(matches!(result, Err(ApiError::Decode(_))));

        let result = decode_envelope::<Ping>(StatusCode::OK, "not json");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
