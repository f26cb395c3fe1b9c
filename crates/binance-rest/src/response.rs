//! Response validation and decoding
//!
//! The exchange embeds business-level errors as `{"code": <int>, "msg":
//! <string>}` objects, sometimes under a 200 status. Every response body
//! is inspected for that shape before typed decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RestError, RestResult};

/// Check a response body for an embedded exchange error
///
/// A top-level JSON object carrying an integer `code` field is a failure
/// regardless of HTTP status; the `msg` field is carried along (empty
/// string when absent). Any other body, including non-JSON, passes
/// through untouched for the caller's typed decoder.
pub fn check_for_error(body: &str) -> RestResult<()> {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        if let Some(code) = object.get("code").and_then(Value::as_i64) {
            let msg = object
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(RestError::Exchange { code, msg });
        }
    }
    Ok(())
}

/// Decode a validated response body into a typed value
pub fn decode<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    serde_json::from_str(body).map_err(|e| RestError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_shape_is_surfaced_with_code_and_msg() {
        let err = check_for_error(r#"{"code":-1013,"msg":"Filter failure: LOT_SIZE"}"#)
            .unwrap_err();
        match err {
            RestError::Exchange { code, msg } => {
                assert_eq!(code, -1013);
                assert_eq!(msg, "Filter failure: LOT_SIZE");
            }
            other => panic!("expected exchange error, got {other:?}"),
        }
    }

    #[test]
    fn missing_msg_becomes_empty_string() {
        let err = check_for_error(r#"{"code":-1000}"#).unwrap_err();
        assert!(matches!(err, RestError::Exchange { code: -1000, ref msg } if msg.is_empty()));
    }

    #[test]
    fn object_without_code_passes() {
        assert!(check_for_error(r#"{"serverTime":1499827319559}"#).is_ok());
    }

    #[test]
    fn arrays_and_non_json_pass() {
        assert!(check_for_error(r#"[{"symbol":"ETHBTC","price":"0.05"}]"#).is_ok());
        assert!(check_for_error("not json at all").is_ok());
    }

    #[test]
    fn non_integer_code_passes() {
        assert!(check_for_error(r#"{"code":"sym-1","msg":"x"}"#).is_ok());
    }

    #[test]
    fn decode_maps_shape_mismatch_to_parse_error() {
        let result: RestResult<u64> = decode("\"not-a-number\"");
        assert!(matches!(result, Err(RestError::Parse(_))));
    }
}
