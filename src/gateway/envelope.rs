//! Unified API response envelope: `{code, message, data}`.

use serde_json::Value;

use crate::error::{FolioError, Result};

/// Envelope code meaning success.
pub const SUCCESS_CODE: i64 = 200;

/// Unwrap an API response body.
///
/// An object carrying a `code` field is treated as an envelope: code 200
/// yields `data` (or `null` when absent), any other code is a transport
/// failure carrying the envelope's `message`. Bodies without `code` pass
/// through unchanged.
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };
    let Some(code) = map.get("code") else {
        return Ok(Value::Object(map));
    };

    if code.as_i64() == Some(SUCCESS_CODE) {
        return Ok(map.remove("data").unwrap_or(Value::Null));
    }

    let message = map
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or("API request failed");
    Err(FolioError::Transport(format!(
        "API returned code {}: {}",
        code, message
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_unwraps_data() {
        let body = json!({"code": 200, "message": "ok", "data": {"name": "Bo"}});
        assert_eq!(unwrap_envelope(body).unwrap(), json!({"name": "Bo"}));
    }

    #[test]
    fn test_success_without_data_is_null() {
        let body = json!({"code": 200, "message": "ok"});
        assert_eq!(unwrap_envelope(body).unwrap(), Value::Null);
    }

    #[test]
    fn test_error_code_is_transport_failure() {
        let body = json!({"code": 500, "message": "database down", "data": null});
        let err = unwrap_envelope(body).unwrap_err();
        assert_eq!(
            err,
            FolioError::Transport("API returned code 500: database down".into())
        );
    }

    #[test]
    fn test_error_code_without_message() {
        let body = json!({"code": 404});
        let err = unwrap_envelope(body).unwrap_err();
        assert!(matches!(err, FolioError::Transport(ref m) if m.ends_with("API request failed")));
    }

    #[test]
    fn test_string_code_is_not_success() {
        let body = json!({"code": "200", "data": 1});
        assert!(unwrap_envelope(body).is_err());
    }

    #[test]
    fn test_non_envelope_passes_through() {
        assert_eq!(unwrap_envelope(json!([1, 2])).unwrap(), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({"message": "sent"})).unwrap(),
            json!({"message": "sent"})
        );
    }
}
