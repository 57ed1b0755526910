//! Graph API error mapping
//!
//! Classifies failed responses as throttling or request errors.

use crate::utils::error::FetchError;
use serde_json::Value;

/// Map a failed HTTP response (or batch sub-response) to a client error
pub fn map_http_error(status: u16, body: &str, throttle_codes: &[i64]) -> FetchError {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => map_error_payload(status, payload, throttle_codes),
        Err(_) => {
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, body)
            };
            if status == 429 {
                FetchError::throttled(None, message)
            } else {
                FetchError::request(Some(status), message)
            }
        }
    }
}

/// Map a parsed error payload of the form `{"error": {"message", "code", ...}}`
pub fn map_error_payload(status: u16, payload: Value, throttle_codes: &[i64]) -> FetchError {
    let error = payload.get("error");
    let code = error.and_then(|e| e.get("code")).and_then(Value::as_i64);
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));

    let throttled = status == 429 || code.is_some_and(|c| throttle_codes.contains(&c));
    if throttled {
        return FetchError::throttled(code, message);
    }

    FetchError::Request {
        status: Some(status),
        code,
        message,
        payload: Some(payload),
    }
}
