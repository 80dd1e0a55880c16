//! Unverified peek at a JWT's expiry, for status display only.

use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::SessionError;

/// `exp` claim of a JWT. The signature is not checked.
///
/// # Errors
///
/// Returns `SessionError::InvalidToken` if the token is not a three-part
/// JWT, the payload is not base64url JSON, or `exp` is missing.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| SessionError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| SessionError::InvalidToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| SessionError::InvalidToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| SessionError::InvalidToken("invalid exp timestamp".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &str) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(value)
    }

    fn jwt(payload: &str) -> String {
        format!("{}.{}.{}", encode(r#"{"alg":"HS256"}"#), encode(payload), encode("sig"))
    }

    #[test]
    fn reads_exp_claim() {
        let exp = Utc::now().timestamp() + 3600;
        let token = jwt(&format!(r#"{{"id":"u1","exp":{exp}}}"#));
        assert_eq!(decode_expiry(&token).unwrap().timestamp(), exp);
    }

    #[test]
    fn opaque_token_is_rejected() {
        let err = decode_expiry("abc").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn missing_exp_is_reported() {
        let err = decode_expiry(&jwt(r#"{"id":"u1"}"#)).unwrap_err();
        assert!(err.to_string().contains("missing exp claim"));
    }

    #[test]
    fn bad_base64_is_reported() {
        let err = decode_expiry("a.!!!.c").unwrap_err();
        assert!(err.to_string().contains("base64 decode failed"));
    }
}
