//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks and error-message extraction so the
//! per-entity modules stay focused on endpoints and payload mapping.

use serde_json::Value;

use crate::error::ClientError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Any other status becomes
/// [`ClientError::Api`] carrying the message extracted from the body.
/// 401 is handled by the caller before this point because it has side
/// effects on the client's token.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

/// Best human-readable message for a failed response body.
///
/// Priority: `message` → `error` (string, else its JSON) → a bare JSON
/// string body → `errors` / `validationErrors` (array entries' `message`,
/// `msg`, or the value itself, joined by `", "`; objects as `key: value`) →
/// a generic status line.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {status}");

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    if let Some(message) = value.get("message").and_then(non_empty_str) {
        return message.to_string();
    }

    if let Some(error) = value.get("error").filter(|error| !is_blank(error)) {
        return match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }

    if let Value::String(text) = &value {
        if !text.is_empty() {
            return text.clone();
        }
    }

    let errors = value
        .get("errors")
        .or_else(|| value.get("validationErrors"));
    match errors {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.get("message")
                    .or_else(|| item.get("msg"))
                    .and_then(Value::as_str)
                    .map_or_else(|| cell(item), ToString::to_string)
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Object(map)) if !map.is_empty() => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", cell(value)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => fallback(),
    }
}

/// Append `key=value` pairs for the present values.
#[must_use]
pub fn with_query(path: &str, params: &[(&str, Option<&str>)]) -> String {
    let query = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .filter(|value| !value.is_empty())
                .map(|value| format!("{key}={}", urlencoding::encode(value)))
        })
        .collect::<Vec<_>>();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.is_empty())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Content-Type", "application/json")
                .body(body)
                .unwrap(),
        )
    }

    #[rstest]
    #[case(r#"{"success":false,"message":"Línea no encontrada"}"#, "Línea no encontrada")]
    #[case(r#"{"error":"Token inválido"}"#, "Token inválido")]
    #[case(r#"{"error":{"code":11000}}"#, r#"{"code":11000}"#)]
    #[case(r#""plain failure""#, "plain failure")]
    #[case(
        r#"{"errors":[{"msg":"nombre es requerido","param":"nombre","location":"body"},{"message":"meta inválida"}]}"#,
        "nombre es requerido, meta inválida"
    )]
    #[case(r#"{"validationErrors":["a","b"]}"#, "a, b")]
    #[case(r#"{"errors":{"username":"ya existe"}}"#, "username: ya existe")]
    #[case(r#"{"success":false}"#, "HTTP error! status: 400")]
    #[case("<html>bad gateway</html>", "HTTP error! status: 400")]
    fn extracts_error_message(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(error_message(400, body), expected);
    }

    #[test]
    fn message_wins_over_errors() {
        let body = r#"{"message":"Datos inválidos","errors":[{"msg":"x"}]}"#;
        assert_eq!(error_message(422, body), "Datos inválidos");
    }

    #[tokio::test]
    async fn check_response_success_passes_through() {
        let resp = mock_response(200, r#"{"success":true}"#);
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_maps_status_and_message() {
        let resp = mock_response(404, r#"{"message":"POA no encontrado"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 404, ref message } if message == "POA no encontrado"
        ));
    }

    #[test]
    fn with_query_skips_absent_values() {
        assert_eq!(with_query("/indicadores", &[("objetivoId", None), ("lineaId", None)]), "/indicadores");
        assert_eq!(
            with_query("/indicadores", &[("objetivoId", Some("o1")), ("lineaId", Some(""))]),
            "/indicadores?objetivoId=o1"
        );
    }

    #[test]
    fn with_query_encodes_values() {
        assert_eq!(
            with_query("/carreras", &[("facultad", Some("Ciencias Médicas"))]),
            "/carreras?facultad=Ciencias%20M%C3%A9dicas"
        );
    }
}
