//! Raw API responses and status classification.
//!
//! Every operation reads the whole response into an [`ApiResponse`] and then
//! classifies it with one of the helpers below. Each helper encodes one of
//! the acceptance rules the Aeris services use; anything outside the rule
//! becomes [`AerisError::Api`] carrying the response.

use std::collections::BTreeMap;

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::{AerisError, Result};

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

/// A vendor payload that reports success through an in-body `resultCode`.
pub trait ResultEnvelope {
    /// The vendor result code, if the body carried one.
    fn result_code(&self) -> Option<i64>;
}

impl ResultEnvelope for serde_json::Value {
    fn result_code(&self) -> Option<i64> {
        self.get("resultCode").and_then(serde_json::Value::as_i64)
    }
}

impl ApiResponse {
    /// Build a response from its parts. Header names are matched
    /// case-insensitively.
    pub fn new(status: u16, headers: BTreeMap<String, String>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Drain a reqwest response.
    pub(crate) async fn read(response: Response) -> Result<Self> {
        let status = response.status().as_u16();

        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            match headers.get_mut(name.as_str()) {
                Some(existing) => {
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
                None => {
                    headers.insert(name.as_str().to_string(), value);
                }
            }
        }

        let body = response.text().await.map_err(AerisError::HttpError)?;

        tracing::debug!(status, "Response code: {status}");

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// All response headers, keyed by lower-case name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up one header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw body text, possibly empty.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The body pretty-printed when it is JSON, verbatim otherwise.
    pub fn pretty_body(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| self.body.clone())
    }

    /// Turn this response into the API failure error.
    pub(crate) fn into_error(self, message: impl Into<String>) -> AerisError {
        let message = message.into();
        tracing::warn!(
            status = self.status,
            body = %self.body,
            "{message}"
        );
        AerisError::Api {
            message,
            response: self,
        }
    }

    fn unexpected_status(self) -> AerisError {
        let message = format!("HTTP status code was {}", self.status);
        self.into_error(message)
    }

    /// Accept exactly one status code.
    pub(crate) fn expect_status(self, expected: u16) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.unexpected_status())
        }
    }

    /// Accept one status code and parse the body.
    pub(crate) fn expect_json<T: DeserializeOwned>(self, expected: u16) -> Result<T> {
        let response = self.expect_status(expected)?;
        tracing::debug!("Response body:\n{}", response.pretty_body());
        response.json()
    }

    /// Accept one status code, or treat `absent` as "no such resource".
    pub(crate) fn json_or_absent<T: DeserializeOwned>(
        self,
        expected: u16,
        absent: u16,
    ) -> Result<Option<T>> {
        if self.status == absent {
            tracing::debug!(status = absent, "resource not found");
            return Ok(None);
        }
        self.expect_json(expected).map(Some)
    }

    /// Delete semantics: 204 deleted, 404 already absent.
    pub(crate) fn deletion(self) -> Result<bool> {
        match self.status {
            204 => Ok(true),
            404 => Ok(false),
            _ => Err(self.unexpected_status()),
        }
    }

    /// AerAdmin semantics: HTTP 200 and an in-body `resultCode` of 0.
    ///
    /// The code is read from the raw JSON before the typed payload is
    /// built, so a business failure is reported as such even when the rest
    /// of its body does not fit `T`.
    pub(crate) fn expect_result_code<T: DeserializeOwned>(self) -> Result<T> {
        if self.status != 200 {
            return Err(self.into_error("HTTP status code was not 200"));
        }

        tracing::debug!("Response body:\n{}", self.pretty_body());
        let value: serde_json::Value = match serde_json::from_str(&self.body) {
            Ok(value) => value,
            Err(e) => return Err(self.into_error(format!("Response body is not JSON: {e}"))),
        };
        match value.result_code() {
            Some(0) => {}
            Some(code) => {
                return Err(self.into_error(format!("Bad (or missing) resultCode: {code}")))
            }
            None => return Err(self.into_error("Bad (or missing) resultCode: None")),
        }

        serde_json::from_value(value)
            .map_err(|e| self.into_error(format!("Unexpected response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> ApiResponse {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ApiResponse::new(status, headers, body)
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let r = response(200, "");
        assert_eq!(r.header("content-type"), Some("application/json"));
        assert_eq!(r.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(r.header("x-missing"), None);
    }

    #[test]
    fn test_deletion_codes() {
        assert!(response(204, "").deletion().unwrap());
        assert!(!response(404, "{}").deletion().unwrap());

        let err = response(401, "").deletion().unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), "Aeris API error: HTTP status code was 401");
    }

    #[test]
    fn test_json_or_absent() {
        let found: Option<serde_json::Value> =
            response(200, r#"{"a":1}"#).json_or_absent(200, 404).unwrap();
        assert_eq!(found, Some(json!({"a": 1})));

        let missing: Option<serde_json::Value> =
            response(404, r#"{"link":[]}"#).json_or_absent(200, 404).unwrap();
        assert!(missing.is_none());

        let err = response(500, "boom")
            .json_or_absent::<serde_json::Value>(200, 404)
            .unwrap_err();
        assert_eq!(err.response().unwrap().body(), "boom");
    }

    #[test]
    fn test_expect_json_rejects_other_success_codes() {
        // Channels are created with 200; a 201 is still a failure there.
        let err = response(201, "{}")
            .expect_json::<serde_json::Value>(200)
            .unwrap_err();
        assert_eq!(err.status_code(), Some(201));
    }

    #[test]
    fn test_result_code_zero_returns_body_unchanged() {
        let body = json!({"resultCode": 0, "resultMessage": "OK", "extra": [1, 2]});
        let value: serde_json::Value = response(200, &body.to_string())
            .expect_result_code()
            .unwrap();
        assert_eq!(value, body);
    }

    #[test]
    fn test_result_code_nonzero_at_200_is_an_error() {
        let body = json!({"resultCode": 1047, "resultMessage": "Device not Activated."}).to_string();
        let err = response(200, &body)
            .expect_result_code::<serde_json::Value>()
            .unwrap_err();

        assert!(err.to_string().contains("1047"));
        let attached = err.response().unwrap();
        assert_eq!(attached.status(), 200);
        assert_eq!(attached.body(), body);
    }

    #[test]
    fn test_result_code_checked_before_typed_parse() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Typed {
            #[serde(default)]
            items: Vec<i64>,
        }

        let body = json!({"resultCode": 1047, "items": null}).to_string();
        let err = response(200, &body)
            .expect_result_code::<Typed>()
            .unwrap_err();
        assert!(err.to_string().contains("1047"));
        assert_eq!(err.response().unwrap().body(), body);

        // Success code, but a body that does not fit: still an API error.
        let body = json!({"resultCode": 0, "items": "nope"}).to_string();
        let err = response(200, &body)
            .expect_result_code::<Typed>()
            .unwrap_err();
        assert!(matches!(err, AerisError::Api { .. }));
        assert_eq!(err.status_code(), Some(200));
    }

    #[test]
    fn test_missing_result_code_is_an_error() {
        let err = response(200, r#"{"resultMessage":"OK"}"#)
            .expect_result_code::<serde_json::Value>()
            .unwrap_err();
        assert!(err.to_string().contains("resultCode"));
    }

    #[test]
    fn test_result_code_non_200() {
        let err = response(401, r#"{"code":401}"#)
            .expect_result_code::<serde_json::Value>()
            .unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("not 200"));
    }

    #[test]
    fn test_pretty_body_passes_plain_text_through() {
        assert_eq!(response(401, "nope").pretty_body(), "nope");
        assert!(response(200, r#"{"a":1}"#).pretty_body().contains("\"a\": 1"));
    }
}
