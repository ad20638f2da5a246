//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) when the client sends none
//! - Decode the `/urlcounts` body into a URL list
//! - Classify bad bodies into `ValidationError` variants
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The body is decoded by hand rather than with `Json<T>` so that a
//!   missing `urls` item and unparseable JSON get distinct errors

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::matching::ValidationError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Body of `POST /urlcounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlcountsRequest {
    pub urls: Vec<String>,
}

impl UrlcountsRequest {
    /// Decode a raw request body.
    ///
    /// An empty `urls` list decodes fine; rejecting it is the matcher's job.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::MissingBody);
        }

        let mut value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

        let urls = match value.get_mut("urls").map(Value::take) {
            None | Some(Value::Null) => return Err(ValidationError::MissingUrls),
            Some(urls) => urls,
        };

        let urls = serde_json::from_value(urls).map_err(|e| ValidationError::InvalidUrls(e.to_string()))?;
        Ok(Self { urls })
    }
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of a request, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_url_list() {
        let request = UrlcountsRequest::from_body(br#"{"urls": ["http://a.com/", "http://b.com/"]}"#).unwrap();
        assert_eq!(request.urls, vec!["http://a.com/", "http://b.com/"]);
    }

    #[test]
    fn test_extra_items_are_ignored() {
        let request = UrlcountsRequest::from_body(br#"{"urls": [], "note": 1}"#).unwrap();
        assert!(request.urls.is_empty());
    }

    #[test]
    fn test_missing_body() {
        assert_eq!(UrlcountsRequest::from_body(b""), Err(ValidationError::MissingBody));
        assert_eq!(UrlcountsRequest::from_body(b" \n"), Err(ValidationError::MissingBody));
    }

    #[test]
    fn test_malformed_json() {
        let err = UrlcountsRequest::from_body(b"{\"urls\": [").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedJson(_)));
    }

    #[test]
    fn test_missing_or_null_urls() {
        assert_eq!(UrlcountsRequest::from_body(b"{}"), Err(ValidationError::MissingUrls));
        assert_eq!(UrlcountsRequest::from_body(br#"{"urls": null}"#), Err(ValidationError::MissingUrls));
        assert_eq!(UrlcountsRequest::from_body(b"null"), Err(ValidationError::MissingUrls));
        assert_eq!(UrlcountsRequest::from_body(b"[1, 2]"), Err(ValidationError::MissingUrls));
    }

    #[test]
    fn test_wrong_urls_type() {
        let err = UrlcountsRequest::from_body(br#"{"urls": "http://a.com/"}"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrls(_)));

        let err = UrlcountsRequest::from_body(br#"{"urls": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrls(_)));
    }

    #[test]
    fn test_request_id_generation() {
        let request = Request::builder().body(()).unwrap();
        let id = MakeRequestUuidV4.make_request_id(&request).unwrap();
        let id = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_request_id_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
