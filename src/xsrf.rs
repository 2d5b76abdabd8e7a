//! XSRF (Cross-Site Request Forgery) protection for the dashboard's edit endpoints.
//!
//! Every state-changing request (POST, PUT, DELETE, PATCH) must carry the
//! per-process token either in the `X-XSRF-Token` header (HTMX requests) or
//! as the `_xsrf_token` field of a url-encoded form body.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

/// The header name for XSRF tokens in AJAX/HTMX requests.
pub const XSRF_HEADER: &str = "X-XSRF-Token";

/// The form field name for XSRF tokens in form submissions.
pub const XSRF_FORM_FIELD: &str = "_xsrf_token";

/// Upper bound on form bodies read while looking for the token.
const MAX_FORM_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct XsrfToken(Arc<String>);

impl XsrfToken {
    pub fn generate() -> Self {
        Self(Arc::new(Uuid::new_v4().to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    fn matches(&self, candidate: &str) -> bool {
        candidate == self.value()
    }
}

pub async fn xsrf_middleware(
    xsrf_token: XsrfToken,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::DELETE | Method::PATCH
    ) {
        return next.run(request).await;
    }

    if let Some(token) = header_token(request.headers()) {
        if xsrf_token.matches(&token) {
            return next.run(request).await;
        }
        tracing::warn!(path = %request.uri().path(), "XSRF header token mismatch");
        return xsrf_error_response();
    }

    if !is_url_encoded_form(request.headers()) {
        return xsrf_error_response();
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
        Ok(b) => b,
        Err(_) => return xsrf_error_response(),
    };

    let fields: Vec<(String, String)> = match serde_urlencoded::from_bytes(&bytes) {
        Ok(fields) => fields,
        Err(_) => return xsrf_error_response(),
    };

    let valid = fields
        .iter()
        .any(|(key, value)| key == XSRF_FORM_FIELD && xsrf_token.matches(value));

    if valid {
        next.run(Request::from_parts(parts, Body::from(bytes))).await
    } else {
        tracing::warn!(path = %parts.uri.path(), "Missing or invalid XSRF form token");
        xsrf_error_response()
    }
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(XSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn is_url_encoded_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn xsrf_error_response() -> Response {
    (StatusCode::FORBIDDEN, "Invalid or missing XSRF token").into_response()
}
