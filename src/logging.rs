//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, session::COOKIE_SESSION_ID};

/// The number of characters of a body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body read for logging, in bytes, matching axum's default body limit.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// The session cookie value is redacted since it is the only credential a
/// client has.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body_text(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::debug!("could not read request body: {error}");
            return Error::InvalidRequestBody(format!(
                "could not read request body, bodies must be at most {MAX_REQUEST_BODY_SIZE} bytes"
            ))
            .into_response();
        }
    };

    log_body(
        &format!(
            "Received request: {} {}\nheaders: {:#?}",
            parts.method,
            parts.uri,
            redact_headers(&parts.headers)
        ),
        &body_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body_text(body, usize::MAX).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            String::new()
        }
    };

    log_body(
        &format!(
            "Sending response: {}\nheaders: {:#?}",
            parts.status,
            redact_headers(&parts.headers)
        ),
        &body_text,
    );

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body, limit: usize) -> Result<String, axum::Error> {
    let body_bytes = to_bytes(body, limit).await?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_body(message: &str, body: &str) {
    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::info!("{message}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{message}\nbody: {body:?}");
    }
}

/// Copy `headers` with the session cookie value replaced in `Cookie` and
/// `Set-Cookie` headers.
fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();

    for name in [COOKIE, SET_COOKIE] {
        let values: Vec<HeaderValue> = redacted
            .get_all(&name)
            .iter()
            .map(|value| match value.to_str() {
                Ok(text) => HeaderValue::from_str(&redact_session_cookie(text))
                    .unwrap_or_else(|_| HeaderValue::from_static(REDACTED)),
                Err(_) => HeaderValue::from_static(REDACTED),
            })
            .collect();

        redacted.remove(&name);
        for value in values {
            redacted.append(&name, value);
        }
    }

    redacted
}

/// Replace the value of the session cookie in a `Cookie` or `Set-Cookie`
/// header value.
fn redact_session_cookie(header_value: &str) -> String {
    header_value
        .split(';')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name.trim() == COOKIE_SESSION_ID => format!("{name}={REDACTED}"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join(";")
}
