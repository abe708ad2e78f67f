//! Session middleware that rejects requests without a session cookie.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::session::cookie::get_session_id_from_cookies;

/// Middleware function that checks for a session cookie.
///
/// The session ID is placed into the request and the request executed normally
/// if the cookie holds a plausible session ID, otherwise a 401 Unauthorized
/// response is returned without running the route handler.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session_id): Extension<SessionId>` to receive the session ID.
pub async fn session_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    match get_session_id_from_cookies(&jar) {
        Ok(session_id) => {
            request.extensions_mut().insert(session_id);
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(
                "Rejecting request to {} without a valid session cookie.",
                request.uri().path()
            );
            error.into_response()
        }
    }
}
