//! Defines functions for reading and issuing the session cookie.

use axum_extra::extract::{CookieJar, cookie::Cookie};
use time::Duration;

use crate::{Error, session::SessionId};

/// The name of the cookie holding the session ID.
pub const COOKIE_SESSION_ID: &str = "sessionId";

/// How long a newly issued session cookie is kept by the client.
pub const DEFAULT_SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// Get the session ID from the session cookie in `jar`.
///
/// # Errors
///
/// Returns [Error::Unauthorized] if the cookie is missing or its value is not
/// a plausible session ID.
pub fn get_session_id_from_cookies(jar: &CookieJar) -> Result<SessionId, Error> {
    jar.get(COOKIE_SESSION_ID)
        .and_then(|cookie| SessionId::parse(cookie.value_trimmed()))
        .ok_or(Error::Unauthorized)
}

/// Resolve the session for a request that may start a new session.
///
/// If `jar` holds a usable session cookie, its session ID is returned and the
/// jar is left untouched. Otherwise a new session ID is generated and a
/// session cookie that lasts for `duration` is added to the jar.
pub fn resolve_or_create_session(jar: CookieJar, duration: Duration) -> (CookieJar, SessionId) {
    let existing_token = jar
        .get(COOKIE_SESSION_ID)
        .map(|cookie| cookie.value_trimmed().to_owned());
    let (session_id, newly_created) = SessionId::resolve_or_create(existing_token.as_deref());

    if !newly_created {
        return (jar, session_id);
    }

    tracing::debug!("Issuing a new session cookie.");
    let jar = set_session_cookie(jar, &session_id, duration);

    (jar, session_id)
}

/// Add a session cookie for `session_id` to `jar` that is valid for the whole
/// site and expires after `duration`.
pub fn set_session_cookie(jar: CookieJar, session_id: &SessionId, duration: Duration) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION_ID, session_id.to_string()))
            .path("/")
            .max_age(duration)
            .http_only(true),
    )
}
