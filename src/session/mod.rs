//! Session identity: issuing, reading and enforcing the anonymous session
//! that scopes a client's transactions.

mod cookie;
mod id;
mod middleware;

pub use cookie::{
    COOKIE_SESSION_ID, DEFAULT_SESSION_COOKIE_DURATION, get_session_id_from_cookies,
    resolve_or_create_session, set_session_cookie,
};
pub use id::{MAX_SESSION_ID_LENGTH, SessionId};
pub use middleware::session_guard;
