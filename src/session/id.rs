//! Defines the session identifier that scopes every ledger operation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The longest session ID accepted from a client, in bytes.
pub const MAX_SESSION_ID_LENGTH: usize = 128;

/// An opaque identifier for an anonymous client session.
///
/// Session IDs are self-asserted: any string with a plausible shape is
/// accepted and no registry of issued IDs is kept. Possession of the ID is
/// the only thing that grants access to a session's transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a token presented by a client.
    ///
    /// Returns `None` if `token` is empty, longer than
    /// [MAX_SESSION_ID_LENGTH] bytes, or contains characters that are not
    /// allowed in a cookie value (whitespace, control characters, `"`, `,`,
    /// `;`, `\` and non-ASCII).
    pub fn parse(token: &str) -> Option<Self> {
        if token.is_empty() || token.len() > MAX_SESSION_ID_LENGTH {
            return None;
        }

        if !token.bytes().all(is_cookie_octet) {
            return None;
        }

        Some(Self(token.to_owned()))
    }

    /// Generate a new, globally unique session ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the session ID presented by the client if it is usable,
    /// otherwise generate a new one.
    ///
    /// The boolean is `true` when a new ID was generated, in which case the
    /// caller must hand the ID back to the client.
    /// A malformed token is treated the same as a missing one.
    pub fn resolve_or_create(existing_token: Option<&str>) -> (Self, bool) {
        match existing_token.and_then(Self::parse) {
            Some(session_id) => (session_id, false),
            None => (Self::generate(), true),
        }
    }

    /// The session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `byte` is a `cookie-octet` as defined in RFC 6265.
fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
