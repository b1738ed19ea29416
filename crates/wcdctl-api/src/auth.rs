use std::fmt;

use secrecy::SecretString;

/// Header carrying the session token on every authenticated request.
pub const SESSION_HEADER: &str = "sessionID";

/// Opaque session token issued by the device at login.
///
/// `Debug` is redacted; use [`as_str`](Self::as_str) to put it on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Username/password pair used to (re-)establish a session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}
