//! Credential values for the build server and its credential store.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::SetupError;

use super::job::is_url_safe_name;

/// A build-server password.
///
/// The wrapper keeps the raw value out of `Debug` output and deliberately
/// does not implement `PartialEq`, so the password cannot leak through
/// assertion or log formatting.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Wraps a raw password value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the raw password for request construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Password(<redacted>)")
    }
}

/// Username and password pair for HTTP Basic authentication.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: Password,
}

impl Credentials {
    /// Creates a credential pair, rejecting blank usernames and passwords.
    ///
    /// Both values are stored exactly as supplied. Passwords are opaque:
    /// leading or trailing whitespace is significant and must survive into
    /// the encoded header, so trimming happens only for the emptiness check.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingJenkinsCredentials`] when either value is
    /// empty or consists solely of whitespace.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Result<Self, SetupError> {
        let raw_username = username.as_ref();
        let raw_password = password.as_ref();
        if raw_username.trim().is_empty() || raw_password.trim().is_empty() {
            return Err(SetupError::MissingJenkinsCredentials);
        }
        Ok(Self {
            username: raw_username.to_owned(),
            password: Password::new(raw_password),
        })
    }

    /// Borrows the username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Formats the pair as an HTTP Basic `Authorization` header value.
    ///
    /// The encoding uses the URL-safe base64 alphabet without padding,
    /// matching what the original server deployment accepted.
    #[must_use]
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password.expose());
        format!("Basic {}", URL_SAFE_NO_PAD.encode(pair.as_bytes()))
    }
}

/// A named grouping of stored credentials on the build server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDomain(String);

impl CredentialDomain {
    /// Validates a credential domain name.
    ///
    /// Domain names are concatenated into a URL path unescaped, so only
    /// URL-safe names are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidCredentialDomain`] when the name is empty
    /// or contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(name: impl AsRef<str>) -> Result<Self, SetupError> {
        let name = name.as_ref();
        if !is_url_safe_name(name) {
            return Err(SetupError::InvalidCredentialDomain {
                domain: name.to_owned(),
            });
        }
        Ok(Self(name.to_owned()))
    }

    /// Borrows the domain name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
