//! OAuth token wrapper for the GitHub API.

use crate::error::SetupError;

/// OAuth token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SetupError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SetupError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrows the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::AccessToken;
    use crate::error::SetupError;

    #[test]
    fn token_is_trimmed() {
        let token = AccessToken::new("  gho_token  ").expect("token should be accepted");
        assert_eq!(token.value(), "gho_token");
    }

    #[test]
    fn blank_token_is_rejected() {
        let error = AccessToken::new("   ").expect_err("blank token should be rejected");
        assert_eq!(error, SetupError::MissingToken);
    }
}
