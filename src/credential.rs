//! Login credentials for the IS API.

use std::fmt;

use crate::error::{IsApiError, Result};

/// Login/secret pair sent as HTTP basic auth on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    login: String,
    secret: String,
}

impl Credential {
    /// Create a credential from its two halves.
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            secret: secret.into(),
        }
    }

    /// Parse an API key in the `login:secret` form issued by the IS.
    ///
    /// Only the first `:` separates the halves; the secret may contain more.
    pub fn from_api_key(raw: &str) -> Result<Self> {
        let (login, secret) = raw
            .trim()
            .split_once(':')
            .ok_or(IsApiError::InvalidCredential)?;
        if login.is_empty() {
            return Err(IsApiError::InvalidCredential);
        }
        Ok(Self::new(login, secret))
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("secret", &"<redacted>")
            .finish()
    }
}
