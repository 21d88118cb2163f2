//! Admin capability tokens.
//!
//! Back-office operations take an [`AdminToken`] argument. The only way to obtain
//! one is through [`AdminAuth`], either by logging in with the admin password or by
//! presenting a token string issued earlier.

use crate::error::AuthError;
use std::fmt;

const TOKEN_DOMAIN: &[u8] = b"laptop-catalog-admin:";

/// Proof that the caller is an administrator.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Token text to hand back to the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs.
impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(..)")
    }
}

/// Issues and verifies admin tokens for one configured password.
#[derive(Clone)]
pub struct AdminAuth {
    password: String,
    token: String,
}

impl fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuth").finish_non_exhaustive()
    }
}

impl AdminAuth {
    pub fn new(password: impl Into<String>) -> Self {
        let password = password.into();
        let mut material = TOKEN_DOMAIN.to_vec();
        material.extend_from_slice(password.as_bytes());
        let token = format!("{:016x}", xxhash_rust::xxh3::xxh3_64(&material));
        Self { password, token }
    }

    /// Exchange the admin password for a token.
    pub fn login(&self, password: &str) -> Result<AdminToken, AuthError> {
        if password == self.password {
            tracing::info!("Admin login succeeded");
            Ok(AdminToken(self.token.clone()))
        } else {
            tracing::warn!("Admin login rejected");
            Err(AuthError::InvalidPassword)
        }
    }

    /// Turn a presented token string back into a capability.
    pub fn verify(&self, token: &str) -> Result<AdminToken, AuthError> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        if token == self.token {
            Ok(AdminToken(self.token.clone()))
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
