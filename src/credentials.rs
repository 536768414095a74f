//! Credential resolution
//!
//! The store handle authenticates with an access key id and a secret access
//! key taken from the environment. Both are mandatory and have no defaults;
//! resolution happens once at process start, before any table creation or
//! item write is attempted.

use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the access key id
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable holding the secret access key
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Static credentials for the store handle
#[derive(Clone)]
pub struct SeedCredentials {
    /// Access key identifier
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
}

impl fmt::Debug for SeedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Resolve credentials from the process environment
///
/// Fails fast with [`ConfigError::MissingCredential`] naming the first
/// variable that is not set.
pub fn resolve_credentials() -> Result<SeedCredentials, ConfigError> {
    resolve_credentials_with(|name| std::env::var(name).ok())
}

/// Resolve credentials against an arbitrary lookup
///
/// [`resolve_credentials`] calls this with the process environment; tests
/// pass a closed-over map instead.
pub fn resolve_credentials_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SeedCredentials, ConfigError> {
    let access_key_id =
        lookup(ACCESS_KEY_ID_VAR).ok_or(ConfigError::MissingCredential(ACCESS_KEY_ID_VAR))?;
    let secret_access_key = lookup(SECRET_ACCESS_KEY_VAR)
        .ok_or(ConfigError::MissingCredential(SECRET_ACCESS_KEY_VAR))?;

    Ok(SeedCredentials {
        access_key_id,
        secret_access_key,
    })
}
