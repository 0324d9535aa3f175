//! Publishing credentials read from the resolved store
//!
//! Signing material is optional: an unsigned local publish is valid, so each
//! key falls back to an empty string. Repository credentials are required.

use crate::{ConfigResolver, Error, Result};

pub const SIGNING_KEY_ID: &str = "SIGNING_KEY_ID";
pub const SIGNING_PASSWORD: &str = "SIGNING_PASSWORD";
pub const SIGNING_PGP_B64: &str = "SIGNING_PGP_B64";

pub const OSSRH_PROFILE_ID: &str = "OSSRH_PROFILE_ID";
pub const OSSRH_USERNAME: &str = "OSSRH_USERNAME";
pub const OSSRH_PASSWORD: &str = "OSSRH_PASSWORD";

/// Every signing key, in the order reported to users.
pub const SIGNING_KEYS: [&str; 3] = [SIGNING_KEY_ID, SIGNING_PASSWORD, SIGNING_PGP_B64];

/// Every repository credential key, in the order reported to users.
pub const REPOSITORY_KEYS: [&str; 3] = [OSSRH_PROFILE_ID, OSSRH_USERNAME, OSSRH_PASSWORD];

const MASK: &str = "****";

/// In-memory PGP signing configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningInfo {
    pub key_id: String,
    pub password: String,
    /// Base64-encoded armored private key.
    pub pgp_key_b64: String,
}

impl SigningInfo {
    pub fn from_resolver(resolver: &ConfigResolver) -> Self {
        Self {
            key_id: resolver.get_or(SIGNING_KEY_ID, "").to_string(),
            password: resolver.get_or(SIGNING_PASSWORD, "").to_string(),
            pgp_key_b64: resolver.get_or(SIGNING_PGP_B64, "").to_string(),
        }
    }

    /// Whether all three values are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.key_id.is_empty() && !self.password.is_empty() && !self.pgp_key_b64.is_empty()
    }
}

impl std::fmt::Debug for SigningInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningInfo")
            .field("key_id", &self.key_id)
            .field("password", &mask(&self.password))
            .field("pgp_key_b64", &mask(&self.pgp_key_b64))
            .finish()
    }
}

/// Staging repository login.
#[derive(Clone, PartialEq, Eq)]
pub struct RepositoryCredentials {
    pub profile_id: String,
    pub username: String,
    pub password: String,
}

impl RepositoryCredentials {
    /// Read all three keys, failing on the first one that is absent.
    pub fn from_resolver(resolver: &ConfigResolver) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            match resolver.get(key) {
                Ok(value) => Ok(value.to_string()),
                Err(Error::KeyNotFound { .. }) => Err(Error::MissingCredential {
                    key: key.to_string(),
                }),
                Err(e) => Err(e),
            }
        };

        Ok(Self {
            profile_id: required(OSSRH_PROFILE_ID)?,
            username: required(OSSRH_USERNAME)?,
            password: required(OSSRH_PASSWORD)?,
        })
    }
}

impl std::fmt::Debug for RepositoryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryCredentials")
            .field("profile_id", &self.profile_id)
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .finish()
    }
}

fn mask(value: &str) -> &str {
    if value.is_empty() { "" } else { MASK }
}
