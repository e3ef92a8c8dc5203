use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::Deserialize;

use crate::errors::ConfigurationError;

/// Minimum secret length for the HMAC family.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (ten years).
pub const MAX_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Process-wide token signing configuration.
///
/// Loaded once at startup and handed to `TokenIssuer::new`, which rejects
/// anything unusable with a `ConfigurationError`.
#[derive(Clone, Deserialize)]
pub struct SigningConfig {
    #[serde(default)]
    pub secret: String,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Token lifetime in seconds, counted from the not-before instant.
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: u64,

    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_lifetime_secs() -> u64 {
    500
}

fn default_issuer() -> String {
    "user-service".to_string()
}

impl SigningConfig {
    /// Configuration with default algorithm, lifetime and issuer.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
            lifetime_secs: default_lifetime_secs(),
            issuer: default_issuer(),
        }
    }

    pub fn with_lifetime_secs(mut self, lifetime_secs: u64) -> Self {
        self.lifetime_secs = lifetime_secs;
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Parse the configured algorithm name.
    ///
    /// Only the HMAC family is accepted since the key material is a shared secret.
    pub fn signing_algorithm(&self) -> Result<Algorithm, ConfigurationError> {
        let name = self.algorithm.trim();
        match Algorithm::from_str(name) {
            Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => {
                Ok(algorithm)
            }
            _ => Err(ConfigurationError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.secret.is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigurationError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: self.secret.len(),
            });
        }
        self.signing_algorithm()?;
        if self.lifetime_secs == 0 || self.lifetime_secs > MAX_LIFETIME_SECS {
            return Err(ConfigurationError::InvalidLifetime);
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigurationError::MissingIssuer);
        }
        Ok(())
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("lifetime_secs", &self.lifetime_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}
