use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::JwtError;

/// Seconds between issuance and the not-before instant.
///
/// Tolerates clock drift between the issuer and whoever verifies the token.
pub const NOT_BEFORE_SKEW_SECS: i64 = 2;

/// Random bytes behind each `jti`.
const TOKEN_ID_BYTES: usize = 32;

/// Claims carried by an access token.
///
/// Standard RFC 7519 fields plus a nested `data` object identifying the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier, as a string)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Data related to the signed-in user
    pub data: SubjectData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectData {
    pub user_id: i64,
}

impl AccessClaims {
    /// Build claims for `user_id` issued at `issued_at`.
    ///
    /// `nbf` trails `iat` by `NOT_BEFORE_SKEW_SECS`; `exp` is `nbf + lifetime`.
    /// Every call draws a fresh `jti`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `nbf` or `exp` falls outside the representable date range
    pub fn for_user(
        user_id: i64,
        issuer: &str,
        lifetime: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, JwtError> {
        let not_before = issued_at
            .checked_add_signed(Duration::seconds(NOT_BEFORE_SKEW_SECS))
            .ok_or_else(|| JwtError::EncodingFailed("not-before out of range".to_string()))?;
        let expiration = not_before
            .checked_add_signed(lifetime)
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            nbf: not_before.timestamp(),
            exp: expiration.timestamp(),
            jti: generate_token_id(),
            iss: issuer.to_string(),
            data: SubjectData { user_id },
        })
    }

    /// Identifier of the user the token was issued to.
    pub fn user_id(&self) -> i64 {
        self.data.user_id
    }
}

fn generate_token_id() -> String {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
