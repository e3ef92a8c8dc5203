use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::config::SigningConfig;
use crate::errors::ConfigurationError;
use crate::errors::JwtError;
use crate::jwt::AccessClaims;
use crate::jwt::JwtHandler;

/// Token type reported to clients.
pub const BEARER: &str = "Bearer";

/// Signed access token in the shape of an OAuth 2.0 access token response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Builds and signs access tokens for already-verified users.
///
/// Performs no authentication of its own. Keys and lifetime are fixed at
/// construction.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    issuer: String,
    lifetime: Duration,
    lifetime_secs: u64,
}

impl TokenIssuer {
    /// Build an issuer from signing configuration.
    ///
    /// Meant to run once at startup so bad configuration stops the process
    /// instead of failing logins.
    ///
    /// # Errors
    /// * `ConfigurationError` - Secret, algorithm, lifetime or issuer unusable
    pub fn new(config: &SigningConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let algorithm = config.signing_algorithm()?;
        let lifetime = i64::try_from(config.lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(ConfigurationError::InvalidLifetime)?;

        Ok(Self {
            jwt_handler: JwtHandler::with_algorithm(config.secret.as_bytes(), algorithm)
                .require_issuer(&config.issuer),
            issuer: config.issuer.clone(),
            lifetime,
            lifetime_secs: config.lifetime_secs,
        })
    }

    /// Issue a token for `user_id` valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or timestamps out of range
    pub fn issue(&self, user_id: i64) -> Result<AccessToken, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, JwtError> {
        let claims = AccessClaims::for_user(user_id, &self.issuer, self.lifetime, issued_at)?;
        let access_token = self.jwt_handler.encode(&claims)?;

        tracing::debug!(user_id, jti = %claims.jti, exp = claims.exp, "Access token issued");

        Ok(AccessToken {
            access_token,
            token_type: BEARER.to_string(),
            expires_in: self.lifetime_secs,
        })
    }

    /// Validate a token issued by this issuer and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired`, `TokenNotYetValid`, `InvalidToken`, `DecodingFailed`
    pub fn decode(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::DecodingKey;
    use jsonwebtoken::Validation;

    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn issuer(lifetime_secs: u64) -> TokenIssuer {
        TokenIssuer::new(&SigningConfig::new(SECRET).with_lifetime_secs(lifetime_secs))
            .expect("valid signing config")
    }

    #[test]
    fn test_issue_response_shape() {
        let token = issuer(500).issue(1).expect("Failed to issue token");

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 500);
        assert_eq!(token.access_token.split('.').count(), 3);
    }

    #[test]
    fn test_issued_token_decodes_with_claims() {
        let issuer = issuer(500);
        let token = issuer.issue(1).expect("Failed to issue token");

        let claims = issuer.decode(&token.access_token).expect("Failed to decode");
        assert_eq!(claims.user_id(), 1);
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.iss, "user-service");
        assert_eq!(claims.exp - claims.nbf, 500);
        assert!((1..=5).contains(&(claims.nbf - claims.iat)));
        assert!(claims.exp > claims.nbf && claims.nbf > claims.iat);
    }

    #[test]
    fn test_token_verifies_with_plain_jsonwebtoken() {
        let token = issuer(500).issue(9).expect("Failed to issue token");

        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&["user-service"]);
        let decoded = jsonwebtoken::decode::<AccessClaims>(
            &token.access_token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .expect("standard verifier should accept the token");

        assert_eq!(decoded.claims.data.user_id, 9);
    }

    #[test]
    fn test_issue_is_not_idempotent() {
        let issuer = issuer(500);
        let first = issuer.decode(&issuer.issue(1).unwrap().access_token).unwrap();
        let second = issuer.decode(&issuer.issue(1).unwrap().access_token).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer(60);
        let token = issuer
            .issue_at(1, Utc::now() - Duration::hours(2))
            .expect("Failed to issue token");

        assert_eq!(
            issuer.decode(&token.access_token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_future_token_rejected() {
        let issuer = issuer(60);
        let token = issuer
            .issue_at(1, Utc::now() + Duration::hours(2))
            .expect("Failed to issue token");

        assert_eq!(
            issuer.decode(&token.access_token),
            Err(JwtError::TokenNotYetValid)
        );
    }

    #[test]
    fn test_token_from_other_issuer_rejected() {
        let ours = issuer(500);
        let theirs =
            TokenIssuer::new(&SigningConfig::new(SECRET).with_issuer("someone-else")).unwrap();

        let token = theirs.issue(1).unwrap();
        assert!(matches!(
            ours.decode(&token.access_token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_configured_algorithm_in_header() {
        let issuer =
            TokenIssuer::new(&SigningConfig::new(SECRET).with_algorithm("HS512")).unwrap();
        let token = issuer.issue(1).unwrap();

        let header = jsonwebtoken::decode_header(&token.access_token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS512);
        assert!(issuer.decode(&token.access_token).is_ok());
    }

    #[test]
    fn test_bad_configuration_fails_construction() {
        assert!(matches!(
            TokenIssuer::new(&SigningConfig::new("short")),
            Err(ConfigurationError::SecretTooShort { .. })
        ));
        assert!(matches!(
            TokenIssuer::new(&SigningConfig::new(SECRET).with_algorithm("RS256")),
            Err(ConfigurationError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_huge_lifetime_fails_construction_not_issue() {
        let config = SigningConfig::new(SECRET).with_lifetime_secs(1_000_000_000_000_000);
        assert!(matches!(
            TokenIssuer::new(&config),
            Err(ConfigurationError::InvalidLifetime)
        ));

        let longest = issuer(crate::config::MAX_LIFETIME_SECS);
        let token = longest.issue(1).expect("longest lifetime must still issue");
        assert_eq!(token.expires_in, crate::config::MAX_LIFETIME_SECS);
    }
}
