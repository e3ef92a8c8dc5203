use std::sync::Arc;
use std::time::Instant;

use crate::config::SigningConfig;
use crate::credentials::Credentials;
use crate::errors::AuthenticationError;
use crate::errors::ConfigurationError;
use crate::errors::JwtError;
use crate::issuer::AccessToken;
use crate::issuer::TokenIssuer;
use crate::jwt::AccessClaims;
use crate::lookup::IdentityLookup;
use crate::observer::LoginObserver;
use crate::observer::LoginStage;
use crate::observer::NoopObserver;
use crate::verifier::CredentialVerifier;

/// Authentication coordinator combining credential verification and token issuance.
pub struct Authenticator<L>
where
    L: IdentityLookup,
{
    verifier: CredentialVerifier<L>,
    issuer: TokenIssuer,
}

impl<L> Authenticator<L>
where
    L: IdentityLookup,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `lookup` - Storage collaborator resolving emails to identities
    /// * `signing` - Process-wide token signing configuration
    ///
    /// # Errors
    /// * `ConfigurationError` - Signing configuration is unusable
    pub fn new(lookup: Arc<L>, signing: &SigningConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            verifier: CredentialVerifier::new(lookup),
            issuer: TokenIssuer::new(signing)?,
        })
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `Validation` - Malformed email or password
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Lookup` / `PasswordError` / `JwtError` - Infrastructure failures
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthenticationError> {
        self.login_observed(credentials, &mut NoopObserver).await
    }

    /// Same as `login`, reporting each completed stage to `observer`.
    pub async fn login_observed(
        &self,
        credentials: &Credentials,
        observer: &mut dyn LoginObserver,
    ) -> Result<AccessToken, AuthenticationError> {
        let user_id = self.verifier.verify_observed(credentials, &mut *observer).await?;

        let started = Instant::now();
        let token = self.issuer.issue(user_id)?;
        observer.stage_completed(LoginStage::TokenIssue, started.elapsed());

        Ok(token)
    }

    /// Issue a token without password verification.
    ///
    /// For callers that established the identity by other means, such as
    /// registration, which has just stored the password it was given.
    pub fn issue_token(&self, user_id: i64) -> Result<AccessToken, JwtError> {
        self.issuer.issue(user_id)
    }

    /// Validate and decode an access token.
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.issuer.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::errors::LookupError;
    use crate::lookup::Identity;
    use crate::observer::StageTimings;
    use crate::password::PasswordHasher;

    struct SingleIdentity(Identity);

    #[async_trait]
    impl IdentityLookup for SingleIdentity {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, LookupError> {
            Ok((self.0.email == email).then(|| self.0.clone()))
        }
    }

    fn authenticator() -> Authenticator<SingleIdentity> {
        let identity = Identity {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: PasswordHasher::new().hash("secret").unwrap(),
            name: Some("Alice".to_string()),
            role: "user".to_string(),
        };
        let signing =
            SigningConfig::new("test_secret_key_at_least_32_bytes!").with_lifetime_secs(500);

        Authenticator::new(Arc::new(SingleIdentity(identity)), &signing)
            .expect("valid signing config")
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = authenticator();

        let token = authenticator
            .login(&Credentials::new("a@b.com", "secret"))
            .await
            .expect("Authentication failed");

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 500);

        let claims = authenticator
            .validate_token(&token.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.user_id(), 1);
        assert_eq!(claims.exp - claims.nbf, 500);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let result = authenticator()
            .login(&Credentials::new("a@b.com", "wrong_password"))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_observed_reports_every_stage() {
        let mut timings = StageTimings::new();

        authenticator()
            .login_observed(&Credentials::new("a@b.com", "secret"), &mut timings)
            .await
            .expect("Authentication failed");

        assert_eq!(timings.stages().len(), 4);
        assert!(timings.get(LoginStage::TokenIssue).is_some());
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let token = authenticator.issue_token(5).expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&token.access_token)
            .expect("Failed to validate token");

        assert_eq!(claims.user_id(), 5);
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_signing_config_rejected() {
        let lookup = Arc::new(SingleIdentity(Identity {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: String::new(),
            name: None,
            role: "user".to_string(),
        }));

        let result = Authenticator::new(lookup, &SigningConfig::new(""));
        assert!(matches!(result, Err(ConfigurationError::MissingSecret)));
    }
}
