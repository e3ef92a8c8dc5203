use std::sync::Arc;
use std::time::Instant;

use crate::credentials::Credentials;
use crate::errors::AuthenticationError;
use crate::lookup::IdentityLookup;
use crate::observer::LoginObserver;
use crate::observer::LoginStage;
use crate::observer::NoopObserver;
use crate::password::PasswordHasher;

/// Checks an email/password pair against stored identities.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
pub struct CredentialVerifier<L>
where
    L: IdentityLookup,
{
    lookup: Arc<L>,
    password_hasher: PasswordHasher,
}

impl<L> CredentialVerifier<L>
where
    L: IdentityLookup,
{
    pub fn new(lookup: Arc<L>) -> Self {
        Self {
            lookup,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Verify credentials and return the matching identity's id.
    ///
    /// # Errors
    /// * `Validation` - Email or password failed shape checks; no lookup was made
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Lookup` - Storage could not be queried
    /// * `PasswordError` - Stored hash is unreadable
    pub async fn verify(&self, credentials: &Credentials) -> Result<i64, AuthenticationError> {
        self.verify_observed(credentials, &mut NoopObserver).await
    }

    /// Same as `verify`, reporting each completed stage to `observer`.
    pub async fn verify_observed(
        &self,
        credentials: &Credentials,
        observer: &mut dyn LoginObserver,
    ) -> Result<i64, AuthenticationError> {
        let started = Instant::now();
        credentials.validate()?;
        observer.stage_completed(LoginStage::Validation, started.elapsed());

        let started = Instant::now();
        let identity = self.lookup.find_by_email(credentials.email()).await?;
        observer.stage_completed(LoginStage::Lookup, started.elapsed());

        let started = Instant::now();
        let password_matches = match &identity {
            Some(identity) => self
                .password_hasher
                .verify(credentials.password(), &identity.password_hash)?,
            None => {
                self.password_hasher.verify_dummy(credentials.password());
                false
            }
        };
        observer.stage_completed(LoginStage::PasswordCheck, started.elapsed());

        match identity {
            Some(identity) if password_matches => {
                tracing::debug!(user_id = identity.id, "Credentials verified");
                Ok(identity.id)
            }
            _ => {
                tracing::warn!(email = %credentials.email(), "Rejected login: invalid credentials");
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }
}
