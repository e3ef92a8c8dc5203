use async_trait::async_trait;

use crate::errors::LookupError;

/// Role given to accounts that were not assigned one.
pub const DEFAULT_ROLE: &str = "user";

/// Stored account as seen by the credential verifier.
///
/// `role` is carried as data only; nothing in this crate enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
}

/// Read access to stored identities, keyed by email.
///
/// Implementations must be read-your-writes consistent: an account must be
/// findable as soon as its creation has returned.
#[async_trait]
pub trait IdentityLookup: Send + Sync + 'static {
    /// Retrieve the identity registered under `email`.
    ///
    /// # Returns
    /// Optional identity (None if no account uses this email)
    ///
    /// # Errors
    /// * `Unavailable` - Storage could not be queried
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, LookupError>;
}
