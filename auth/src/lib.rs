//! Authentication core
//!
//! Credential verification and access token issuance:
//! - Password hashing (Argon2id, fresh salt per hash)
//! - Credential verification against an injected identity lookup
//! - Signed, time-bounded JWT access tokens
//! - Authentication coordination with per-stage timing observers
//!
//! Storage and transport stay outside this crate; services plug their user
//! store in through [`IdentityLookup`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{SigningConfig, TokenIssuer};
//!
//! let config = SigningConfig::new("secret_key_at_least_32_bytes_long!").with_lifetime_secs(500);
//! let issuer = TokenIssuer::new(&config).unwrap();
//!
//! let token = issuer.issue(1).unwrap();
//! assert_eq!(token.token_type, "Bearer");
//! assert_eq!(token.expires_in, 500);
//!
//! let claims = issuer.decode(&token.access_token).unwrap();
//! assert_eq!(claims.user_id(), 1);
//! ```

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod issuer;
pub mod jwt;
pub mod lookup;
pub mod observer;
pub mod password;
pub mod verifier;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use config::SigningConfig;
pub use credentials::Credentials;
pub use errors::AuthenticationError;
pub use errors::ConfigurationError;
pub use errors::FieldViolation;
pub use errors::JwtError;
pub use errors::LookupError;
pub use errors::PasswordError;
pub use errors::ValidationError;
pub use issuer::AccessToken;
pub use issuer::TokenIssuer;
pub use jwt::AccessClaims;
pub use jwt::JwtHandler;
pub use lookup::Identity;
pub use lookup::IdentityLookup;
pub use lookup::DEFAULT_ROLE;
pub use observer::LoginObserver;
pub use observer::LoginStage;
pub use observer::NoopObserver;
pub use observer::StageTimings;
pub use password::PasswordHasher;
pub use verifier::CredentialVerifier;
