use std::fmt;

use crate::errors::ValidationError;

/// Email and plaintext password supplied at login.
///
/// Lives only for the duration of one attempt. `Debug` never prints the password.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Shape checks performed before any lookup.
    ///
    /// # Errors
    /// * `ValidationError` - One violation per failing field
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        check_email(&mut errors, "email", &self.email);
        check_password(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Record a violation unless `email` is non-empty and plausibly shaped.
pub fn check_email(errors: &mut ValidationError, field: &str, email: &str) {
    if email.trim().is_empty() {
        errors.add(field, "Email is required");
    } else if !email_address::EmailAddress::is_valid(email) {
        errors.add(field, "Email address is not valid");
    }
}

/// Record a violation if `password` is empty.
pub fn check_password(errors: &mut ValidationError, field: &str, password: &str) {
    if password.is_empty() {
        errors.add(field, "Password is required");
    }
}
