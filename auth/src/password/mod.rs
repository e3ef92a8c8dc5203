pub mod argon2;

pub use argon2::PasswordHasher;
pub use crate::errors::PasswordError;
