pub mod claims;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::SubjectData;
pub use handler::JwtHandler;
