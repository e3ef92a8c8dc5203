pub mod memory;
pub mod post;
pub mod user;

pub use memory::InMemoryPostRepository;
pub use memory::InMemoryUserRepository;
pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;
