//! SQLite repositories, one per table.

pub mod message_repo;
pub mod project_repo;
pub mod user_repo;

pub use message_repo::MessageRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
