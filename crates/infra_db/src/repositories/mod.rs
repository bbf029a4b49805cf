//! Repository implementations for the lost & found tables
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! column structs. Queries are built at runtime so the crate compiles without
//! a live database.

pub mod items;
pub mod claims;
pub mod users;

pub use items::ItemsRepository;
pub use claims::ClaimsRepository;
pub use users::UsersRepository;
