//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the lost & found portal using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and map
//! rows to plain column structs; the adapter in [`adapters`] translates those
//! rows into domain types and implements the domain's store port.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::{create_pool, DatabaseConfig, PostgresLostFoundAdapter};
//! use domain_lostfound::LostFoundService;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lostfound")).await?;
//! let service = LostFoundService::new(Arc::new(PostgresLostFoundAdapter::new(pool)));
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresLostFoundAdapter;
