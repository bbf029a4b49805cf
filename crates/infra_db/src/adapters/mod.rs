//! Domain Adapters
//!
//! Implementations of domain ports over the PostgreSQL repositories. The
//! adapter implements the port trait, translates between domain models and
//! row types, and converts database errors into port errors.

pub mod postgres;

pub use postgres::PostgresLostFoundAdapter;
