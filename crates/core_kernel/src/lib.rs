//! Core Kernel - Foundational types and utilities for the lost & found system
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Strongly-typed identifiers for items, claims and users
//! - Time helpers for store timestamps and relative-time display
//! - Port and adapter abstractions shared by every store implementation

pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use temporal::{relative_time, relative_time_from, or_epoch};
pub use identifiers::{ItemId, ClaimId, UserId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
