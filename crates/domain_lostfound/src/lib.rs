//! Lost & Found Domain
//!
//! This crate implements the campus lost & found portal: students report lost
//! or found items, file ownership claims against them, and faculty verify
//! those claims.
//!
//! # Lifecycles
//!
//! ```text
//! Item:   open -> claimed
//! Claim:  pending -> approved | rejected
//! ```
//!
//! Approving a claim marks its item claimed by the claimant. Rejecting a
//! claim leaves the item open.

pub mod item;
pub mod claim;
pub mod user;
pub mod filter;
pub mod ports;
pub mod workflow;
pub mod activity;
pub mod service;
pub mod error;

pub use item::{Category, Item, ItemDraft, ItemStatus, ItemType, NewItem};
pub use claim::{Claim, ClaimDecision, ClaimDraft, ClaimMessage, ClaimStatus, NewClaim};
pub use user::{Credentials, PasswordPolicy, Role, User};
pub use filter::ItemFilter;
pub use ports::{ClaimDecisionUpdate, ClaimQuery, ItemQuery, ItemStatusUpdate, LostFoundStore};
pub use workflow::{ReconciliationFailure, ReconciliationReport};
pub use activity::{ActivityEntry, DEFAULT_ACTIVITY_LIMIT};
pub use service::{LostFoundService, PendingClaimsOrdering};
pub use error::LostFoundError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{InMemoryStore, StoreOperation};
