//! Data Transfer Objects
//!
//! Request and response types for the HTTP API. Response bodies are built
//! from domain types with `From` conversions.

pub mod auth;
pub mod items;
pub mod claims;
pub mod activity;
