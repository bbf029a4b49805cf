//! HTTP request handlers

pub mod health;
pub mod auth;
pub mod items;
pub mod claims;
pub mod activity;
