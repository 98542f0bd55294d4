//! Client-side session guard for the Tillpoint back-office.
//!
//! Before a protected view renders, [`guard::SessionGuard`] confirms a live
//! session and an identity context, or produces a sign-in redirect that
//! preserves the requested location.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod guard;
pub mod store;
