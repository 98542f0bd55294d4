//! Auth types shared across Tillpoint services.
//!
//! Provides JWT validation, bearer-header parsing, and the `CurrentIdentity` extractor.

pub mod bearer;
pub mod identity;
pub mod token;
