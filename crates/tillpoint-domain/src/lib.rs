//! Domain types shared across all Tillpoint services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod entitlement;
pub mod id;
pub mod identity;
pub mod permission;
pub mod tenant;
