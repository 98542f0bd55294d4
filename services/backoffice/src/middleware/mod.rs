//! Request pipeline: credential resolution, then the tenant entitlement gate.

pub mod credential;
pub mod gate;
pub mod public_path;
