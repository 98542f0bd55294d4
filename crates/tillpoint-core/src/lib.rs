//! Service plumbing shared by Tillpoint HTTP services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
