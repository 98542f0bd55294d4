pub mod entitlement;
pub mod gate;
pub mod identity;
pub mod token;
