pub mod entitlement;
pub mod health;
pub mod me;
pub mod token;
