//! Infrastructure layer: concrete implementations of the domain's capability
//! traits.

pub mod delivery;
pub mod directory;
