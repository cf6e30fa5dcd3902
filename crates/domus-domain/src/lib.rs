//! Cross-service domain vocabulary for the Domus property portal.

pub mod pagination;
pub mod role;
