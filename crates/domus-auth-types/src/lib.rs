//! Identity types injected by the Domus API gateway.

pub mod identity;
