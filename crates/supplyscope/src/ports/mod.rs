//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external providers.
//!
//! Implementations of these traits live in the server crate's adapters.

pub mod services;

// Re-exports
pub use services::*;
