//! SupplyScope API Data Models
//!
//! - Chat: supplier Q&A
//! - Intel: supplier report query
//! - Portfolio: portfolio analysis
//! - Status: AI backend availability

mod chat;
mod error;
mod intel;
mod portfolio;
mod status;

pub use chat::*;
pub use error::*;
pub use intel::*;
pub use portfolio::*;
pub use status::*;
