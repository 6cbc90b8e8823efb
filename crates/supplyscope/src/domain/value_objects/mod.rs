//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod issue_category;
mod provider;
mod severity;

pub use issue_category::*;
pub use provider::*;
pub use severity::*;
