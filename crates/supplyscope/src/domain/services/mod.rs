//! Domain Services
//!
//! Pure rules with no I/O.

pub mod completion_text;
mod portfolio;
mod reputation;
mod search_trigger;

pub use portfolio::*;
pub use reputation::*;
pub use search_trigger::*;
