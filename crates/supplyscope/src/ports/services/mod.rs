//! Service Ports
//!
//! Abstract interfaces for external services.

mod llm_provider;
mod web_search;

pub use llm_provider::*;
pub use web_search::*;
