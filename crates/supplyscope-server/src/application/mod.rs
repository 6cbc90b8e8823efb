//! Application Layer (Use Cases)
//!
//! Orchestrates provider chains and domain rules for each endpoint.

pub mod chat_service;
pub mod completion_chain;
pub mod esg_service;
pub mod intel_service;
pub mod portfolio_service;
pub mod search_chain;
pub mod status_service;

pub use chat_service::{ChatInput, ChatService};
pub use completion_chain::CompletionChain;
pub use esg_service::EsgService;
pub use intel_service::IntelService;
pub use portfolio_service::PortfolioService;
pub use search_chain::SearchChain;
pub use status_service::{AiStatus, StatusService};
