//! SupplyScope API Routes
//!
//! - /chat - Supplier Q&A with optional web search
//! - /intel - Supplier intelligence report
//! - /portfolio-analysis - Portfolio strategy analysis
//! - /ollama-status - AI backend availability

pub mod chat;
pub mod intel;
pub mod portfolio;
pub mod status;
pub mod swagger;
