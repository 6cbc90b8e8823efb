//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// No provider able to serve the request is configured
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Every configured provider was tried and none produced a usable result
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    pub fn external<P: AsRef<str>, M: std::fmt::Display>(provider: P, message: M) -> Self {
        Self::ExternalService(format!("{}: {}", provider.as_ref(), message))
    }

    pub fn parse<P: AsRef<str>, M: std::fmt::Display>(provider: P, message: M) -> Self {
        Self::Parse(format!("{}: {}", provider.as_ref(), message))
    }
}
