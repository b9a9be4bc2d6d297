//! Unified error type for the alert bot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure reaching the weather endpoint.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not well-formed JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("message send failed: {0}")]
    Send(String),

    #[error("config error: {0}")]
    Config(String),
}
