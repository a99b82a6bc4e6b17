//! Error types for address-space inspection

use crate::core::cidr::Cidr;
use thiserror::Error;

/// Inspection result type
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Errors raised while inspecting a network's address space
#[derive(Error, Debug)]
pub enum InspectorError {
    /// Two retained used blocks share at least one address
    #[error("{first} overlaps with {second}")]
    Overlap { first: Cidr, second: Cidr },

    /// CIDR text could not be parsed
    #[error("Invalid CIDR block: {0}")]
    InvalidCidr(String),

    #[error("Invalid project id: {0} (lowercase letters, digits, hyphens; 6-30 chars; must start with a letter)")]
    InvalidProject(String),

    #[error("Invalid resource name: {0} (lowercase letters, digits, hyphens; 1-63 chars; must start with a letter)")]
    InvalidResourceName(String),

    /// Inventory resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Inventory answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
