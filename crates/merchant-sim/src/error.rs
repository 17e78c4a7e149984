//! Error types for the simulation binary.
//!
//! [`SimError`] is the top-level error type that wraps all possible
//! failure modes during startup and while ticking.

use merchant_items::{CatalogError, MarketError};

use crate::config::ConfigError;

/// Top-level error for the simulation binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The configured item catalog is invalid.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// A scheduled purchase could not be carried out.
    #[error("market error at tick {tick}: {source}")]
    Market {
        /// The tick the purchase was scheduled for.
        tick: u64,
        /// The underlying market error.
        source: MarketError,
    },

    /// The final wallet could not be rendered as JSON.
    #[error("failed to serialize wallet: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
