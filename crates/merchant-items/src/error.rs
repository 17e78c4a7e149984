//! Error types for the merchant-items crate.
//!
//! Invalid arguments (bad ledgers, bad costs, bad effects) are reported with
//! [`LedgerError`] from `merchant-ledger`. The types here wrap it for the two
//! layers that can fail for other reasons: markets and catalogs.

use merchant_ledger::LedgerError;

/// Errors that can occur when trading through a [`Market`](crate::Market).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// No item of the requested type is listed in the market.
    #[error("unknown item type: {0}")]
    UnknownItem(String),

    /// An item's cost could not be computed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur when loading an item catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Two definitions share the same item type.
    #[error("duplicate item type in catalog: {0}")]
    DuplicateItem(String),

    /// A definition's cost or effect is not usable.
    #[error("invalid item definition: {source}")]
    Invalid {
        /// The underlying validation error.
        #[from]
        source: LedgerError,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
