//! Item catalogs defined as data.
//!
//! Items written in Rust carry closures for their cost and effect. Items that
//! come from configuration carry fixed ledgers instead:
//!
//! ```yaml
//! items:
//!   - type: Doggo
//!     cost: { cuddles: -1 }
//!     effect: { cuddles: 100 }
//!   - type: Ball
//! ```
//!
//! A [`Catalog`] is the parsed but unchecked form. [`Catalog::market`] checks
//! every definition and turns the catalog into a [`Market`].

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use merchant_ledger::{Ledger, LedgerError};

use crate::error::CatalogError;
use crate::item::Item;
use crate::market::Market;

/// A list of item definitions, as read from YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    /// The item definitions, in file order.
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

/// One item as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDefinition {
    /// The item's type (and wallet currency).
    #[serde(rename = "type")]
    pub item_type: String,

    /// Price table charged on acquisition; expected to map currency to amount.
    #[serde(default)]
    pub cost: Option<serde_yml::Value>,

    /// Per-unit production; expected to map currency to amount.
    #[serde(default)]
    pub effect: Option<serde_yml::Value>,
}

impl Catalog {
    /// Load a catalog from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Yaml`] if the content is not a valid catalog.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the string is not a valid catalog.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yml::from_str(yaml)?;
        Ok(catalog)
    }

    /// Check every definition and build a market from them.
    ///
    /// The resulting items ignore the state: their costs and effects are the
    /// ledgers written in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if two definitions share a
    /// type, or [`CatalogError::Invalid`] if a cost or effect is malformed.
    pub fn market<S>(&self) -> Result<Market<S>, CatalogError> {
        let mut market = Market::new();
        for definition in &self.items {
            if market.get(&definition.item_type).is_some() {
                return Err(CatalogError::DuplicateItem(definition.item_type.clone()));
            }
            market.insert(definition.item()?);
        }

        debug!(item_count = market.len(), "catalog loaded");
        Ok(market)
    }
}

impl ItemDefinition {
    /// Check this definition and turn it into an [`Item`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CostNotInvocable`] if the cost is not a mapping,
    /// [`LedgerError::CostNotALedger`] if it maps to something other than
    /// amounts, or [`LedgerError::EffectNotALedger`] for a malformed effect.
    pub fn item<S>(&self) -> Result<Item<S>, LedgerError> {
        let mut item = Item::new(self.item_type.clone());

        if let Some(cost) = &self.cost {
            if !cost.is_mapping() {
                return Err(LedgerError::CostNotInvocable {
                    item_type: self.item_type.clone(),
                });
            }
            let cost = yaml_ledger(cost).map_err(|reason| LedgerError::CostNotALedger {
                item_type: self.item_type.clone(),
                reason,
            })?;
            item = item.with_fixed_cost(cost);
        }

        if let Some(effect) = &self.effect {
            let effect = yaml_ledger(effect).map_err(|reason| LedgerError::EffectNotALedger {
                item_type: self.item_type.clone(),
                reason,
            })?;
            item = item.with_fixed_effect(effect);
        }

        Ok(item)
    }
}

fn yaml_ledger(value: &serde_yml::Value) -> Result<Ledger, String> {
    let json = serde_json::to_value(value).map_err(|e| e.to_string())?;
    Ledger::try_from(&json).map_err(|e| match e {
        LedgerError::NotALedger { reason } => reason,
        other => other.to_string(),
    })
}
