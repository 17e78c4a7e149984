//! A catalog of items with the purchase flow built in.
//!
//! Every caller of [`buy`] ends up writing the same sequence: charge the cost,
//! throw the result away if the wallet went into the red, otherwise count the
//! new item and recompute what the wallet produces per tick. [`Market`] is
//! that sequence over a catalog of items keyed by type.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use merchant_ledger::{Ledger, LedgerError, in_the_black, sum};

use crate::economy::{add_amount, all_costs_by_key, buy, effects};
use crate::error::MarketError;
use crate::item::Item;

/// The outcome of [`Market::purchase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purchase {
    /// The wallet could afford the items.
    Completed {
        /// The wallet with the cost charged and the items counted.
        wallet: Ledger,
    },
    /// The wallet could not afford the items and was left as it was.
    Declined {
        /// The negative entries the purchase would have left behind.
        shortfall: Ledger,
    },
}

/// A catalog of items keyed by item type.
pub struct Market<S> {
    items: BTreeMap<String, Item<S>>,
}

impl<S> Market<S> {
    /// Create an empty market.
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Add `item` to the market, builder style.
    #[must_use]
    pub fn with_item(mut self, item: Item<S>) -> Self {
        self.insert(item);
        self
    }

    /// List `item`, returning the item it replaces if its type was taken.
    pub fn insert(&mut self, item: Item<S>) -> Option<Item<S>> {
        self.items.insert(item.item_type().to_owned(), item)
    }

    /// Look up an item by type.
    pub fn get(&self, item_type: &str) -> Option<&Item<S>> {
        self.items.get(item_type)
    }

    /// Iterate over the listed items in type order.
    pub fn items(&self) -> impl Iterator<Item = &Item<S>> + '_ {
        self.items.values()
    }

    /// Return the number of listed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return whether nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the current cost of every listed item, keyed by type.
    ///
    /// # Errors
    ///
    /// Returns the first cost error encountered.
    pub fn price_list(&self, state: &S) -> Result<BTreeMap<String, Ledger>, LedgerError> {
        all_costs_by_key(&self.items, state)
    }

    /// Buy `quantity` units of `item_type` out of `wallet`.
    ///
    /// The cost is charged once per unit and the units are counted in the
    /// wallet. If the charged wallet has any negative entry the purchase is
    /// declined and the caller keeps its original wallet. Buying zero units
    /// completes with the wallet itself, untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UnknownItem`] if nothing of that type is listed,
    /// or [`MarketError::Ledger`] if the item's cost is not a ledger.
    pub fn purchase(
        &self,
        item_type: &str,
        wallet: &Ledger,
        state: &S,
        quantity: u32,
    ) -> Result<Purchase, MarketError> {
        let item = self
            .get(item_type)
            .ok_or_else(|| MarketError::UnknownItem(item_type.to_owned()))?;

        if quantity == 0 {
            return Ok(Purchase::Completed {
                wallet: wallet.clone(),
            });
        }

        let mut charged = wallet.clone();
        for _ in 0..quantity {
            charged = buy(Some(item), &charged, state)?;
        }

        if !in_the_black(&charged) {
            let shortfall = charged.deficits();
            debug!(item_type, quantity, shortfall = %shortfall, "purchase declined");
            return Ok(Purchase::Declined { shortfall });
        }

        let wallet = add_amount(item, &charged, Decimal::from(quantity));
        debug!(item_type, quantity, wallet = %wallet, "purchase completed");
        Ok(Purchase::Completed { wallet })
    }

    /// Return what everything in `wallet` produces in one tick.
    pub fn production(&self, wallet: &Ledger, state: &S) -> Ledger {
        effects(self.items.values(), wallet, state)
    }

    /// Run one tick: fold what `wallet` produces into it.
    pub fn tick(&self, wallet: &Ledger, state: &S) -> Ledger {
        sum([wallet, &self.production(wallet, state)])
    }
}

impl<S> Default for Market<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Market<S> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<S> fmt::Debug for Market<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Market").field("items", &self.items).finish()
    }
}

impl<S> FromIterator<Item<S>> for Market<S> {
    fn from_iter<I: IntoIterator<Item = Item<S>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_item)
    }
}
