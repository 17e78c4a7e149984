//! Item descriptors.
//!
//! An [`Item`] is a type name plus two optional functions of the caller's
//! state: a cost (the ledger delta charged when the item is acquired) and an
//! effect (the ledger produced per owned unit, per tick). The state type `S`
//! belongs to the caller; items only pass it through.

use std::fmt;
use std::sync::Arc;

use merchant_ledger::{Ledger, LedgerError};

type CostFn<S> = Arc<dyn Fn(&S) -> Result<Ledger, LedgerError> + Send + Sync>;
type EffectFn<S> = Arc<dyn Fn(&S) -> Ledger + Send + Sync>;

/// Something that can be bought, owned and counted in a wallet.
///
/// The item's type doubles as its currency: owning three swords is a wallet
/// entry `{"Sword": 3}`.
///
/// ```
/// use merchant_items::Item;
/// use merchant_ledger::Ledger;
/// use rust_decimal::Decimal;
///
/// struct Shop {
///     discount: Decimal,
/// }
///
/// let sword: Item<Shop> = Item::new("Sword")
///     .with_cost(|shop: &Shop| Ledger::from([("GOLD", Decimal::new(-5, 0) + shop.discount)]))
///     .with_fixed_effect(Ledger::from([("MAGIC", Decimal::new(2, 0))]));
///
/// assert_eq!(sword.item_type(), "Sword");
/// assert!(sword.has_cost());
/// assert!(sword.has_effect());
/// ```
pub struct Item<S> {
    item_type: String,
    cost: Option<CostFn<S>>,
    effect: Option<EffectFn<S>>,
}

impl<S> Item<S> {
    /// Create a free item with no effect.
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            cost: None,
            effect: None,
        }
    }

    /// Set the cost to a function of state returning a ledger.
    #[must_use]
    pub fn with_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(&S) -> Ledger + Send + Sync + 'static,
    {
        self.cost = Some(Arc::new(move |state: &S| -> Result<Ledger, LedgerError> {
            Ok(cost(state))
        }));
        self
    }

    /// Set the cost to a function of state returning untyped JSON.
    ///
    /// The value is checked every time the cost is taken. A value that is not
    /// an object of numbers makes [`cost`](crate::cost) and
    /// [`buy`](crate::buy) fail with [`LedgerError::CostNotALedger`].
    #[must_use]
    pub fn with_untyped_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(&S) -> serde_json::Value + Send + Sync + 'static,
    {
        let item_type = self.item_type.clone();
        self.cost = Some(Arc::new(move |state: &S| -> Result<Ledger, LedgerError> {
            Ledger::try_from(&cost(state)).map_err(|err| LedgerError::CostNotALedger {
                item_type: item_type.clone(),
                reason: match err {
                    LedgerError::NotALedger { reason } => reason,
                    other => other.to_string(),
                },
            })
        }));
        self
    }

    /// Set the cost to the same ledger regardless of state.
    #[must_use]
    pub fn with_fixed_cost(self, cost: Ledger) -> Self {
        self.with_cost(move |_: &S| cost.clone())
    }

    /// Set the per-unit effect to a function of state.
    #[must_use]
    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&S) -> Ledger + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Set the per-unit effect to the same ledger regardless of state.
    #[must_use]
    pub fn with_fixed_effect(self, effect: Ledger) -> Self {
        self.with_effect(move |_: &S| effect.clone())
    }

    /// The item's type, which is also its currency name in a wallet.
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Return whether acquiring the item costs anything.
    pub const fn has_cost(&self) -> bool {
        self.cost.is_some()
    }

    /// Return whether owning the item produces anything.
    pub const fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Evaluate the cost, or `None` for a free item.
    pub(crate) fn cost_for(&self, state: &S) -> Option<Result<Ledger, LedgerError>> {
        self.cost.as_ref().map(|cost| cost(state))
    }

    /// Evaluate the per-unit effect, or `None` for an item without one.
    pub(crate) fn effect_for(&self, state: &S) -> Option<Ledger> {
        self.effect.as_ref().map(|effect| effect(state))
    }
}

impl<S> Clone for Item<S> {
    fn clone(&self) -> Self {
        Self {
            item_type: self.item_type.clone(),
            cost: self.cost.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<S> fmt::Debug for Item<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("item_type", &self.item_type)
            .field("has_cost", &self.has_cost())
            .field("has_effect", &self.has_effect())
            .finish()
    }
}
