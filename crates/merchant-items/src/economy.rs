//! Item economics: turning item definitions into ledger deltas.
//!
//! These functions are pure. None of them checks affordability: [`buy`]
//! happily drives a wallet negative, and it is up to the caller (or the
//! [`Market`](crate::Market)) to look at the result with
//! [`in_the_black`](merchant_ledger::in_the_black) and decide whether to keep it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::trace;

use merchant_ledger::{Ledger, LedgerError, scale, sum};

use crate::item::Item;

/// Return the cost of acquiring `item` in the given state.
///
/// An absent item or an item without a cost is free: the result is an empty
/// ledger.
///
/// # Errors
///
/// Returns [`LedgerError::CostNotALedger`] if the item's cost produced
/// something that is not a ledger.
pub fn cost<S>(item: Option<&Item<S>>, state: &S) -> Result<Ledger, LedgerError> {
    item.and_then(|item| item.cost_for(state))
        .unwrap_or_else(|| Ok(Ledger::new()))
}

/// Return the cost of every item in `items`, keyed by item type.
///
/// Items sharing a type collapse into one entry; the last one wins.
///
/// # Errors
///
/// Returns the first cost error encountered.
pub fn all_costs<S>(items: &[Item<S>], state: &S) -> Result<BTreeMap<String, Ledger>, LedgerError> {
    items
        .iter()
        .map(|item| Ok((item.item_type().to_owned(), cost(Some(item), state)?)))
        .collect()
}

/// Return the cost of every item in a keyed collection, under the same keys.
///
/// # Errors
///
/// Returns the first cost error encountered.
pub fn all_costs_by_key<K, S>(
    items: &BTreeMap<K, Item<S>>,
    state: &S,
) -> Result<BTreeMap<K, Ledger>, LedgerError>
where
    K: Ord + Clone,
{
    items
        .iter()
        .map(|(key, item)| Ok((key.clone(), cost(Some(item), state)?)))
        .collect()
}

/// Charge the cost of `item` to `wallet`.
///
/// An absent item or a free item returns the wallet itself, as the same
/// shared value. Otherwise the result is `sum(cost, wallet)`, whether or not
/// the wallet could afford it.
///
/// # Errors
///
/// Returns [`LedgerError::CostNotALedger`] if the item's cost produced
/// something that is not a ledger. The wallet is never partially charged.
pub fn buy<S>(item: Option<&Item<S>>, wallet: &Ledger, state: &S) -> Result<Ledger, LedgerError> {
    let Some(item) = item.filter(|item| item.has_cost()) else {
        return Ok(wallet.clone());
    };

    let price = cost(Some(item), state)?;
    trace!(item_type = item.item_type(), price = %price, "charging item cost");
    Ok(sum([&price, wallet]))
}

/// Add one unit of `item` to `wallet`.
///
/// This only counts the item; it does not charge its cost.
pub fn add<S>(item: &Item<S>, wallet: &Ledger) -> Ledger {
    add_amount(item, wallet, Decimal::ONE)
}

/// Add `amount` units of `item` to `wallet`.
///
/// This only counts the item; it does not charge its cost.
pub fn add_amount<S>(item: &Item<S>, wallet: &Ledger, amount: Decimal) -> Ledger {
    sum([wallet, &Ledger::from([(item.item_type(), amount)])])
}

/// Return what the owned items produce together in one tick.
///
/// Each item with an effect contributes its per-unit effect scaled by the
/// number of units the wallet holds (zero when it holds none). Items without
/// an effect contribute nothing.
pub fn effects<'a, S, I>(items: I, wallet: &Ledger, state: &S) -> Ledger
where
    S: 'a,
    I: IntoIterator<Item = &'a Item<S>>,
{
    let produced: Vec<Ledger> = items
        .into_iter()
        .filter_map(|item| {
            let per_unit = item.effect_for(state)?;
            Some(scale(&per_unit, wallet.amount_of(item.item_type())))
        })
        .collect();

    sum(&produced)
}
